use super::UpdateError;
use crate::types::{ProgressEvent, UpdateInfo};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Receives install progress from a provider
pub type ProgressCallback = Box<dyn FnMut(ProgressEvent) + Send>;

/// Asks the host to shut down cleanly (close the window, run exit hooks)
pub type ShutdownHook = Arc<dyn Fn() + Send + Sync>;

/// Something that knows how to find, install and restart into a new release.
///
/// The controller only sequences UI around these three calls; all network,
/// file system and process work lives behind this trait.
pub trait UpdateProvider: Send + Sync + 'static {
    /// `Ok(None)` and `Ok(Some(info))` with `available == false` both mean
    /// the running version is current.
    fn check(&self) -> BoxFuture<'_, Result<Option<UpdateInfo>, UpdateError>>;

    /// Resolves once the new version is in place. `Finished` is emitted
    /// when the download completes.
    fn download_and_install(
        &self,
        on_event: ProgressCallback,
    ) -> BoxFuture<'_, Result<(), UpdateError>>;

    /// Start the installed version. On success the caller should expect the
    /// host to begin shutting down.
    fn relaunch(&self) -> Result<(), UpdateError>;
}
