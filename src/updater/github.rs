//! GitHub releases provider

use super::{ProgressCallback, ShutdownHook, UpdateError, UpdateProvider, UpdaterConfig};
use crate::constants::APP_VERSION;
use crate::types::{ProgressEvent, UpdateInfo};
use crate::utils::version_newer;
use futures::future::BoxFuture;
use futures::StreamExt;
use self_update::update::Release;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

pub struct GithubProvider {
    config: UpdaterConfig,
    client: reqwest::Client,
    staging_dir: PathBuf,
    /// Release found by the last successful check
    pending: Mutex<Option<Release>>,
    /// Resolved at startup; after self-replace the running image may no
    /// longer resolve to a usable path
    exe_path: Option<PathBuf>,
    shutdown: ShutdownHook,
}

impl GithubProvider {
    pub fn new(config: UpdaterConfig, staging_dir: PathBuf, shutdown: ShutdownHook) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            config,
            client,
            staging_dir,
            pending: Mutex::new(None),
            exe_path: std::env::current_exe().ok(),
            shutdown,
        }
    }

    async fn latest_release(&self) -> Result<Option<Release>, UpdateError> {
        let owner = self.config.repo_owner.clone();
        let name = self.config.repo_name.clone();
        // self_update fetches with a blocking client
        let releases = tokio::task::spawn_blocking(move || {
            self_update::backends::github::ReleaseList::configure()
                .repo_owner(&owner)
                .repo_name(&name)
                .build()
                .and_then(|r| r.fetch())
        })
        .await
        .map_err(|e| UpdateError::Check(e.to_string()))??;
        Ok(releases.into_iter().next())
    }

    async fn download_asset(
        &self,
        url: &str,
        dest: &Path,
        on_event: &mut ProgressCallback,
    ) -> Result<(), UpdateError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/octet-stream")
            .send()
            .await?
            .error_for_status()?;

        let total_size = response.content_length().filter(|len| *len > 0);
        let mut downloaded: u64 = 0;
        let mut bytes_vec = Vec::with_capacity(total_size.unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        let mut last_report = Instant::now();

        while let Some(chunk) = stream.next().await {
            let data = chunk?;
            downloaded += data.len() as u64;
            bytes_vec.extend_from_slice(&data);
            if last_report.elapsed() >= PROGRESS_INTERVAL {
                let percent = total_size.map(|total| downloaded as f32 / total as f32 * 100.0);
                on_event(ProgressEvent::Progress(percent));
                last_report = Instant::now();
            }
        }

        debug!(bytes = downloaded, path = %dest.display(), "Update asset downloaded");
        tokio::fs::write(dest, &bytes_vec).await?;
        Ok(())
    }
}

impl UpdateProvider for GithubProvider {
    fn check(&self) -> BoxFuture<'_, Result<Option<UpdateInfo>, UpdateError>> {
        Box::pin(async move {
            debug!("Checking for app updates");
            let Some(latest) = self.latest_release().await? else {
                debug!("No GitHub releases found");
                return Ok(None);
            };
            debug!(latest = %latest.version, current = APP_VERSION, "Fetched latest release");

            let newer = version_newer(&latest.version, APP_VERSION).map_err(|e| {
                UpdateError::Check(format!("invalid release version {}: {}", latest.version, e))
            })?;
            if !newer {
                return Ok(Some(UpdateInfo::up_to_date(latest.version)));
            }

            let info = UpdateInfo::available(
                latest.version.clone(),
                latest.body.clone().unwrap_or_default(),
            );
            *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(latest);
            Ok(Some(info))
        })
    }

    fn download_and_install(
        &self,
        mut on_event: ProgressCallback,
    ) -> BoxFuture<'_, Result<(), UpdateError>> {
        Box::pin(async move {
            let pending = self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            let release = match pending {
                Some(release) => release,
                None => self
                    .latest_release()
                    .await?
                    .ok_or_else(|| UpdateError::Install("no release to install".into()))?,
            };

            let target = self_update::get_target();
            let asset = release.asset_for(target, None).ok_or_else(|| {
                UpdateError::Install(format!(
                    "release {} has no asset for {}",
                    release.version, target
                ))
            })?;

            tokio::fs::create_dir_all(&self.staging_dir).await?;
            let archive_path = self.staging_dir.join(&asset.name);
            info!(asset = %asset.name, version = %release.version, "Downloading update asset");

            on_event(ProgressEvent::Started);
            self.download_asset(&asset.download_url, &archive_path, &mut on_event)
                .await?;
            on_event(ProgressEvent::Finished);

            let staging_dir = self.staging_dir.clone();
            let bin_name = self.config.bin_name.clone();
            tokio::task::spawn_blocking(move || install_archive(&archive_path, &staging_dir, &bin_name))
                .await
                .map_err(|e| UpdateError::Install(e.to_string()))??;

            info!(version = %release.version, "App update installed");
            Ok(())
        })
    }

    fn relaunch(&self) -> Result<(), UpdateError> {
        let exe = match &self.exe_path {
            Some(path) => path.clone(),
            None => std::env::current_exe()?,
        };
        spawn_and_shutdown(&exe, std::env::args_os().skip(1), &self.shutdown)
    }
}

/// Start `exe`, then hand control back to the host to close. Settings and
/// buffered logs are flushed by the host's normal exit path.
fn spawn_and_shutdown(
    exe: &Path,
    args: impl IntoIterator<Item = OsString>,
    shutdown: &ShutdownHook,
) -> Result<(), UpdateError> {
    info!(path = %exe.display(), "Relaunching application");
    let child = Command::new(exe)
        .args(args)
        .spawn()
        .map_err(|e| UpdateError::Relaunch(e.to_string()))?;
    debug!(pid = child.id(), "New instance started, requesting shutdown");
    shutdown();
    Ok(())
}

/// Extract the binary from a downloaded asset and swap it in for the running one
fn install_archive(archive: &Path, staging_dir: &Path, bin_name: &str) -> Result<(), UpdateError> {
    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let bin_file = format!("{}{}", bin_name, std::env::consts::EXE_SUFFIX);

    let kind = if file_name.ends_with(".zip") {
        Some(self_update::ArchiveKind::Zip)
    } else if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
        Some(self_update::ArchiveKind::Tar(Some(self_update::Compression::Gz)))
    } else {
        None
    };

    let new_exe = match kind {
        Some(kind) => {
            self_update::Extract::from_source(archive)
                .archive(kind)
                .extract_file(staging_dir, &bin_file)?;
            staging_dir.join(&bin_file)
        }
        // Bare executable asset
        None => archive.to_path_buf(),
    };

    debug!(path = %new_exe.display(), "Replacing running executable");
    self_replace::self_replace(&new_exe)?;

    if let Err(e) = std::fs::remove_file(&new_exe) {
        warn!(error = %e, "Failed to clean up staged executable");
    }
    if new_exe.as_path() != archive {
        let _ = std::fs::remove_file(archive);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_hook() -> (ShutdownHook, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let hook: ShutdownHook = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (hook, calls)
    }

    #[cfg(unix)]
    #[test]
    fn test_relaunch_requests_shutdown_instead_of_exiting() {
        let (hook, calls) = counting_hook();
        let args = ["-c", "exit 0"].map(OsString::from);

        spawn_and_shutdown(Path::new("/bin/sh"), args, &hook).unwrap();

        // Still running here; the host decides when to exit
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_spawn_keeps_host_running() {
        let (hook, calls) = counting_hook();
        let missing = std::env::temp_dir().join("update-flow-missing-binary");

        let err = spawn_and_shutdown(&missing, Vec::<OsString>::new(), &hook).unwrap_err();

        assert!(matches!(err, UpdateError::Relaunch(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
