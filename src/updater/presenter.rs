use crate::constants::{MSG_DOWNLOADING, MSG_FINISHED};
use crate::types::{Decision, DialogAction, ProgressEvent, ToastKind, UpdateInfo};
use futures::future::BoxFuture;
use tokio::sync::oneshot;

/// Renders the update flow's modals and notices.
///
/// Every method must return without waiting on the user; `confirm_update`
/// hands back a future instead.
pub trait Presenter: Send + Sync + 'static {
    fn confirm_update(&self, info: &UpdateInfo) -> BoxFuture<'static, Decision>;
    fn show_progress(&self);
    fn set_progress(&self, percent: Option<f32>, text: &str);
    fn hide_progress(&self);
    fn toast(&self, message: &str, kind: ToastKind);
}

/// A pending confirmation modal. Resolves at most once.
#[derive(Debug)]
pub struct ConfirmationDialog {
    info: UpdateInfo,
    responder: Option<oneshot::Sender<Decision>>,
}

impl ConfirmationDialog {
    /// The returned future yields `Decline` if the dialog is dropped unresolved.
    pub fn open(info: UpdateInfo) -> (Self, BoxFuture<'static, Decision>) {
        let (tx, rx) = oneshot::channel();
        let dialog = Self {
            info,
            responder: Some(tx),
        };
        let decision = Box::pin(async move { rx.await.unwrap_or(Decision::Decline) });
        (dialog, decision)
    }

    pub fn info(&self) -> &UpdateInfo {
        &self.info
    }

    pub fn is_open(&self) -> bool {
        self.responder.is_some()
    }

    /// Returns false when the dialog was already resolved.
    pub fn resolve(&mut self, action: DialogAction) -> bool {
        match self.responder.take() {
            Some(tx) => {
                // Receiver gone means the flow was abandoned; nothing to report
                let _ = tx.send(action.into());
                true
            }
            None => false,
        }
    }
}

/// Text and bar position for one progress event
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub percent: Option<f32>,
    pub text: String,
}

impl ProgressReport {
    pub fn from_event(event: ProgressEvent) -> Self {
        match event {
            ProgressEvent::Started => Self {
                percent: Some(0.0),
                text: MSG_DOWNLOADING.to_string(),
            },
            ProgressEvent::Progress(Some(pct)) if pct.is_finite() => {
                let pct = pct.clamp(0.0, 100.0);
                Self {
                    percent: Some(pct),
                    text: format!("{} {:.0}%", MSG_DOWNLOADING, pct),
                }
            }
            // Unknown total: indeterminate bar rather than a stalled one
            ProgressEvent::Progress(_) => Self {
                percent: None,
                text: MSG_DOWNLOADING.to_string(),
            },
            ProgressEvent::Finished => Self {
                percent: Some(100.0),
                text: MSG_FINISHED.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> UpdateInfo {
        UpdateInfo::available("0.2.0", "fixes")
    }

    #[tokio::test]
    async fn test_dialog_resolves_once_on_accept() {
        let (mut dialog, decision) = ConfirmationDialog::open(info());
        assert!(dialog.resolve(DialogAction::Accept));
        assert!(!dialog.resolve(DialogAction::Decline));
        assert!(!dialog.resolve(DialogAction::Backdrop));
        assert!(!dialog.is_open());
        assert_eq!(decision.await, Decision::Accept);
    }

    #[tokio::test]
    async fn test_dialog_resolves_once_on_backdrop() {
        let (mut dialog, decision) = ConfirmationDialog::open(info());
        assert!(dialog.resolve(DialogAction::Backdrop));
        assert!(!dialog.resolve(DialogAction::Accept));
        assert_eq!(decision.await, Decision::Decline);
    }

    #[tokio::test]
    async fn test_dialog_resolves_once_on_decline() {
        let (mut dialog, decision) = ConfirmationDialog::open(info());
        assert!(dialog.resolve(DialogAction::Decline));
        assert!(!dialog.resolve(DialogAction::Accept));
        assert_eq!(decision.await, Decision::Decline);
    }

    #[tokio::test]
    async fn test_dropped_dialog_declines() {
        let (dialog, decision) = ConfirmationDialog::open(info());
        assert_eq!(dialog.info().version, "0.2.0");
        drop(dialog);
        assert_eq!(decision.await, Decision::Decline);
    }

    #[test]
    fn test_unknown_progress_is_indeterminate() {
        let report = ProgressReport::from_event(ProgressEvent::Progress(None));
        assert_eq!(report.percent, None);
        assert_eq!(report.text, MSG_DOWNLOADING);

        let report = ProgressReport::from_event(ProgressEvent::Progress(Some(f32::NAN)));
        assert_eq!(report.percent, None);
    }

    #[test]
    fn test_known_progress_is_clamped() {
        let report = ProgressReport::from_event(ProgressEvent::Progress(Some(42.4)));
        assert_eq!(report.percent, Some(42.4));
        assert_eq!(report.text, "Downloading update... 42%");

        let report = ProgressReport::from_event(ProgressEvent::Progress(Some(130.0)));
        assert_eq!(report.percent, Some(100.0));
    }

    #[test]
    fn test_finished_report() {
        let report = ProgressReport::from_event(ProgressEvent::Finished);
        assert_eq!(report.percent, Some(100.0));
        assert_eq!(report.text, MSG_FINISHED);
    }
}
