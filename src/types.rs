//! Common types and data structures

/// Result of asking the provider for a newer release
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInfo {
    pub version: String,
    pub release_notes: String,
    pub available: bool,
}

impl UpdateInfo {
    pub fn available(version: impl Into<String>, release_notes: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_notes: release_notes.into(),
            available: true,
        }
    }

    pub fn up_to_date(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_notes: String::new(),
            available: false,
        }
    }
}

/// Where the update flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateFlowState {
    #[default]
    Idle,
    Checking,
    UpdateAvailable,
    Downloading,
    Installing,
    Done,
    Failed,
}

/// Emitted by a provider while downloading and installing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    Started,
    /// Percentage in 0..=100, `None` when the total size is unknown
    Progress(Option<f32>),
    Finished,
}

/// Visual state of the check-for-update trigger button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Idle,
    Checking,
    HasUpdate,
}

impl TriggerState {
    pub fn title(self) -> &'static str {
        match self {
            TriggerState::Idle => "Check for updates",
            TriggerState::Checking => "Checking for updates...",
            TriggerState::HasUpdate => "New version available! Click to update",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            TriggerState::Idle => "",
            TriggerState::Checking => "checking",
            TriggerState::HasUpdate => "has-update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// What the user chose in the update confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
}

/// Interaction that closed the confirmation modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Accept,
    Decline,
    /// Click outside the modal or escape
    Backdrop,
}

impl From<DialogAction> for Decision {
    fn from(action: DialogAction) -> Self {
        match action {
            DialogAction::Accept => Decision::Accept,
            DialogAction::Decline | DialogAction::Backdrop => Decision::Decline,
        }
    }
}

/// How a single `check_for_updates` call ended
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    UpToDate,
    Declined,
    Relaunched { version: String },
    Failed(String),
    AlreadyRunning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_counts_as_decline() {
        assert_eq!(Decision::from(DialogAction::Backdrop), Decision::Decline);
        assert_eq!(Decision::from(DialogAction::Decline), Decision::Decline);
        assert_eq!(Decision::from(DialogAction::Accept), Decision::Accept);
    }

    #[test]
    fn test_trigger_classes() {
        assert_eq!(TriggerState::Idle.class(), "");
        assert_eq!(TriggerState::Checking.class(), "checking");
        assert_eq!(TriggerState::HasUpdate.class(), "has-update");
        assert_eq!(TriggerState::default(), TriggerState::Idle);
    }
}
