use crate::types::TriggerState;
use std::sync::{Arc, Mutex, PoisonError};

/// Shared visual state of the check-for-update button.
///
/// The controller writes it, the UI reads it every frame.
#[derive(Debug, Clone, Default)]
pub struct TriggerHandle {
    state: Arc<Mutex<TriggerState>>,
}

impl TriggerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, state: TriggerState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn get(&self) -> TriggerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let trigger = TriggerHandle::new();
        let ui_side = trigger.clone();
        trigger.set(TriggerState::HasUpdate);
        assert_eq!(ui_side.get(), TriggerState::HasUpdate);
        assert_eq!(ui_side.get().class(), "has-update");
    }
}
