//! # Confirmation Dialog Hook
//!
//! Destructive row actions (delete, cancel, reject...) are parked in a
//! [`ConfirmState`] until the user confirms or dismisses the dialog. While
//! the confirmed action runs, the dialog stays open and cannot be dismissed.

use dioxus::prelude::*;

/// A pending confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest<A> {
    pub action: A,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl<A> ConfirmRequest<A> {
    pub fn new(action: A, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action,
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
        }
    }

    /// Label of the confirm button
    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }
}

/// Dialog state machine: closed → open → running → closed
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmState<A> {
    request: Option<ConfirmRequest<A>>,
    running: bool,
}

impl<A> Default for ConfirmState<A> {
    fn default() -> Self {
        Self {
            request: None,
            running: false,
        }
    }
}

impl<A: Clone> ConfirmState<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog; ignored while another confirmation is pending
    pub fn open(&mut self, request: ConfirmRequest<A>) -> bool {
        if self.request.is_some() {
            return false;
        }
        self.request = Some(request);
        true
    }

    /// Accept the pending action and mark it running
    ///
    /// Returns `None` when nothing is pending or the action already runs.
    pub fn confirm(&mut self) -> Option<A> {
        if self.running {
            return None;
        }
        let action = self.request.as_ref()?.action.clone();
        self.running = true;
        Some(action)
    }

    /// Close without running anything; refused while the action runs
    pub fn dismiss(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.request.take().is_some()
    }

    /// The confirmed action completed (successfully or not)
    pub fn finish(&mut self) {
        self.running = false;
        self.request = None;
    }

    pub fn request(&self) -> Option<&ConfirmRequest<A>> {
        self.request.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.request.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Confirmation state signal
pub fn use_confirm<A: Clone + 'static>() -> Signal<ConfirmState<A>> {
    use_signal(ConfirmState::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: u64) -> ConfirmRequest<u64> {
        ConfirmRequest::new(id, "Delete hotel", "This cannot be undone")
    }

    #[test]
    fn test_confirm_then_finish() {
        let mut state = ConfirmState::new();
        assert!(state.open(request(7)));
        assert!(state.is_open());

        assert_eq!(state.confirm(), Some(7));
        assert!(state.is_running());
        // A second click while running does nothing
        assert_eq!(state.confirm(), None);
        assert!(!state.dismiss());

        state.finish();
        assert!(!state.is_open());
        assert!(!state.is_running());
    }

    #[test]
    fn test_dismiss_returns_nothing() {
        let mut state = ConfirmState::new();
        state.open(request(3));
        assert!(state.dismiss());
        assert!(!state.is_open());
        assert_eq!(state.confirm(), None);
    }

    #[test]
    fn test_second_open_is_ignored() {
        let mut state = ConfirmState::new();
        assert!(state.open(request(1)));
        assert!(!state.open(request(2)));
        assert_eq!(state.request().map(|r| r.action), Some(1));
    }

    #[test]
    fn test_confirm_label() {
        let req = request(1).with_confirm_label("Delete");
        assert_eq!(req.confirm_label, "Delete");
        assert_eq!(request(1).confirm_label, "Confirm");
    }
}
