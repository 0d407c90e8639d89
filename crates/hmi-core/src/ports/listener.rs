use crate::display::CurrentDisplayState;

/// Notified after every accepted update has been merged.
pub trait ScreenStateListener: Send + Sync {
    fn on_screen_state_changed(&self, state: &CurrentDisplayState);
}

/// Notified exactly once when an operation finishes.
pub trait CompletionListener: Send + Sync {
    fn on_complete(&self, success: bool);
}
