//! Player intents understood by the views.

/// A navigation intent, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move the option focus up.
    MoveFocusUp,
    /// Move the option focus down.
    MoveFocusDown,
    /// Confirm the focused option, or skip the text animation.
    Confirm,
}
