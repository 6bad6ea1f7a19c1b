//! Keyboard mapping.

use macroquad::prelude::*;

use saga_view::Input;

/// Map a key to a player intent.
pub fn intent_for(key: KeyCode) -> Option<Input> {
    match key {
        KeyCode::Up => Some(Input::MoveFocusUp),
        KeyCode::Down => Some(Input::MoveFocusDown),
        KeyCode::Enter | KeyCode::KpEnter => Some(Input::Confirm),
        _ => None,
    }
}

/// Intents for every mapped key pressed this frame.
pub fn pressed_intents() -> Vec<Input> {
    [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::KpEnter]
        .into_iter()
        .filter(|&key| is_key_pressed(key))
        .filter_map(intent_for)
        .collect()
}

/// Check if the Escape key was pressed this frame.
pub fn escape_pressed() -> bool {
    is_key_pressed(KeyCode::Escape)
}
