//! Input state queried by `Input_IsKeyDown`

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Symbolic key identifiers understood by the input backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    /// A key the backend reported but could not map. Never reads as held.
    Unknown,
}

impl KeyCode {
    /// Map a single printable character to its key, if there is one.
    pub fn from_char(c: char) -> Option<Self> {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F,
            KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L,
            KeyCode::M, KeyCode::N, KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R,
            KeyCode::S, KeyCode::T, KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X,
            KeyCode::Y, KeyCode::Z,
        ];
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3,
            KeyCode::Digit4, KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7,
            KeyCode::Digit8, KeyCode::Digit9,
        ];

        match c.to_ascii_uppercase() {
            l @ 'A'..='Z' => Some(LETTERS[(l as u8 - b'A') as usize]),
            d @ '0'..='9' => Some(DIGITS[(d as u8 - b'0') as usize]),
            ' ' => Some(KeyCode::Space),
            _ => None,
        }
    }
}

/// Current state of the keyboard.
///
/// Holds the set of keys that are down right now. There is no history;
/// edge detection is the caller's business.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        if key == KeyCode::Unknown {
            tracing::trace!("ignoring press of unmapped key");
            return;
        }
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}
