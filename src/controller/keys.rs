//! Keys the controller reacts to

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key-press the suggestion dropdown understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Close the dropdown
    Escape,
    /// Open the dropdown, or commit the highlighted suggestion
    Enter,
    /// Commit the highlighted suggestion
    Tab,
    /// Commit the highlighted suggestion
    Space,
    /// Move the highlight up
    ArrowUp,
    /// Move the highlight down
    ArrowDown,
}

impl Key {
    /// Map a terminal key event to a dropdown key
    ///
    /// Keys held with Ctrl or Alt are left to the host.
    #[must_use]
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match event.code {
            KeyCode::Esc => Some(Self::Escape),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Tab => Some(Self::Tab),
            KeyCode::Char(' ') => Some(Self::Space),
            KeyCode::Up => Some(Self::ArrowUp),
            KeyCode::Down => Some(Self::ArrowDown),
            _ => None,
        }
    }

    /// Whether this key can commit the highlighted suggestion
    #[must_use]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Enter | Self::Tab | Self::Space)
    }
}

/// Result of handling a key-press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State changed (dropdown toggled or highlight moved)
    Handled,
    /// The highlighted suggestion became the value; the key's default
    /// action must be suppressed
    Committed(String),
    /// Nothing happened; the host should run the key's default action
    Ignored,
}

impl KeyOutcome {
    /// Whether the host must suppress the key's default action
    #[must_use]
    pub const fn suppresses_default(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
