//! Dropdown state machine
//!
//! Owns the input value, the current match set, the highlighted index and
//! the dropdown's open flag. It knows nothing about where matches come from:
//! the controller computes them and hands them over with
//! [`SuggestionState::replace_matches`].
//!
//! The highlight is `Option<usize>`; `None` is "nothing highlighted". Every
//! transition keeps it inside the match set, and it is cleared whenever the
//! match set is replaced or the dropdown closes.

use super::keys::{Key, KeyOutcome};

/// Input value, matches, highlight and visibility of one widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    value: String,
    matches: Vec<String>,
    selected: Option<usize>,
    open: bool,
}

impl SuggestionState {
    /// Closed dropdown with no matches yet
    #[must_use]
    pub fn new(initial_value: impl Into<String>) -> Self {
        Self {
            value: initial_value.into(),
            ..Self::default()
        }
    }

    /// Current input value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current match set, whether or not the dropdown is shown
    #[must_use]
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    /// Highlighted position in the match set
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highlighted position, or -1 when nothing is highlighted
    #[must_use]
    pub fn selection_index(&self) -> isize {
        self.selected
            .and_then(|index| isize::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Whether the user has the dropdown open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the dropdown is open and has something to show
    #[must_use]
    pub fn is_dropdown_visible(&self) -> bool {
        self.open && !self.matches.is_empty()
    }

    /// Suggestions to render: the match set while the dropdown is visible
    #[must_use]
    pub fn visible(&self) -> &[String] {
        if self.is_dropdown_visible() {
            &self.matches
        } else {
            &[]
        }
    }

    /// The highlighted suggestion, if any
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.matches.get(index))
            .map(String::as_str)
    }

    /// Accept typed text
    ///
    /// Returns `false` when the value did not change. Otherwise the dropdown
    /// opens and the highlight is cleared; the caller is expected to
    /// recompute matches.
    pub fn input(&mut self, new_value: impl Into<String>) -> bool {
        let new_value = new_value.into();
        if new_value == self.value {
            return false;
        }

        self.value = new_value;
        self.open = true;
        self.selected = None;
        true
    }

    /// Swap in a new match set and clear the highlight
    pub fn replace_matches(&mut self, matches: Vec<String>) {
        self.matches = matches;
        self.selected = None;
    }

    /// Handle a dropdown key
    pub fn press(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Escape => {
                self.close();
                KeyOutcome::Handled
            }
            Key::ArrowUp | Key::ArrowDown | Key::Enter if !self.open => {
                // First press only opens
                self.open = true;
                KeyOutcome::Handled
            }
            Key::ArrowUp => {
                self.selected = (!self.matches.is_empty())
                    .then(|| self.selected.map_or(0, |index| index.saturating_sub(1)));
                KeyOutcome::Handled
            }
            Key::ArrowDown => {
                let last = self.matches.len().checked_sub(1);
                self.selected =
                    last.map(|last| self.selected.map_or(0, |index| index + 1).min(last));
                KeyOutcome::Handled
            }
            key if key.is_commit() => self.commit_highlighted(),
            _ => KeyOutcome::Ignored,
        }
    }

    /// Take a clicked suggestion as the value and close the dropdown
    ///
    /// Clicking the current value changes nothing and returns `false`.
    pub fn select_item(&mut self, candidate: &str) -> bool {
        if candidate == self.value {
            return false;
        }

        self.value = candidate.to_string();
        self.close();
        true
    }

    /// Close the dropdown and clear the highlight
    pub fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }

    fn commit_highlighted(&mut self) -> KeyOutcome {
        let Some(item) = self.highlighted().map(str::to_owned) else {
            return KeyOutcome::Ignored;
        };

        self.value.clone_from(&item);
        self.close();
        KeyOutcome::Committed(item)
    }
}
