//! Event handling for the terminal front end
//!
//! Translates crossterm key and mouse events into controller calls. Plain
//! text editing (insert, backspace, cursor motion) happens here and reaches
//! the controller as the input's full new value.

use super::state::EditorState;
use crate::controller::{InputController, Key, KeyOutcome};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Exit, accepting the current value
    Confirm(String),
    /// Exit without a value
    Abort,
    /// No action taken
    Ignored,
}

/// Handle a key event
pub fn handle_key(controller: &mut InputController, editor: &mut EditorState, key: KeyEvent) -> EventResult {
    if key.kind == KeyEventKind::Release {
        return EventResult::Ignored;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return EventResult::Abort,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            return EventResult::Confirm(controller.value().to_string());
        }
        _ => {}
    }

    if let Some(dropdown_key) = Key::from_key_event(&key) {
        let outcome = controller.on_key_press(dropdown_key);
        return match outcome {
            KeyOutcome::Committed(_) => {
                editor.cursor_end(controller.value());
                EventResult::Continue
            }
            KeyOutcome::Handled => EventResult::Continue,
            // Space still types a space when nothing was committed
            KeyOutcome::Ignored if dropdown_key == Key::Space => {
                edit(controller, editor, |text, cursor| insert_char(text, cursor, ' '))
            }
            KeyOutcome::Ignored => EventResult::Ignored,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            edit(controller, editor, |text, cursor| insert_char(text, cursor, c))
        }
        (KeyCode::Backspace, _) => edit(controller, editor, backspace),
        (KeyCode::Delete, _) => edit(controller, editor, delete),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            edit(controller, editor, |_, _| Some((String::new(), 0)))
        }
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => edit(controller, editor, delete_word_backwards),
        (KeyCode::Left, _) => {
            editor.cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            editor.cursor_right(controller.value());
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            editor.cursor = 0;
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            editor.cursor_end(controller.value());
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle mouse events
///
/// A left click on a suggestion row selects that suggestion.
pub fn handle_mouse(controller: &mut InputController, editor: &mut EditorState, mouse: MouseEvent) -> EventResult {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return EventResult::Ignored;
    }

    let Some(index) = editor.row_at(mouse.column, mouse.row) else {
        return EventResult::Ignored;
    };
    let Some(candidate) = controller.visible_suggestions().get(index).cloned() else {
        return EventResult::Ignored;
    };

    if controller.on_item_select(&candidate) {
        editor.cursor_end(controller.value());
    }
    EventResult::Continue
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(
    controller: &mut InputController,
    editor: &mut EditorState,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(controller, editor, key),
        Event::Mouse(mouse) => handle_mouse(controller, editor, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}

/// Apply a text edit and forward the new value to the controller
fn edit<F>(controller: &mut InputController, editor: &mut EditorState, op: F) -> EventResult
where
    F: FnOnce(&str, usize) -> Option<(String, usize)>,
{
    let Some((text, cursor)) = op(controller.value(), editor.cursor) else {
        return EventResult::Ignored;
    };

    editor.cursor = cursor;
    controller.on_text_input(text);
    EventResult::Continue
}

/// Byte index of a character position
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i)
}

fn insert_char(text: &str, cursor: usize, c: char) -> Option<(String, usize)> {
    let mut text = text.to_string();
    text.insert(byte_index(&text, cursor), c);
    Some((text, cursor + 1))
}

fn backspace(text: &str, cursor: usize) -> Option<(String, usize)> {
    if cursor == 0 {
        return None;
    }

    let mut text = text.to_string();
    text.remove(byte_index(&text, cursor - 1));
    Some((text, cursor - 1))
}

fn delete(text: &str, cursor: usize) -> Option<(String, usize)> {
    let byte_idx = byte_index(text, cursor);
    if byte_idx >= text.len() {
        return None;
    }

    let mut text = text.to_string();
    text.remove(byte_idx);
    Some((text, cursor))
}

fn delete_word_backwards(text: &str, cursor: usize) -> Option<(String, usize)> {
    if cursor == 0 {
        return None;
    }

    let byte_idx = byte_index(text, cursor);
    let trimmed = text[..byte_idx].trim_end();
    let new_end = trimmed
        .rfind(char::is_whitespace)
        .map_or(0, |last_space| last_space + 1);

    let mut text = text.to_string();
    text.drain(new_end..byte_idx);
    let cursor = text[..new_end].chars().count();
    Some((text, cursor))
}
