//! Terminal front end for the input controller
//!
//! Hosts one [`InputController`] in a full-screen ratatui interface: an input
//! field with the suggestion dropdown underneath. Key and mouse events are
//! forwarded to the controller, completed remote lookups are applied between
//! events, and the derived view is redrawn every tick.
//!
//! Keys: type to filter, Up/Down to move the highlight, Enter/Tab/Space to
//! commit it, Esc to close the dropdown, Ctrl+D to accept the value and
//! Ctrl+C to quit.

mod events;
mod state;
mod widgets;

pub use events::{EventResult, handle_key, handle_mouse, poll_and_handle};
pub use state::EditorState;
pub use widgets::{InputField, SuggestionList};

use crate::Result;
use crate::controller::InputController;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use std::io::{self, Stdout};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(30);

/// Full-screen host for an input controller
#[derive(Debug, Clone)]
pub struct TerminalFrontend {
    prompt: String,
    max_visible: usize,
}

impl TerminalFrontend {
    /// Create a front end with the given prompt
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_visible: 8,
        }
    }

    /// Limit the number of suggestion rows drawn at once
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
    }

    /// Run until the user accepts a value or quits
    ///
    /// Returns `Some(value)` on Ctrl+D and `None` on Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or drawn to.
    pub fn run(&self, controller: &mut InputController) -> Result<Option<String>> {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, controller);

        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!("terminal cleanup failed: {e}");
        }

        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        controller: &mut InputController,
    ) -> Result<Option<String>> {
        let mut editor = EditorState::at_end_of(controller.value());

        loop {
            controller.poll_suggestions();
            terminal.draw(|frame| self.render(frame, controller, &mut editor))?;

            match poll_and_handle(controller, &mut editor, TICK)? {
                EventResult::Confirm(value) => return Ok(Some(value)),
                EventResult::Abort => return Ok(None),
                EventResult::Continue | EventResult::Ignored => {}
            }
        }
    }

    /// Draw the input field, the dropdown and a help line
    pub fn render(&self, frame: &mut Frame<'_>, controller: &InputController, editor: &mut EditorState) {
        let visible = controller.visible_suggestions();
        let list_height = if visible.is_empty() {
            0
        } else {
            SuggestionList::height_for(visible.len(), self.max_visible)
        };

        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(list_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        frame.render_widget(InputField::new(controller.value(), editor.cursor, &self.prompt), chunks[0]);

        if visible.is_empty() {
            editor.list_area = None;
            editor.scroll_offset = 0;
        } else {
            let rows = usize::from(list_height.saturating_sub(2));
            editor.adjust_scroll(controller.selected(), rows);

            let list_area = chunks[1];
            editor.list_area = Some(ratatui::layout::Rect {
                x: list_area.x + 1,
                y: list_area.y + 1,
                width: list_area.width.saturating_sub(2),
                height: list_area.height.saturating_sub(2),
            });
            frame.render_widget(
                SuggestionList::new(visible, controller.selected(), editor.scroll_offset),
                list_area,
            );
        }

        let help = Paragraph::new(Line::from(
            "↑/↓ move  enter/tab/space accept  esc close  ctrl-d done  ctrl-c quit",
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new("Search")
    }
}
