//! Terminal session and event loop.

use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use ratatui::widgets::Paragraph;
use tracing::{debug, info};

use crate::error::{Result, TfsError};
use crate::plan::Buckets;

use super::keys::command_for;
use super::state::{Flow, NavCommand, Navigator, Viewport};
use super::view::ViewRenderer;

/// Terminal in raw mode on the alternate screen, restored on drop.
struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    fn init() -> Result<Self> {
        let terminal = ratatui::try_init()
            .map_err(|e| TfsError::terminal(format!("Failed to initialize terminal: {e}")))?;
        Ok(Self { terminal })
    }

    fn viewport(&self) -> Result<Viewport> {
        let size = self
            .terminal
            .size()
            .map_err(|e| TfsError::terminal(format!("Failed to read terminal size: {e}")))?;
        Ok(Viewport::new(size.width, size.height))
    }

    fn draw(&mut self, view: &ViewRenderer, nav: &Navigator) -> Result<()> {
        let text = view.frame(nav);
        self.terminal
            .draw(|frame| frame.render_widget(Paragraph::new(text), frame.area()))
            .map_err(|e| TfsError::terminal(format!("Failed to draw frame: {e}")))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Runs the interactive session until the user quits.
///
/// Blocks on terminal input. The terminal is restored on every exit path.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or read from.
pub fn run(buckets: Buckets) -> Result<()> {
    info!("Starting interactive session with {} changes", buckets.total());

    let mut session = TerminalSession::init()?;
    let mut nav = Navigator::new(buckets, session.viewport()?);
    let view = ViewRenderer::new();

    loop {
        session.draw(&view, &nav)?;

        let event = event::read()
            .map_err(|e| TfsError::terminal(format!("Failed to read input: {e}")))?;
        let command = match event {
            Event::Key(key) => command_for(key),
            Event::Resize(width, height) => Some(NavCommand::Resize { width, height }),
            _ => None,
        };

        if let Some(command) = command {
            if nav.handle(command) == Flow::Quit {
                break;
            }
        }
    }

    debug!("Interactive session ended");
    Ok(())
}
