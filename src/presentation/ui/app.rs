//! Main application orchestrator.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{info, trace};

use crate::application::{PreviewEvent, PreviewOutcome, PreviewService};
use crate::domain::entities::SharedPreview;
use crate::presentation::control::{ControlAction, ControlConfig, IdPreviewControl};
use crate::presentation::events;
use crate::presentation::widgets::PreviewPane;

/// Wires the input control, preview pane, and preview events into one
/// terminal event loop.
pub struct App {
    control: IdPreviewControl,
    pane: PreviewPane,
    model: SharedPreview,
    preview_events: mpsc::UnboundedReceiver<PreviewEvent>,
    status: String,
    should_exit: bool,
}

impl App {
    /// Creates the app around an already-wired preview service.
    #[must_use]
    pub fn new(
        service: Arc<PreviewService>,
        preview_events: mpsc::UnboundedReceiver<PreviewEvent>,
        config: ControlConfig,
    ) -> Self {
        let model = service.model();
        let control = IdPreviewControl::new("token-id", config)
            .with_preview(service)
            .on_valid_change(|valid, state| {
                trace!(valid, value = %state.value, "Input changed");
            });

        Self {
            control,
            pane: PreviewPane::new(),
            model,
            preview_events,
            status: String::new(),
            should_exit: false,
        }
    }

    /// Runs the event loop until quit.
    ///
    /// # Errors
    /// Returns an error when the terminal cannot be drawn or read.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        startup_id: Option<String>,
    ) -> Result<()> {
        self.control.start(startup_id.as_deref());

        let mut input_events = EventStream::new();
        terminal.draw(|frame| self.draw(frame))?;

        while !self.should_exit {
            tokio::select! {
                maybe_event = input_events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(&key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
                Some(event) = self.preview_events.recv() => {
                    self.handle_preview_event(&event);
                }
            }

            terminal.draw(|frame| self.draw(frame))?;
        }

        info!("Exiting");
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if events::is_quit_event(key) {
            self.should_exit = true;
            return;
        }

        match self.control.handle_key(key) {
            ControlAction::Applied(id) => {
                info!(id = %id, "Identifier applied");
                self.status = format!("applied #{id}");
            }
            ControlAction::Cleared => {
                self.status = "cleared".to_string();
            }
            ControlAction::Edited | ControlAction::Ignored => {}
        }
    }

    fn handle_preview_event(&mut self, event: &PreviewEvent) {
        trace!(id = %event.id, outcome = ?event.outcome, "Preview event");
        if event.outcome == PreviewOutcome::Exhausted {
            self.status = format!("no image found for #{}", event.id);
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        frame.render_widget(self.control.input(), chunks[0]);

        {
            let model = self.model.read();
            self.pane.render(frame, chunks[1], &model);
        }

        self.draw_status_line(frame, chunks[2]);
    }

    fn draw_status_line(&self, frame: &mut Frame<'_>, area: Rect) {
        let state = self.control.normalized();
        let validity = if state.empty {
            Span::styled("empty → default", Style::default().fg(Color::DarkGray))
        } else if state.valid {
            Span::styled(
                format!("✔ #{}", state.value),
                Style::default().fg(Color::Green),
            )
        } else {
            Span::styled("✘ out of range", Style::default().fg(Color::Red))
        };

        let mut spans = vec![
            validity,
            Span::raw("  "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Gray)),
        ];
        if self.control.can_apply() {
            spans.push(Span::styled(
                "  enter: apply",
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            "  ctrl-q: quit",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("control", &self.control)
            .field("should_exit", &self.should_exit)
            .finish_non_exhaustive()
    }
}
