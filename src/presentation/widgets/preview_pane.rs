//! Preview pane rendering.

use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{Resize, StatefulImage};

use crate::domain::entities::{PreviewContent, PreviewModel};

/// Renders the shared preview model into a terminal pane.
///
/// Keeps the terminal graphics protocol state for the currently shown
/// image and rebuilds it only when the model publishes different pixels.
pub struct PreviewPane {
    picker: Picker,
    protocol: Option<StatefulProtocol>,
    // Address of the Arc'd pixels currently shown, compared for identity only.
    shown: Option<usize>,
}

impl PreviewPane {
    /// Creates a pane, probing the terminal for its best graphics protocol.
    #[must_use]
    pub fn new() -> Self {
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

        let caps = picker.capabilities();
        let has_sixel = caps
            .iter()
            .any(|c| matches!(c, ratatui_image::picker::Capability::Sixel));
        let has_kitty = caps
            .iter()
            .any(|c| matches!(c, ratatui_image::picker::Capability::Kitty));

        if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
            picker.set_protocol_type(ProtocolType::Sixel);
        }

        Self {
            picker,
            protocol: None,
            shown: None,
        }
    }

    /// Creates a pane rendering with half-block characters only.
    #[must_use]
    pub fn halfblocks() -> Self {
        Self {
            picker: Picker::halfblocks(),
            protocol: None,
            shown: None,
        }
    }

    fn sync(&mut self, model: &PreviewModel) {
        if let PreviewContent::Image(_, image) = model.content() {
            let ptr = Arc::as_ptr(image) as usize;
            if self.shown != Some(ptr) {
                self.protocol = Some(self.picker.new_resize_protocol((**image).clone()));
                self.shown = Some(ptr);
            }
        } else {
            self.protocol = None;
            self.shown = None;
        }
    }

    /// Draws the pane for the model's current state.
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect, model: &PreviewModel) {
        self.sync(model);

        let title = if model.is_loading() {
            " preview · loading… "
        } else {
            " preview "
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match model.content() {
            PreviewContent::Blank => {}
            PreviewContent::Badge(id) => {
                frame.render_widget(badge_line(id, Color::Yellow), centered_line(inner));
            }
            PreviewContent::Image(_, _) => {
                if let Some(protocol) = self.protocol.as_mut() {
                    let image = StatefulImage::default().resize(Resize::Fit(None));
                    frame.render_stateful_widget(image, inner, protocol);
                }
            }
            PreviewContent::Unavailable(id) => {
                let text = Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!("#{id}"),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "image unavailable",
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(text, centered_block(inner, 2));
            }
        }
    }
}

impl Default for PreviewPane {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PreviewPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewPane")
            .field("has_protocol", &self.protocol.is_some())
            .finish_non_exhaustive()
    }
}

fn badge_line(id: &str, color: Color) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        format!("#{id}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
}

fn centered_line(area: Rect) -> Rect {
    centered_block(area, 1)
}

fn centered_block(area: Rect, height: u16) -> Rect {
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(area.x, y, area.width, height.min(area.height))
}
