//! Transcript pane: the conversation plus the pending indicator.

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use atelier_core::{notices, ChatMessage, ChatRole};

use super::text::wrap_indented;
use super::theme::Theme;

/// Renders a slice of transcript messages, newest at the bottom.
#[derive(Debug, Clone)]
pub struct TranscriptView<'a> {
    /// Messages to display.
    messages: &'a [ChatMessage],
    /// Whether a reply is pending.
    pending: bool,
    focused: bool,
    theme: Theme,
}

impl<'a> TranscriptView<'a> {
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            pending: false,
            focused: false,
            theme: Theme::default(),
        }
    }

    /// Show the pending indicator under the last message.
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build every line of the transcript for the given text width.
    pub fn lines(&self, text_width: usize) -> Vec<Line<'static>> {
        let mut all_lines: Vec<Line<'static>> = Vec::new();

        for msg in self.messages {
            let (prefix, style) = match msg.role {
                ChatRole::User => ("You ", self.theme.user_style()),
                ChatRole::Assistant | ChatRole::System => {
                    ("Atelier ", self.theme.assistant_style())
                }
            };

            all_lines.push(Line::from(vec![
                Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                Span::styled(format_time(msg.timestamp_ms), self.theme.muted_style()),
            ]));

            for wrapped in wrap_indented(&msg.content, text_width, "  ") {
                all_lines.push(Line::from(Span::raw(wrapped)));
            }

            all_lines.push(Line::from(""));
        }

        if self.pending {
            all_lines.push(Line::from(Span::styled(
                format!("  {}", notices::THINKING),
                self.theme.pending_style(),
            )));
        }

        all_lines
    }

    /// Render the widget.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };

        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;

        let all_lines = self.lines(text_width);
        let total_lines = all_lines.len();

        // Always pinned to the newest message
        let scroll_offset = total_lines.saturating_sub(visible_height);

        let lines: Vec<Line> = all_lines
            .into_iter()
            .skip(scroll_offset)
            .take(visible_height)
            .collect();

        let title = if total_lines == 0 {
            " Conversation ".to_string()
        } else {
            let last_line = (scroll_offset + visible_height).min(total_lines);
            format!(
                " Conversation [{}-{}/{}] ",
                scroll_offset + 1,
                last_line,
                total_lines
            )
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

        frame.render_widget(paragraph, area);
    }
}

fn format_time(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_pending_line_follows_messages() {
        let messages = vec![ChatMessage::user("Who are the founders?")];
        let lines = plain(&TranscriptView::new(&messages).pending(true).lines(40));

        assert!(lines[0].starts_with("You "));
        assert_eq!(lines[1], "  Who are the founders?");
        assert_eq!(lines.last().unwrap(), "  Thinking…");
    }

    #[test]
    fn test_no_pending_line_when_idle() {
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("Hello from the studio."),
        ];
        let lines = plain(&TranscriptView::new(&messages).lines(40));

        assert!(lines.iter().all(|l| !l.contains(notices::THINKING)));
        assert!(lines.iter().any(|l| l.starts_with("Atelier ")));
    }
}
