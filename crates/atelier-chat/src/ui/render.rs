//! Main render function for the chat client.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::widget::ChatWidget;

use super::text::truncate;
use super::theme::Theme;
use super::transcript::TranscriptView;

/// Render the whole screen.
pub fn render(frame: &mut Frame, widget: &ChatWidget, status: &str) {
    let theme = Theme::default();
    let area = frame.area();

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    if widget.is_open() {
        render_open(frame, body_area, widget, &theme);
    } else {
        render_launcher(frame, body_area, &theme);
    }

    render_footer(frame, footer_area, widget, status, &theme);
}

fn render_open(frame: &mut Frame, area: Rect, widget: &ChatWidget, theme: &Theme) {
    let [transcript_area, suggestions_area, input_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(area);

    TranscriptView::new(widget.transcript().messages())
        .pending(widget.is_pending())
        .focused(true)
        .theme(theme.clone())
        .render(frame, transcript_area);

    render_suggestions(frame, suggestions_area, widget, theme);
    render_input(frame, input_area, widget, theme);
}

/// Suggestions bar: `[F1] Who are the founders?  [F2] ...`
fn render_suggestions(frame: &mut Frame, area: Rect, widget: &ChatWidget, theme: &Theme) {
    let slot_width = (area.width as usize / widget.suggestions().len().max(1)).saturating_sub(6);

    let mut spans = Vec::new();
    for (i, prompt) in widget.suggestions().iter().enumerate() {
        spans.push(Span::styled(format!(" [F{}] ", i + 1), theme.title_style()));
        spans.push(Span::styled(truncate(prompt, slot_width), theme.muted_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, area: Rect, widget: &ChatWidget, theme: &Theme) {
    let (title, border) = if widget.is_pending() {
        (" Waiting for reply ", theme.unfocused_border())
    } else {
        (" Ask about the studio (Enter to send) ", theme.focused_border())
    };

    let input = Paragraph::new(widget.input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    frame.render_widget(input, area);

    if !widget.is_pending() {
        let width: u16 = unicode_width::UnicodeWidthStr::width(widget.input())
            .try_into()
            .unwrap_or(u16::MAX);
        let x = area.x + 1 + width.min(area.width.saturating_sub(3));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_launcher(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled("Atelier", theme.title_style())),
        Line::from(""),
        Line::from("Questions about the studio, its founders or a project?"),
        Line::from(Span::styled(
            "Press Ctrl+O to open the assistant.",
            theme.muted_style(),
        )),
    ];

    let launcher = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.unfocused_border()),
    );
    frame.render_widget(launcher, area);
}

fn render_footer(frame: &mut Frame, area: Rect, widget: &ChatWidget, status: &str, theme: &Theme) {
    let keys = if widget.is_open() {
        "Enter send | F1-F4 suggestion | Esc close | Ctrl+C quit"
    } else {
        "Ctrl+O open | Ctrl+C quit"
    };

    let footer = Line::from(vec![
        Span::styled(format!(" {status} "), theme.pending_style()),
        Span::styled(keys, theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}
