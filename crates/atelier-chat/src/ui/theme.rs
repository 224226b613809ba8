//! Colours for the chat front end.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the Atelier chat client.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (borders, active elements)
    pub accent: Color,
    /// Pending indicator color
    pub pending: Color,
    /// Muted color (timestamps, hints)
    pub muted: Color,
    /// User message color
    pub user: Color,
    /// Assistant message color
    pub assistant: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Magenta,
            pending: Color::Yellow,
            muted: Color::DarkGray,
            user: Color::Cyan,
            assistant: Color::Green,
        }
    }
}

impl Theme {
    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn pending_style(&self) -> Style {
        Style::default()
            .fg(self.pending)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for user messages.
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user)
    }

    /// Style for assistant messages.
    pub fn assistant_style(&self) -> Style {
        Style::default().fg(self.assistant)
    }
}
