use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Colors shared by every part of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub muted: Color,
    pub text: Color,
    pub warn: Color,
    pub error: Color,
    pub focus: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::LightCyan,
            muted: Color::DarkGray,
            text: Color::White,
            warn: Color::Yellow,
            error: Color::Red,
            focus: Color::LightCyan,
        }
    }
}

impl Theme {
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn panel<'a>(&self, title: impl Into<String>, focused: bool) -> Block<'a> {
        let border = if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.muted)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title.into())
    }
}
