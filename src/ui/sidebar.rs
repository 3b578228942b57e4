//! Navigation sidebar
//!
//! Lists every tab and reports a choice as a raw identifier through
//! [`Action::ChangeTab`]; it never touches router state itself.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use ratatui::Frame;

use super::theme::Theme;
use crate::core::{Action, TabId};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    cursor: usize,
}

impl Sidebar {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < TabId::ALL.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor onto the active tab
    pub fn follow(&mut self, active: TabId) {
        if let Some(index) = TabId::ALL.iter().position(|tab| *tab == active) {
            self.cursor = index;
        }
    }

    pub fn activate(&self) -> Action {
        match TabId::ALL.get(self.cursor) {
            Some(tab) => Action::ChangeTab(tab.as_str().to_string()),
            None => Action::None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, active: TabId, focused: bool, theme: &Theme) {
        let items: Vec<ListItem> = TabId::ALL
            .iter()
            .map(|tab| {
                let key = tab
                    .shortcut()
                    .map(|c| format!("{c} "))
                    .unwrap_or_else(|| "  ".to_string());
                let style = if *tab == active {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(key, theme.label()),
                    Span::styled(tab.title(), style),
                ]))
            })
            .collect();

        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(theme.panel("Tabs", focused))
            .highlight_style(highlight);
        let mut state = ListState::default();
        state.select(Some(self.cursor));
        f.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_emits_raw_identifier() {
        let mut sidebar = Sidebar::default();
        assert_eq!(sidebar.activate(), Action::ChangeTab("dashboard".to_string()));
        sidebar.down();
        assert_eq!(sidebar.activate(), Action::ChangeTab("explorer".to_string()));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut sidebar = Sidebar::default();
        sidebar.up();
        assert_eq!(sidebar.cursor(), 0);
        for _ in 0..40 {
            sidebar.down();
        }
        assert_eq!(sidebar.cursor(), TabId::ALL.len() - 1);
        sidebar.follow(TabId::Rdf);
        assert_eq!(TabId::ALL[sidebar.cursor()], TabId::Rdf);
    }
}
