//! Block explorer list view

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use super::sample::{short_hash, SampleChain};
use super::ListCursor;
use crate::core::{Action, Panel, PanelProps, PanelRenderError};

pub struct BlockExplorer {
    chain: Arc<SampleChain>,
    cursor: ListCursor,
}

impl BlockExplorer {
    pub fn new(chain: Arc<SampleChain>) -> Self {
        Self {
            chain,
            cursor: ListCursor::default(),
        }
    }

    /// Blocks as listed, newest first
    fn rows(&self) -> impl Iterator<Item = &super::sample::BlockInfo> {
        self.chain.blocks().iter().rev()
    }
}

impl Panel for BlockExplorer {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        _props: &PanelProps,
    ) -> Result<(), PanelRenderError> {
        let items: Vec<ListItem> = self
            .rows()
            .map(|block| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("#{:<10}", block.number),
                        Style::default().fg(Color::LightCyan),
                    ),
                    Span::raw(format!("{}  ", block.timestamp.format("%H:%M:%S"))),
                    Span::styled(
                        format!("{} txs  ", block.tx_count),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(short_hash(&block.hash)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Blocks (enter: details)"),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("-> ");

        let mut state = ListState::default();
        state.select(self.cursor.selected(self.chain.blocks().len()));
        frame.render_stateful_widget(list, area, &mut state);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, props: &PanelProps) -> Action {
        let len = self.chain.blocks().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(len),
            KeyCode::Enter => {
                let picked = self
                    .cursor
                    .selected(len)
                    .and_then(|index| self.rows().nth(index))
                    .map(|block| block.to_ref());
                if let Some(block) = picked {
                    return props.block_select(block);
                }
            }
            _ => {}
        }
        Action::None
    }
}
