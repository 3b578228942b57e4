//! Transaction list

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use super::sample::{short_hash, SampleChain, TxInfo, TxStatus};
use super::ListCursor;
use crate::core::{Action, Panel, PanelProps, PanelRenderError};

pub struct Transactions {
    chain: Arc<SampleChain>,
    cursor: ListCursor,
}

impl Transactions {
    pub fn new(chain: Arc<SampleChain>) -> Self {
        Self {
            chain,
            cursor: ListCursor::default(),
        }
    }

    fn rows(&self) -> impl Iterator<Item = &TxInfo> {
        self.chain.txs().iter().rev()
    }
}

impl Panel for Transactions {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        props: &PanelProps,
    ) -> Result<(), PanelRenderError> {
        let selected_hash = props.transaction.as_ref().map(|tx| tx.hash.as_str());
        let items: Vec<ListItem> = self
            .rows()
            .map(|tx| {
                let status = match tx.status {
                    TxStatus::Success => Span::styled("ok  ", Style::default().fg(Color::Green)),
                    TxStatus::Revert => Span::styled("rev ", Style::default().fg(Color::Red)),
                };
                let marker = if selected_hash == Some(tx.hash.as_str()) {
                    Span::styled("* ", Style::default().fg(Color::LightCyan))
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    marker,
                    status,
                    Span::styled(
                        format!("#{:<10}", tx.block_number),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!("{:<16}", tx.method)),
                    Span::raw(format!("{:>6.2} ", tx.value)),
                    Span::raw(short_hash(&tx.hash)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Transactions"))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("-> ");
        let mut state = ListState::default();
        state.select(self.cursor.selected(self.chain.txs().len()));
        frame.render_stateful_widget(list, area, &mut state);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, props: &PanelProps) -> Action {
        let len = self.chain.txs().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(len),
            KeyCode::Enter => {
                let picked = self
                    .cursor
                    .selected(len)
                    .and_then(|index| self.rows().nth(index))
                    .map(TxInfo::to_ref);
                if let Some(tx) = picked {
                    return props.transaction_select(tx);
                }
            }
            _ => {}
        }
        Action::None
    }
}
