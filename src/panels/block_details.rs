//! Block details, shown when a block is picked on an explorer tab

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::sample::{short_hash, SampleChain, TxStatus};
use super::ListCursor;
use crate::core::{Action, Panel, PanelProps, PanelRenderError};

pub struct BlockDetails {
    chain: Arc<SampleChain>,
    cursor: ListCursor,
}

impl BlockDetails {
    pub fn new(chain: Arc<SampleChain>) -> Self {
        Self {
            chain,
            cursor: ListCursor::default(),
        }
    }
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

impl Panel for BlockDetails {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        props: &PanelProps,
    ) -> Result<(), PanelRenderError> {
        let selected = props.block.as_ref().ok_or(PanelRenderError::MissingBlock)?;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(area);

        let header = match self.chain.block(selected.number) {
            Some(block) => Text::from(vec![
                field("Number", block.number.to_string()),
                field("Hash", block.hash.clone()),
                field("Parent", short_hash(&block.parent_hash)),
                field("Time", block.timestamp.to_rfc3339()),
                field("Gas used", block.gas_used.to_string()),
                field("Miner", block.miner.clone()),
            ]),
            // Not in the sample window: show what the selection carries
            None => Text::from(vec![
                field("Number", selected.number.to_string()),
                field("Hash", selected.hash.clone()),
                Line::from(Span::styled(
                    "Block is outside the loaded range",
                    Style::default().fg(Color::Yellow),
                )),
            ]),
        };
        let title = format!("Block {selected} (esc: back)");
        frame.render_widget(
            Paragraph::new(header).block(Block::default().borders(Borders::ALL).title(title)),
            chunks[0],
        );

        let items: Vec<ListItem> = self
            .chain
            .txs_in_block(selected.number)
            .map(|tx| {
                let status = match tx.status {
                    TxStatus::Success => Span::styled("ok  ", Style::default().fg(Color::Green)),
                    TxStatus::Revert => Span::styled("rev ", Style::default().fg(Color::Red)),
                };
                let highlighted = props
                    .transaction
                    .as_ref()
                    .map(|t| t.hash == tx.hash)
                    .unwrap_or(false);
                let style = if highlighted {
                    Style::default().fg(Color::LightCyan)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    status,
                    Span::raw(format!("{:<16}", tx.method)),
                    Span::raw(short_hash(&tx.hash)),
                ]))
                .style(style)
            })
            .collect();
        let len = items.len();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Transactions"))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("-> ");
        let mut state = ListState::default();
        state.select(self.cursor.selected(len));
        frame.render_stateful_widget(list, chunks[1], &mut state);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, props: &PanelProps) -> Action {
        let Some(block) = props.block.as_ref() else {
            return Action::None;
        };
        let len = self.chain.txs_in_block(block.number).count();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.cursor = ListCursor::default();
                return props.back();
            }
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(len),
            KeyCode::Enter => {
                let picked = self
                    .cursor
                    .selected(len)
                    .and_then(|index| self.chain.txs_in_block(block.number).nth(index))
                    .map(|tx| tx.to_ref());
                if let Some(tx) = picked {
                    return props.transaction_select(tx);
                }
            }
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_render_without_block_is_an_error() {
        let panel = BlockDetails::new(Arc::new(SampleChain::new(2)));
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut result = Ok(());
        terminal
            .draw(|f| {
                let area = f.size();
                result = panel.render(f, area, &PanelProps::default());
            })
            .unwrap();
        assert_eq!(result, Err(PanelRenderError::MissingBlock));
    }

    #[test]
    fn test_back_and_transaction_callbacks() {
        let chain = Arc::new(SampleChain::new(2));
        let head = chain.head().unwrap().to_ref();
        let mut panel = BlockDetails::new(chain.clone());
        let props = PanelProps {
            block: Some(head.clone()),
            on_back: Some(|| Action::Back),
            on_transaction_select: Some(Action::SelectTransaction),
            ..PanelProps::default()
        };

        let first_tx = chain.txs_in_block(head.number).next().unwrap().to_ref();
        assert_eq!(
            panel.handle_key(key(KeyCode::Enter), &props),
            Action::SelectTransaction(first_tx)
        );
        assert_eq!(panel.handle_key(key(KeyCode::Esc), &props), Action::Back);
    }
}
