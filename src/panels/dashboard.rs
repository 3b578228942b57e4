//! Dashboard panel - chain overview

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::sample::{short_hash, SampleChain, TxInfo};
use super::ListCursor;
use crate::core::{Action, Panel, PanelProps, PanelRenderError};

const LATEST: usize = 10;

pub struct Dashboard {
    chain: Arc<SampleChain>,
    cursor: ListCursor,
}

impl Dashboard {
    pub fn new(chain: Arc<SampleChain>) -> Self {
        Self {
            chain,
            cursor: ListCursor::default(),
        }
    }

    fn latest_txs(&self) -> impl Iterator<Item = &TxInfo> {
        self.chain.latest_txs(LATEST)
    }

    fn status_line(&self) -> Line<'static> {
        let head = self
            .chain
            .head()
            .map(|block| format!("#{}", block.number))
            .unwrap_or_else(|| "--".to_string());
        let reverted = self
            .chain
            .txs()
            .iter()
            .filter(|tx| tx.status == super::sample::TxStatus::Revert)
            .count();
        Line::from(vec![
            Span::styled("Head ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{head}   ")),
            Span::styled("Blocks ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}   ", self.chain.blocks().len())),
            Span::styled("Txs ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}   ", self.chain.txs().len())),
            Span::styled("Reverted ", Style::default().fg(Color::DarkGray)),
            Span::raw(reverted.to_string()),
        ])
    }
}

impl Panel for Dashboard {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        props: &PanelProps,
    ) -> Result<(), PanelRenderError> {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);

        frame.render_widget(
            Paragraph::new(self.status_line())
                .block(Block::default().borders(Borders::ALL).title("STATUS")),
            rows[0],
        );

        let blocks: Vec<Line> = self
            .chain
            .latest_blocks(LATEST)
            .map(|block| {
                Line::from(vec![
                    Span::styled(
                        format!("#{:<10}", block.number),
                        Style::default().fg(Color::LightCyan),
                    ),
                    Span::raw(format!("{} txs", block.tx_count)),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Text::from(blocks))
                .block(Block::default().borders(Borders::ALL).title("Latest blocks")),
            columns[0],
        );

        let selected_hash = props.transaction.as_ref().map(|tx| tx.hash.as_str());
        let txs: Vec<ListItem> = self
            .latest_txs()
            .map(|tx| {
                let marker = if selected_hash == Some(tx.hash.as_str()) {
                    Span::styled("* ", Style::default().fg(Color::LightCyan))
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    marker,
                    Span::raw(format!("{:<16}", tx.method)),
                    Span::styled(short_hash(&tx.hash), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();
        let len = txs.len();
        let list = List::new(txs)
            .block(Block::default().borders(Borders::ALL).title("Latest transactions"))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("-> ");
        let mut state = ListState::default();
        state.select(self.cursor.selected(len));
        frame.render_stateful_widget(list, columns[1], &mut state);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, props: &PanelProps) -> Action {
        let len = self.latest_txs().count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.down(len),
            KeyCode::Enter => {
                let picked = self
                    .cursor
                    .selected(len)
                    .and_then(|index| self.latest_txs().nth(index))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_selects_latest_transaction() {
        let chain = Arc::new(SampleChain::new(4));
        let mut panel = Dashboard::new(chain.clone());
        let props = PanelProps {
            on_transaction_select: Some(Action::SelectTransaction),
            ..PanelProps::default()
        };
        let expected: Vec<_> = chain.latest_txs(LATEST).map(TxInfo::to_ref).collect();

        assert_eq!(
            panel.handle_key(key(KeyCode::Enter), &props),
            Action::SelectTransaction(expected[0].clone())
        );
        panel.handle_key(key(KeyCode::Down), &props);
        assert_eq!(
            panel.handle_key(key(KeyCode::Enter), &props),
            Action::SelectTransaction(expected[1].clone())
        );
    }

    #[test]
    fn test_enter_without_callback_does_nothing() {
        let mut panel = Dashboard::new(Arc::new(SampleChain::new(4)));
        assert_eq!(
            panel.handle_key(key(KeyCode::Enter), &PanelProps::default()),
            Action::None
        );
    }
}
