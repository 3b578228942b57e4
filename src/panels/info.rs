//! Informational panel used by the tabs without a dedicated view

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::core::{Panel, PanelProps, PanelRenderError};
use crate::router::{aliases, PanelRef};

pub struct InfoPanel {
    panel: PanelRef,
}

impl InfoPanel {
    pub fn new(panel: PanelRef) -> Self {
        Self { panel }
    }

    fn description(&self) -> &'static str {
        match self.panel {
            PanelRef::Search => "Look up blocks, transactions and items by identifier.",
            PanelRef::Traceability => "Follow an item through the supply chain events that touched it.",
            PanelRef::Items => "Registered items and their current custody.",
            PanelRef::KnowledgeGraph => "Entities and relations extracted from on-chain records.",
            PanelRef::Timeline => "Chronological view of recorded events.",
            PanelRef::Participants => "Organisations and accounts taking part in the network.",
            PanelRef::Analytics => "Aggregate statistics over blocks and transactions.",
            PanelRef::SparqlQuery => "Run SPARQL queries against the semantic store.",
            PanelRef::QueryBuilder => "Compose queries without writing SPARQL by hand.",
            PanelRef::Ontology => "Classes and properties of the domain ontology.",
            PanelRef::Rdf => "Raw RDF triples attached to blocks.",
            PanelRef::Provenance => "Who recorded what, and when.",
            PanelRef::Dashboard
            | PanelRef::BlockExplorer
            | PanelRef::BlockDetails
            | PanelRef::Transactions => "",
        }
    }
}

impl Panel for InfoPanel {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        props: &PanelProps,
    ) -> Result<(), PanelRenderError> {
        let tabs = aliases(self.panel)
            .iter()
            .map(|tab| tab.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![
            Line::from(Span::styled(
                self.panel.title(),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(self.description()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Tabs      ", Style::default().fg(Color::DarkGray)),
                Span::raw(tabs),
            ]),
        ];
        if let Some(tx) = props.transaction.as_ref() {
            lines.push(Line::from(vec![
                Span::styled("Selected  ", Style::default().fg(Color::DarkGray)),
                Span::raw(tx.hash.clone()),
            ]));
        }

        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title(self.panel.title()))
                .wrap(Wrap { trim: true }),
            area,
        );
        Ok(())
    }
}
