//! Panel registry: which panel a tab shows

use std::fmt;

use crate::core::TabId;

/// One distinct panel implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelRef {
    Dashboard,
    BlockExplorer,
    /// Only reachable by drilling down from the block explorer
    BlockDetails,
    Transactions,
    Search,
    Traceability,
    Items,
    KnowledgeGraph,
    Timeline,
    Participants,
    Analytics,
    SparqlQuery,
    QueryBuilder,
    Ontology,
    Rdf,
    Provenance,
}

impl PanelRef {
    pub const ALL: [PanelRef; 16] = [
        PanelRef::Dashboard,
        PanelRef::BlockExplorer,
        PanelRef::BlockDetails,
        PanelRef::Transactions,
        PanelRef::Search,
        PanelRef::Traceability,
        PanelRef::Items,
        PanelRef::KnowledgeGraph,
        PanelRef::Timeline,
        PanelRef::Participants,
        PanelRef::Analytics,
        PanelRef::SparqlQuery,
        PanelRef::QueryBuilder,
        PanelRef::Ontology,
        PanelRef::Rdf,
        PanelRef::Provenance,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PanelRef::Dashboard => "Dashboard",
            PanelRef::BlockExplorer => "Block Explorer",
            PanelRef::BlockDetails => "Block Details",
            PanelRef::Transactions => "Transactions",
            PanelRef::Search => "Search",
            PanelRef::Traceability => "Traceability",
            PanelRef::Items => "Items",
            PanelRef::KnowledgeGraph => "Knowledge Graph",
            PanelRef::Timeline => "Timeline",
            PanelRef::Participants => "Participants",
            PanelRef::Analytics => "Analytics",
            PanelRef::SparqlQuery => "SPARQL Query",
            PanelRef::QueryBuilder => "Query Builder",
            PanelRef::Ontology => "Ontology",
            PanelRef::Rdf => "RDF",
            PanelRef::Provenance => "Provenance",
        }
    }

    /// Config-facing name (`[panels] fail = ["sparql-query"]`)
    pub fn slug(&self) -> &'static str {
        match self {
            PanelRef::Dashboard => "dashboard",
            PanelRef::BlockExplorer => "block-explorer",
            PanelRef::BlockDetails => "block-details",
            PanelRef::Transactions => "transactions",
            PanelRef::Search => "search",
            PanelRef::Traceability => "traceability",
            PanelRef::Items => "items",
            PanelRef::KnowledgeGraph => "knowledge-graph",
            PanelRef::Timeline => "timeline",
            PanelRef::Participants => "participants",
            PanelRef::Analytics => "analytics",
            PanelRef::SparqlQuery => "sparql-query",
            PanelRef::QueryBuilder => "query-builder",
            PanelRef::Ontology => "ontology",
            PanelRef::Rdf => "rdf",
            PanelRef::Provenance => "provenance",
        }
    }

    pub fn from_slug(value: &str) -> Option<PanelRef> {
        let value = value.trim().to_lowercase();
        PanelRef::ALL
            .into_iter()
            .find(|panel| panel.slug() == value)
    }
}

impl fmt::Display for PanelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Map a tab to its panel. An alias is one more pattern in an arm.
pub fn resolve(tab: TabId) -> PanelRef {
    match tab {
        TabId::Dashboard => PanelRef::Dashboard,
        TabId::Explorer | TabId::Blocks => PanelRef::BlockExplorer,
        TabId::Transactions => PanelRef::Transactions,
        TabId::Search => PanelRef::Search,
        TabId::Traceability => PanelRef::Traceability,
        TabId::Items => PanelRef::Items,
        TabId::KnowledgeGraph => PanelRef::KnowledgeGraph,
        TabId::Timeline => PanelRef::Timeline,
        TabId::Participants => PanelRef::Participants,
        TabId::Analytics => PanelRef::Analytics,
        TabId::Semantic | TabId::Sparql | TabId::Queries => PanelRef::SparqlQuery,
        TabId::QueryBuilder => PanelRef::QueryBuilder,
        TabId::Ontology => PanelRef::Ontology,
        TabId::Rdf => PanelRef::Rdf,
        TabId::Provenance => PanelRef::Provenance,
    }
}

/// Resolve a raw identifier; unknown strings land on the dashboard
pub fn resolve_str(raw: &str) -> PanelRef {
    resolve(TabId::coerce(raw))
}

/// Tabs that show `panel`, in sidebar order
pub fn aliases(panel: PanelRef) -> Vec<TabId> {
    TabId::ALL
        .into_iter()
        .filter(|tab| resolve(*tab) == panel)
        .collect()
}
