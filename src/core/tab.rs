//! Tab identifiers
//!
//! The navigation sidebar and the command bar speak in raw strings; everything
//! past [`TabId::coerce`] works with the closed enum.

use std::fmt;
use std::str::FromStr;

/// Every tab the shell knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TabId {
    Dashboard,
    Explorer,
    Blocks,
    Transactions,
    Search,
    Traceability,
    Items,
    KnowledgeGraph,
    Timeline,
    Participants,
    Analytics,
    Semantic,
    Sparql,
    QueryBuilder,
    Ontology,
    Rdf,
    Provenance,
    Queries,
}

impl TabId {
    pub const ALL: [TabId; 18] = [
        TabId::Dashboard,
        TabId::Explorer,
        TabId::Blocks,
        TabId::Transactions,
        TabId::Search,
        TabId::Traceability,
        TabId::Items,
        TabId::KnowledgeGraph,
        TabId::Timeline,
        TabId::Participants,
        TabId::Analytics,
        TabId::Semantic,
        TabId::Sparql,
        TabId::QueryBuilder,
        TabId::Ontology,
        TabId::Rdf,
        TabId::Provenance,
        TabId::Queries,
    ];

    /// Wire name, as emitted by the navigation sidebar
    pub fn as_str(&self) -> &'static str {
        match self {
            TabId::Dashboard => "dashboard",
            TabId::Explorer => "explorer",
            TabId::Blocks => "blocks",
            TabId::Transactions => "transactions",
            TabId::Search => "search",
            TabId::Traceability => "traceability",
            TabId::Items => "items",
            TabId::KnowledgeGraph => "knowledge-graph",
            TabId::Timeline => "timeline",
            TabId::Participants => "participants",
            TabId::Analytics => "analytics",
            TabId::Semantic => "semantic",
            TabId::Sparql => "sparql",
            TabId::QueryBuilder => "query-builder",
            TabId::Ontology => "ontology",
            TabId::Rdf => "rdf",
            TabId::Provenance => "provenance",
            TabId::Queries => "queries",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TabId::Dashboard => "Dashboard",
            TabId::Explorer => "Explorer",
            TabId::Blocks => "Blocks",
            TabId::Transactions => "Transactions",
            TabId::Search => "Search",
            TabId::Traceability => "Traceability",
            TabId::Items => "Items",
            TabId::KnowledgeGraph => "Knowledge Graph",
            TabId::Timeline => "Timeline",
            TabId::Participants => "Participants",
            TabId::Analytics => "Analytics",
            TabId::Semantic => "Semantic",
            TabId::Sparql => "SPARQL",
            TabId::QueryBuilder => "Query Builder",
            TabId::Ontology => "Ontology",
            TabId::Rdf => "RDF",
            TabId::Provenance => "Provenance",
            TabId::Queries => "Queries",
        }
    }

    /// Number key bound to the tab in the sidebar, if any
    pub fn shortcut(&self) -> Option<char> {
        let index = TabId::ALL.iter().position(|tab| tab == self)?;
        char::from_digit(index as u32 + 1, 10)
    }

    pub fn from_shortcut(key: char) -> Option<TabId> {
        let digit = key.to_digit(10)?;
        if digit == 0 {
            return None;
        }
        TabId::ALL.get(digit as usize - 1).copied()
    }

    /// Whether the tab shows the block explorer and so supports drill-down
    pub fn is_block_explorer(&self) -> bool {
        matches!(self, TabId::Explorer | TabId::Blocks)
    }

    /// Parse a raw identifier, falling back to the dashboard.
    pub fn coerce(raw: &str) -> TabId {
        match raw.parse() {
            Ok(tab) => tab,
            Err(err) => {
                tracing::debug!(%err, "coercing unknown tab to dashboard");
                TabId::Dashboard
            }
        }
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab identifier: {0:?}")]
pub struct UnknownTab(pub String);

impl FromStr for TabId {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let tab = match normalized.as_str() {
            "dashboard" => TabId::Dashboard,
            "explorer" => TabId::Explorer,
            "blocks" => TabId::Blocks,
            "transactions" => TabId::Transactions,
            "search" => TabId::Search,
            "traceability" => TabId::Traceability,
            "items" => TabId::Items,
            "knowledgegraph" => TabId::KnowledgeGraph,
            "timeline" => TabId::Timeline,
            "participants" => TabId::Participants,
            "analytics" => TabId::Analytics,
            "semantic" => TabId::Semantic,
            "sparql" => TabId::Sparql,
            "querybuilder" => TabId::QueryBuilder,
            "ontology" => TabId::Ontology,
            "rdf" => TabId::Rdf,
            "provenance" => TabId::Provenance,
            "queries" => TabId::Queries,
            _ => return Err(UnknownTab(s.to_string())),
        };
        Ok(tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for tab in TabId::ALL {
            assert_eq!(tab.as_str().parse::<TabId>(), Ok(tab));
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_separators() {
        assert_eq!("Knowledge_Graph".parse::<TabId>(), Ok(TabId::KnowledgeGraph));
        assert_eq!(" QUERY-BUILDER ".parse::<TabId>(), Ok(TabId::QueryBuilder));
        assert_eq!("querybuilder".parse::<TabId>(), Ok(TabId::QueryBuilder));
    }

    #[test]
    fn test_coerce_unknown() {
        assert_eq!(TabId::coerce("not-a-tab"), TabId::Dashboard);
        assert_eq!(TabId::coerce(""), TabId::Dashboard);
        assert_eq!(TabId::coerce("sparql"), TabId::Sparql);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(TabId::Dashboard.shortcut(), Some('1'));
        assert_eq!(TabId::Analytics.shortcut(), None);
        assert_eq!(TabId::from_shortcut('2'), Some(TabId::Explorer));
        assert_eq!(TabId::from_shortcut('0'), None);
    }
}
