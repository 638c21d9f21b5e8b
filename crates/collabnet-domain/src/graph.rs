//! Collaboration graph module - the undirected simple graph for one year

use crate::RelationTable;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// Adjacency mapping for one year: author -> collaborators listed in their row
///
/// Only authors with at least one collaborator (other than themselves) appear.
pub type YearMapping<'a> = BTreeMap<&'a str, Vec<&'a str>>;

/// Extract the adjacency mapping for `year` from the relation table
///
/// Rows whose cell is empty are excluded entirely, so they never introduce
/// isolated nodes. Self references are dropped before the emptiness check.
pub fn year_mapping(table: &RelationTable, year: i32) -> YearMapping<'_> {
    let mut mapping = YearMapping::new();

    for row in table.rows() {
        let collaborators: Vec<&str> = row
            .collaborators(year)
            .iter()
            .map(String::as_str)
            .filter(|name| *name != row.author)
            .collect();

        if collaborators.is_empty() {
            continue;
        }

        mapping
            .entry(row.author.as_str())
            .or_default()
            .extend(collaborators);
    }

    mapping
}

/// Undirected simple collaboration graph
///
/// Nodes are author names held in a petgraph [`UnGraph`], with a name index
/// kept alongside it. An edge listed by both endpoints, or by only one of
/// them, is materialized exactly once. No self-loops.
///
/// Built once per year and not mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct CollaborationGraph {
    /// The underlying petgraph structure
    graph: UnGraph<String, ()>,

    /// Author name -> node index
    index: BTreeMap<String, NodeIndex>,
}

impl CollaborationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for `year` from the relation table
    ///
    /// An edge `(a, b)` is added whenever `a` lists `b`, regardless of whether
    /// `b` lists `a`. Collaborators without a row of their own still become
    /// nodes as edge endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use collabnet_domain::{CollaborationGraph, RelationTable, TemporalRelationRow, YearRange};
    ///
    /// let mut table = RelationTable::new(YearRange::new(2000, 2000));
    /// let mut row = TemporalRelationRow::new("A");
    /// row.set(2000, vec!["B".to_string()]);
    /// table.push(row);
    ///
    /// let graph = CollaborationGraph::for_year(&table, 2000);
    /// assert_eq!(graph.node_count(), 2);
    /// assert!(graph.contains_edge("B", "A"));
    /// ```
    pub fn for_year(table: &RelationTable, year: i32) -> Self {
        Self::from_mapping(&year_mapping(table, year))
    }

    /// Build a graph from an adjacency mapping
    pub fn from_mapping(mapping: &YearMapping<'_>) -> Self {
        let mut graph = Self::new();
        for (author, collaborators) in mapping {
            for collaborator in collaborators {
                graph.add_edge(author, collaborator);
            }
        }
        graph
    }

    /// Add an undirected edge, creating endpoint nodes as needed
    ///
    /// Returns `false` for self-loops and for edges already present.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }

        let (ia, ib) = (self.node(a), self.node(b));
        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }

        self.graph.add_edge(ia, ib, ());
        true
    }

    /// Node index for `name`, adding the node when it is new
    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Node names in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Edges as canonical `(lo, hi)` pairs in ascending order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|edge| {
                let a = self.graph[edge.source()].as_str();
                let b = self.graph[edge.target()].as_str();
                if a < b {
                    (a, b)
                } else {
                    (b, a)
                }
            })
            .collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }

    /// Whether the node exists
    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether the undirected edge exists (argument order does not matter)
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Degree of a node (0 when absent)
    pub fn degree(&self, name: &str) -> usize {
        self.index
            .get(name)
            .map_or(0, |&idx| self.graph.neighbors(idx).count())
    }

    /// `(node, degree)` pairs in node order
    pub fn degrees(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index
            .iter()
            .map(|(name, &idx)| (name.as_str(), self.graph.neighbors(idx).count()))
    }
}

/// Graphs are equal when they have the same names and the same edges,
/// whatever order the nodes were inserted in
impl PartialEq for CollaborationGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes().eq(other.nodes()) && self.edges().eq(other.edges())
    }
}

impl Eq for CollaborationGraph {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TemporalRelationRow, YearRange};

    fn row(author: &str, cells: &[(i32, &[&str])]) -> TemporalRelationRow {
        let mut row = TemporalRelationRow::new(author);
        for (year, names) in cells {
            row.set(*year, names.iter().map(|s| s.to_string()).collect());
        }
        row
    }

    /// The four-author scenario used throughout the test suite
    fn scenario_table() -> RelationTable {
        let mut table = RelationTable::new(YearRange::new(2000, 2001));
        table.push(row("A", &[(2000, &["B", "C"]), (2001, &["B", "C", "D"])]));
        table.push(row("B", &[(2000, &["A"]), (2001, &["A", "D"])]));
        table.push(row("C", &[(2000, &["A"]), (2001, &["A"])]));
        table.push(row("D", &[(2000, &[]), (2001, &["B", "A"])]));
        table
    }

    #[test]
    fn test_scenario_year_2000() {
        let graph = CollaborationGraph::for_year(&scenario_table(), 2000);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("A", "B"), ("A", "C")]);
        assert!(!graph.contains_node("D"));
    }

    #[test]
    fn test_scenario_year_2001() {
        let graph = CollaborationGraph::for_year(&scenario_table(), 2001);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("A", "B"), ("A", "C"), ("A", "D"), ("B", "D")]
        );
        assert_eq!(graph.degree("A"), 3);
        assert_eq!(graph.degree("D"), 2);
    }

    #[test]
    fn test_one_sided_listing_creates_edge() {
        let mut table = RelationTable::new(YearRange::new(2000, 2000));
        table.push(row("A", &[(2000, &["Outsider"])]));

        let graph = CollaborationGraph::for_year(&table, 2000);
        assert!(graph.contains_node("Outsider"));
        assert!(graph.contains_edge("Outsider", "A"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_reference_is_not_a_node() {
        let mut table = RelationTable::new(YearRange::new(2000, 2000));
        table.push(row("A", &[(2000, &["A"])]));

        let graph = CollaborationGraph::for_year(&table, 2000);
        assert!(graph.is_empty());
        assert!(year_mapping(&table, 2000).is_empty());
    }

    #[test]
    fn test_add_edge_rejects_duplicates_and_loops() {
        let mut graph = CollaborationGraph::new();
        assert!(graph.add_edge("A", "B"));
        assert!(!graph.add_edge("B", "A"));
        assert!(!graph.add_edge("A", "A"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut first = CollaborationGraph::new();
        first.add_edge("A", "B");
        first.add_edge("C", "B");

        let mut second = CollaborationGraph::new();
        second.add_edge("B", "C");
        second.add_edge("B", "A");

        assert_eq!(first, second);
        assert_eq!(second.edges().collect::<Vec<_>>(), vec![("A", "B"), ("B", "C")]);
        assert_eq!(second.degree("B"), 2);
        assert!(!second.contains_edge("A", "C"));
    }

    #[test]
    fn test_year_without_column_gives_empty_graph() {
        let graph = CollaborationGraph::for_year(&scenario_table(), 1990);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
