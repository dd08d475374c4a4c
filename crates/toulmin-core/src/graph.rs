//! # Graph Store
//!
//! The in-memory argument graph for the Toulmin core.
//!
//! This module implements the `GraphStore` trait. Nodes and relations keep
//! their insertion order so every downstream traversal, report and export is
//! reproducible; id lookups go through `BTreeMap` indexes.

use crate::{Direction, Node, NodeId, NodeKind, Relation, RelationId, ToulminError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The GraphStore trait defines the operations the validator, analyzer and
/// exporter rely on.
///
/// Slices are returned in insertion order. A relation's `RelationId` is its
/// position in `all_relations()`.
pub trait GraphStore {
    /// Insert a node. Fails with `DuplicateId` if the id is taken and with
    /// `EmptyText` if a Claim, Ground or Warrant carries blank text.
    fn add_node(&mut self, node: Node) -> Result<(), ToulminError>;

    /// Insert a relation. Fails with `SelfLoop` or `UnknownEndpoint`.
    fn add_relation(&mut self, relation: Relation) -> Result<RelationId, ToulminError>;

    /// All nodes in insertion order.
    fn all_nodes(&self) -> &[Node];

    /// All relations in insertion order.
    fn all_relations(&self) -> &[Relation];

    /// Lookup a node by id.
    fn node(&self, id: &NodeId) -> Option<&Node>;

    /// Relations touching a node in the given direction, in insertion order.
    fn relations_of(&self, id: &NodeId, direction: Direction) -> &[RelationId];

    /// Lookup a relation by identity.
    fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.all_relations().get(id.index())
    }

    /// Check if a node exists.
    fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Nodes at the other end of this node's relations.
    ///
    /// `Outgoing` yields targets, `Incoming` yields sources. A neighbour
    /// linked twice appears twice.
    fn neighbors_of(&self, id: &NodeId, direction: Direction) -> Vec<&NodeId> {
        self.relations_of(id, direction)
            .iter()
            .filter_map(|rid| self.relation(*rid))
            .map(|relation| match direction {
                Direction::Outgoing => &relation.target,
                Direction::Incoming => &relation.source,
            })
            .collect()
    }

    /// Claim nodes in insertion order. Each one roots an argument.
    fn claims(&self) -> Vec<&Node> {
        self.all_nodes()
            .iter()
            .filter(|node| node.kind == NodeKind::Claim)
            .collect()
    }

    /// Get the total number of nodes.
    fn node_count(&self) -> usize {
        self.all_nodes().len()
    }

    /// Get the total number of relations.
    fn relation_count(&self) -> usize {
        self.all_relations().len()
    }
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// The in-memory graph.
///
/// Holds no durable state: a full reload replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Nodes in insertion order.
    nodes: Vec<Node>,

    /// Reverse lookup: NodeId -> position in `nodes`.
    index: BTreeMap<NodeId, usize>,

    /// Relations in insertion order; the position is the RelationId.
    relations: Vec<Relation>,

    /// Adjacency list keyed by source.
    outgoing: BTreeMap<NodeId, Vec<RelationId>>,

    /// Adjacency list keyed by target.
    incoming: BTreeMap<NodeId, Vec<RelationId>>,

    /// Next argument sequence number handed to the ingestor.
    next_argument: u64,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every node and relation (full reload).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reserve the next argument sequence number.
    pub fn allocate_argument(&mut self) -> u64 {
        let seq = self.next_argument;
        self.next_argument = self.next_argument.saturating_add(1);
        seq
    }

    /// Check whether the graph holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a batch of nodes and relations all-or-nothing.
    ///
    /// Every entry is checked against the current graph and the rest of the
    /// batch before anything is inserted, so a failure leaves the graph
    /// untouched.
    pub fn apply_batch(
        &mut self,
        nodes: Vec<Node>,
        relations: Vec<Relation>,
    ) -> Result<Vec<RelationId>, ToulminError> {
        let mut incoming: BTreeSet<&NodeId> = BTreeSet::new();
        for node in &nodes {
            check_text(node)?;
            if self.index.contains_key(&node.id) || !incoming.insert(&node.id) {
                return Err(ToulminError::DuplicateId(node.id.clone()));
            }
        }
        for relation in &relations {
            if relation.source == relation.target {
                return Err(ToulminError::SelfLoop(relation.source.clone()));
            }
            for endpoint in [&relation.source, &relation.target] {
                if !self.index.contains_key(endpoint) && !incoming.contains(endpoint) {
                    return Err(ToulminError::UnknownEndpoint(endpoint.clone()));
                }
            }
        }

        for node in nodes {
            self.add_node(node)?;
        }
        relations
            .into_iter()
            .map(|relation| self.add_relation(relation))
            .collect()
    }

    /// Build a graph from a snapshot, failing on the first malformed entry.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, ToulminError> {
        let mut graph = Self::new();
        graph.apply_batch(snapshot.nodes, snapshot.relations)?;
        Ok(graph)
    }
}

impl GraphStore for Graph {
    fn add_node(&mut self, node: Node) -> Result<(), ToulminError> {
        check_text(&node)?;
        if self.index.contains_key(&node.id) {
            return Err(ToulminError::DuplicateId(node.id));
        }
        // Keep ingest ids clear of arguments loaded from elsewhere.
        if let Some(seq) = argument_seq(&node.id) {
            self.next_argument = self.next_argument.max(seq.saturating_add(1));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    fn add_relation(&mut self, relation: Relation) -> Result<RelationId, ToulminError> {
        if relation.source == relation.target {
            return Err(ToulminError::SelfLoop(relation.source));
        }
        for endpoint in [&relation.source, &relation.target] {
            if !self.index.contains_key(endpoint) {
                return Err(ToulminError::UnknownEndpoint(endpoint.clone()));
            }
        }

        let id = RelationId(self.relations.len());
        self.outgoing
            .entry(relation.source.clone())
            .or_default()
            .push(id);
        self.incoming
            .entry(relation.target.clone())
            .or_default()
            .push(id);
        self.relations.push(relation);
        Ok(id)
    }

    fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn all_relations(&self) -> &[Relation] {
        &self.relations
    }

    fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).and_then(|&pos| self.nodes.get(pos))
    }

    fn relations_of(&self, id: &NodeId, direction: Direction) -> &[RelationId] {
        let adjacency = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }
}

fn check_text(node: &Node) -> Result<(), ToulminError> {
    if node.kind.requires_text() && node.text.trim().is_empty() {
        return Err(ToulminError::EmptyText(node.id.clone()));
    }
    Ok(())
}

/// The `n` of an `arg-{n}.{component}` id.
fn argument_seq(id: &NodeId) -> Option<u64> {
    let (seq, _) = id.as_str().strip_prefix("arg-")?.split_once('.')?;
    seq.parse().ok()
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

/// Plain-data form of a graph, as handed over by an external collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl From<&Graph> for GraphSnapshot {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes.clone(),
            relations: graph.relations.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelationType;

    fn claim_ground_warrant() -> Graph {
        let mut graph = Graph::new();
        graph
            .add_node(Node::new("c", NodeKind::Claim, "C"))
            .expect("claim");
        graph
            .add_node(Node::new("g", NodeKind::Ground, "G"))
            .expect("ground");
        graph
            .add_node(Node::new("w", NodeKind::Warrant, "W"))
            .expect("warrant");
        graph
            .add_relation(Relation::new("g", "c", RelationType::Supports))
            .expect("supports");
        graph
            .add_relation(Relation::new("w", "c", RelationType::Warrants))
            .expect("warrants");
        graph
    }

    #[test]
    fn add_and_lookup_node() {
        let graph = claim_ground_warrant();
        let node = graph.node(&NodeId::new("g")).expect("lookup");
        assert_eq!(node.kind, NodeKind::Ground);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.relation_count(), 2);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut graph = claim_ground_warrant();
        let result = graph.add_node(Node::new("c", NodeKind::Claim, "again"));
        assert_eq!(result, Err(ToulminError::DuplicateId(NodeId::new("c"))));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn self_loop_rejected() {
        let mut graph = claim_ground_warrant();
        let result = graph.add_relation(Relation::new("c", "c", RelationType::Supports));
        assert_eq!(result, Err(ToulminError::SelfLoop(NodeId::new("c"))));
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let mut graph = claim_ground_warrant();
        let result = graph.add_relation(Relation::new("ghost", "c", RelationType::Supports));
        assert_eq!(
            result,
            Err(ToulminError::UnknownEndpoint(NodeId::new("ghost")))
        );
        let result = graph.add_relation(Relation::new("g", "ghost", RelationType::Supports));
        assert_eq!(
            result,
            Err(ToulminError::UnknownEndpoint(NodeId::new("ghost")))
        );
        assert_eq!(graph.relation_count(), 2);
    }

    #[test]
    fn neighbors_follow_direction_in_insertion_order() {
        let graph = claim_ground_warrant();
        let claim = NodeId::new("c");

        let incoming: Vec<_> = graph
            .neighbors_of(&claim, Direction::Incoming)
            .into_iter()
            .map(NodeId::as_str)
            .collect();
        assert_eq!(incoming, vec!["g", "w"]);

        assert!(graph.neighbors_of(&claim, Direction::Outgoing).is_empty());

        let outgoing: Vec<_> = graph
            .neighbors_of(&NodeId::new("w"), Direction::Outgoing)
            .into_iter()
            .map(NodeId::as_str)
            .collect();
        assert_eq!(outgoing, vec!["c"]);
    }

    #[test]
    fn relation_ids_are_insertion_indexes() {
        let graph = claim_ground_warrant();
        let ids = graph.relations_of(&NodeId::new("c"), Direction::Incoming);
        assert_eq!(ids, &[RelationId(0), RelationId(1)]);
        assert_eq!(
            graph.relation(RelationId(1)).map(|r| r.relation_type),
            Some(RelationType::Warrants)
        );
    }

    #[test]
    fn apply_batch_is_all_or_nothing() {
        let mut graph = claim_ground_warrant();
        let result = graph.apply_batch(
            vec![
                Node::new("c2", NodeKind::Claim, "C2"),
                Node::new("g2", NodeKind::Ground, "G2"),
            ],
            vec![
                Relation::new("g2", "c2", RelationType::Supports),
                Relation::new("x", "c2", RelationType::Supports),
            ],
        );

        assert!(matches!(result, Err(ToulminError::UnknownEndpoint(_))));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.relation_count(), 2);
        assert!(!graph.contains_node(&NodeId::new("c2")));
    }

    #[test]
    fn apply_batch_commits_on_success() {
        let mut graph = Graph::new();
        let ids = graph
            .apply_batch(
                vec![
                    Node::new("c", NodeKind::Claim, "C"),
                    Node::new("q", NodeKind::Qualifier, "probably"),
                ],
                vec![Relation::new("q", "c", RelationType::Qualifies)],
            )
            .expect("batch");
        assert_eq!(ids, vec![RelationId(0)]);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut graph = claim_ground_warrant();
        let _ = graph.allocate_argument();
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.relation_count(), 0);
        assert_eq!(graph.allocate_argument(), 0);
    }

    #[test]
    fn snapshot_roundtrip_preserves_order() {
        let graph = claim_ground_warrant();
        let snapshot = GraphSnapshot::from(&graph);
        let restored = Graph::from_snapshot(snapshot.clone()).expect("restore");

        assert_eq!(GraphSnapshot::from(&restored), snapshot);
    }

    #[test]
    fn blank_required_text_rejected() {
        let snapshot = GraphSnapshot {
            nodes: vec![
                Node::new("c", NodeKind::Claim, ""),
                Node::new("g", NodeKind::Ground, "   "),
                Node::new("w", NodeKind::Warrant, ""),
            ],
            relations: vec![
                Relation::new("g", "c", RelationType::Supports),
                Relation::new("w", "c", RelationType::Warrants),
            ],
        };
        assert_eq!(
            Graph::from_snapshot(snapshot).map(|g| g.node_count()),
            Err(ToulminError::EmptyText(NodeId::new("c")))
        );

        let mut graph = Graph::new();
        assert!(graph.add_node(Node::new("g", NodeKind::Ground, " ")).is_err());
        assert!(graph.add_node(Node::new("b", NodeKind::Backing, "")).is_ok());
    }

    #[test]
    fn apply_batch_rejects_duplicates_within_batch() {
        let mut graph = Graph::new();
        let result = graph.apply_batch(
            vec![
                Node::new("c", NodeKind::Claim, "C"),
                Node::new("c", NodeKind::Claim, "C again"),
            ],
            Vec::new(),
        );
        assert_eq!(result, Err(ToulminError::DuplicateId(NodeId::new("c"))));
        assert!(graph.is_empty());
    }

    #[test]
    fn loaded_argument_ids_advance_the_sequence() {
        let mut graph = Graph::new();
        graph
            .add_node(Node::new("arg-4.claim", NodeKind::Claim, "C"))
            .expect("claim");
        graph
            .add_node(Node::new("arg-x.claim", NodeKind::Claim, "C"))
            .expect("claim");
        assert_eq!(graph.allocate_argument(), 5);
    }

    #[test]
    fn claims_lists_roots() {
        let graph = claim_ground_warrant();
        let claims: Vec<_> = graph.claims().into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(claims, vec!["c"]);
    }
}
