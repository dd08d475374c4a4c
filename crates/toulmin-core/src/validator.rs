//! # Structural Validator
//!
//! Decides whether a graph is a well-formed argumentation structure.
//!
//! Three independent checks run over one graph snapshot:
//! - **Cycles**: depth-first search with an explicit recursion stack, started
//!   from every unvisited node so disjoint arguments are all covered.
//! - **Orphans**: isolated nodes, and non-Claim nodes from which no Claim can
//!   be reached (equivalently: not reachable from any Claim by walking
//!   relations backward).
//! - **Relation types**: every relation must match the compatibility table in
//!   [`RelationType::endpoints`].
//!
//! Defects are reported as values, never as errors. All functions are pure.

use crate::graph::GraphStore;
use crate::{Direction, NodeId, NodeKind, RelationId, RelationType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Message for a graph without defects.
pub const GRAPH_VERIFIED: &str = "Graph structure verified successfully";

/// Message for a single argument without defects.
pub const ARGUMENT_VERIFIED: &str = "Argument structure verified successfully";

/// Message when the requested argument root does not exist.
pub const ARGUMENT_NOT_FOUND: &str = "Argument not found";

/// Prefix of the defect summary for a whole graph.
pub const GRAPH_INVALID: &str = "Graph structure invalid";

/// Prefix of the defect summary for a single argument.
pub const ARGUMENT_INVALID: &str = "Argument structure invalid";

/// Outcome messages for one verification scope.
struct Messages {
    verified: &'static str,
    invalid: &'static str,
}

const GRAPH_MESSAGES: Messages = Messages {
    verified: GRAPH_VERIFIED,
    invalid: GRAPH_INVALID,
};

const ARGUMENT_MESSAGES: Messages = Messages {
    verified: ARGUMENT_VERIFIED,
    invalid: ARGUMENT_INVALID,
};

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A relation whose endpoint kinds do not match its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRelation {
    pub relation: RelationId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
}

/// Outcome of a structural verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub has_cycles: bool,
    /// Orphaned node ids in insertion order.
    pub orphaned_nodes: Vec<NodeId>,
    /// Incompatible relations in insertion order.
    pub invalid_relations: Vec<InvalidRelation>,
    /// First cycle found, closing node repeated at the end. Empty if acyclic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<NodeId>,
    pub message: String,
}

impl VerificationResult {
    /// Result for an argument root that does not exist.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            is_valid: false,
            has_cycles: false,
            orphaned_nodes: Vec::new(),
            invalid_relations: Vec::new(),
            cycle: Vec::new(),
            message: ARGUMENT_NOT_FOUND.to_string(),
        }
    }

    fn assemble(
        cycle: Option<Vec<NodeId>>,
        orphaned_nodes: Vec<NodeId>,
        invalid_relations: Vec<InvalidRelation>,
        messages: &Messages,
    ) -> Self {
        let has_cycles = cycle.is_some();
        let is_valid = !has_cycles && orphaned_nodes.is_empty() && invalid_relations.is_empty();
        let cycle = cycle.unwrap_or_default();
        let message = if is_valid {
            messages.verified.to_string()
        } else {
            defect_summary(messages.invalid, &cycle, &orphaned_nodes, &invalid_relations)
        };

        Self {
            is_valid,
            has_cycles,
            orphaned_nodes,
            invalid_relations,
            cycle,
            message,
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Verify the whole graph.
#[must_use]
pub fn verify<G: GraphStore>(graph: &G) -> VerificationResult {
    let scope: Vec<&NodeId> = graph.all_nodes().iter().map(|n| &n.id).collect();
    let members: BTreeSet<&NodeId> = scope.iter().copied().collect();
    run(graph, &scope, &members, &GRAPH_MESSAGES)
}

/// Verify the single argument rooted at `claim`.
///
/// The argument is the claim plus every node from which it can be reached.
/// Relations leaving that set are ignored. An unknown id, or an id that is
/// not a Claim, yields [`VerificationResult::not_found`].
#[must_use]
pub fn verify_argument<G: GraphStore>(graph: &G, claim: &NodeId) -> VerificationResult {
    let Some(root) = graph.node(claim).filter(|n| n.kind == NodeKind::Claim) else {
        return VerificationResult::not_found();
    };

    let members = reach_backward(graph, std::iter::once(&root.id), None);
    let scope: Vec<&NodeId> = graph
        .all_nodes()
        .iter()
        .map(|n| &n.id)
        .filter(|id| members.contains(id))
        .collect();
    run(graph, &scope, &members, &ARGUMENT_MESSAGES)
}

fn run<'g, G: GraphStore>(
    graph: &'g G,
    scope: &[&'g NodeId],
    members: &BTreeSet<&'g NodeId>,
    messages: &Messages,
) -> VerificationResult {
    let cycle = find_cycle(graph, scope, members);
    let orphans = orphaned_nodes(graph, scope, members);
    let invalid = invalid_relations(graph, members);
    VerificationResult::assemble(cycle, orphans, invalid, messages)
}

// =============================================================================
// CYCLE DETECTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Depth-first search for a back-edge, O(V+E).
///
/// Roots are tried in `scope` order; edges to nodes outside `members` are
/// skipped. Returns the nodes on the cycle, with the closing node repeated.
pub fn find_cycle<'g, G: GraphStore>(
    graph: &'g G,
    scope: &[&'g NodeId],
    members: &BTreeSet<&'g NodeId>,
) -> Option<Vec<NodeId>> {
    let mut marks: BTreeMap<&NodeId, Mark> = BTreeMap::new();

    for &root in scope {
        if marks.contains_key(root) {
            continue;
        }

        // Frames are (node, index of the next outgoing relation to follow).
        let mut stack: Vec<(&NodeId, usize)> = vec![(root, 0)];
        marks.insert(root, Mark::OnStack);

        while let Some(&(node, cursor)) = stack.last() {
            let outgoing = graph.relations_of(node, Direction::Outgoing);
            let Some(&rid) = outgoing.get(cursor) else {
                marks.insert(node, Mark::Done);
                stack.pop();
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 = cursor.saturating_add(1);
            }

            let Some(relation) = graph.relation(rid) else {
                continue;
            };
            let next = &relation.target;
            if !members.contains(next) {
                continue;
            }

            match marks.get(next) {
                Some(Mark::OnStack) => {
                    let start = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                    let mut cycle: Vec<NodeId> =
                        stack[start..].iter().map(|(n, _)| (*n).clone()).collect();
                    cycle.push(next.clone());
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(next, Mark::OnStack);
                    stack.push((next, 0));
                }
            }
        }
    }

    None
}

// =============================================================================
// ORPHAN DETECTION
// =============================================================================

/// Breadth-first walk against relation direction, starting at `roots`.
///
/// With `members`, the walk stays inside that set.
fn reach_backward<'g, G: GraphStore>(
    graph: &'g G,
    roots: impl Iterator<Item = &'g NodeId>,
    members: Option<&BTreeSet<&'g NodeId>>,
) -> BTreeSet<&'g NodeId> {
    let mut reached: BTreeSet<&NodeId> = BTreeSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::new();

    for root in roots {
        if reached.insert(root) {
            queue.push_back(root);
        }
    }

    while let Some(current) = queue.pop_front() {
        for source in graph.neighbors_of(current, Direction::Incoming) {
            if members.is_some_and(|m| !m.contains(source)) {
                continue;
            }
            if reached.insert(source) {
                queue.push_back(source);
            }
        }
    }

    reached
}

/// Orphaned nodes of `scope`, in scope order.
pub fn orphaned_nodes<'g, G: GraphStore>(
    graph: &'g G,
    scope: &[&'g NodeId],
    members: &BTreeSet<&'g NodeId>,
) -> Vec<NodeId> {
    let claims = scope
        .iter()
        .copied()
        .filter(|id| graph.node(id).is_some_and(|n| n.kind == NodeKind::Claim));
    let attached = reach_backward(graph, claims, Some(members));

    scope
        .iter()
        .filter(|id| {
            let isolated = graph.relations_of(id, Direction::Incoming).is_empty()
                && graph.relations_of(id, Direction::Outgoing).is_empty();
            let is_claim = graph.node(id).is_some_and(|n| n.kind == NodeKind::Claim);
            isolated || (!is_claim && !attached.contains(*id))
        })
        .map(|id| (*id).clone())
        .collect()
}

// =============================================================================
// RELATION-TYPE VALIDATION
// =============================================================================

/// Relations inside `members` whose endpoint kinds break the compatibility
/// table, in insertion order.
pub fn invalid_relations<'g, G: GraphStore>(
    graph: &'g G,
    members: &BTreeSet<&'g NodeId>,
) -> Vec<InvalidRelation> {
    graph
        .all_relations()
        .iter()
        .enumerate()
        .filter(|(_, r)| members.contains(&r.source) && members.contains(&r.target))
        .filter(|(_, r)| {
            let kinds = graph.node(&r.source).zip(graph.node(&r.target));
            !kinds.is_some_and(|(s, t)| r.relation_type.accepts(s.kind, t.kind))
        })
        .map(|(index, r)| InvalidRelation {
            relation: RelationId(index),
            source: r.source.clone(),
            target: r.target.clone(),
            relation_type: r.relation_type,
        })
        .collect()
}

// =============================================================================
// MESSAGE
// =============================================================================

fn defect_summary(
    prefix: &str,
    cycle: &[NodeId],
    orphans: &[NodeId],
    invalid: &[InvalidRelation],
) -> String {
    let mut parts = Vec::new();

    if !cycle.is_empty() {
        let path: Vec<&str> = cycle.iter().map(NodeId::as_str).collect();
        parts.push(format!("cycle detected ({})", path.join(" -> ")));
    }
    if !orphans.is_empty() {
        let ids: Vec<&str> = orphans.iter().map(NodeId::as_str).collect();
        parts.push(format!(
            "{} orphaned node(s): {}",
            orphans.len(),
            ids.join(", ")
        ));
    }
    if !invalid.is_empty() {
        let rels: Vec<String> = invalid
            .iter()
            .map(|r| format!("{} {} {}", r.source, r.relation_type, r.target))
            .collect();
        parts.push(format!(
            "{} invalid relation(s): {}",
            invalid.len(),
            rels.join(", ")
        ));
    }

    format!("{prefix}: {}", parts.join("; "))
}

// =============================================================================
// TESTS
// =============================================================================
