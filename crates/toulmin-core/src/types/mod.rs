//! # Core Type Definitions
//!
//! This module contains all core types for the Toulmin argument graph:
//! - Identifiers (`NodeId`, `RelationId`)
//! - Toulmin components (`NodeKind`, `Node`)
//! - Typed links (`RelationType`, `Relation`, `Direction`)
//! - Error types (`ToulminError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` where they serve as map keys (`BTreeMap`/`BTreeSet`)
//! - Render to fixed, locale-independent strings
//! - Carry no floating-point data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique, stable identifier of a node within one graph store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a stored relation: its insertion index in the graph store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RelationId(pub usize);

impl RelationId {
    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// The Toulmin component a node instantiates.
///
/// Serialized by name; parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NodeKind {
    Claim,
    Ground,
    Warrant,
    Backing,
    Rebuttal,
    Qualifier,
}

impl NodeKind {
    /// All kinds, in schema order.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Claim,
        NodeKind::Ground,
        NodeKind::Warrant,
        NodeKind::Backing,
        NodeKind::Rebuttal,
        NodeKind::Qualifier,
    ];

    /// Stable name used in layouts, tooltips and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Claim => "Claim",
            NodeKind::Ground => "Ground",
            NodeKind::Warrant => "Warrant",
            NodeKind::Backing => "Backing",
            NodeKind::Rebuttal => "Rebuttal",
            NodeKind::Qualifier => "Qualifier",
        }
    }

    /// Whether a node of this kind must carry non-empty text.
    #[must_use]
    pub const fn requires_text(self) -> bool {
        matches!(self, NodeKind::Claim | NodeKind::Ground | NodeKind::Warrant)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ToulminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ToulminError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for NodeKind {
    type Error = ToulminError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

// =============================================================================
// NODE
// =============================================================================

/// One Toulmin component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within the store.
    pub id: NodeId,
    /// The component this node represents.
    pub kind: NodeKind,
    /// Free-form content.
    pub text: String,
    /// Optional metadata shown on hover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Node {
    /// Create a node without details.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            kind,
            text: text.into(),
            details: None,
        }
    }

    /// Attach hover details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// =============================================================================
// RELATION
// =============================================================================

/// The type of a directed link between two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelationType {
    Supports,
    Warrants,
    Backs,
    Rebuts,
    Qualifies,
}

impl RelationType {
    /// All relation types.
    pub const ALL: [RelationType; 5] = [
        RelationType::Supports,
        RelationType::Warrants,
        RelationType::Backs,
        RelationType::Rebuts,
        RelationType::Qualifies,
    ];

    /// Stable lowercase name, used verbatim as the edge label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RelationType::Supports => "supports",
            RelationType::Warrants => "warrants",
            RelationType::Backs => "backs",
            RelationType::Rebuts => "rebuts",
            RelationType::Qualifies => "qualifies",
        }
    }

    /// The only (source kind, target kind) pair this relation may connect.
    #[must_use]
    pub const fn endpoints(self) -> (NodeKind, NodeKind) {
        match self {
            RelationType::Supports => (NodeKind::Ground, NodeKind::Claim),
            RelationType::Warrants => (NodeKind::Warrant, NodeKind::Claim),
            RelationType::Backs => (NodeKind::Backing, NodeKind::Warrant),
            RelationType::Rebuts => (NodeKind::Rebuttal, NodeKind::Claim),
            RelationType::Qualifies => (NodeKind::Qualifier, NodeKind::Claim),
        }
    }

    /// Check endpoint-kind compatibility.
    #[must_use]
    pub fn accepts(self, source: NodeKind, target: NodeKind) -> bool {
        self.endpoints() == (source, target)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = ToulminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ToulminError::UnknownRelationType(s.to_string()))
    }
}

impl TryFrom<String> for RelationType {
    type Error = ToulminError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RelationType> for String {
    fn from(ty: RelationType) -> Self {
        ty.as_str().to_string()
    }
}

/// A directed, typed link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
}

impl Relation {
    /// Create a new relation.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: RelationType,
    ) -> Self {
        Self {
            source: NodeId::new(source),
            target: NodeId::new(target),
            relation_type,
        }
    }
}

/// Which adjacency list to follow from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Relations whose source is the node.
    Outgoing,
    /// Relations whose target is the node.
    Incoming,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the core.
///
/// Structural defects (cycles, orphans, incompatible relations) are not
/// errors: they are reported through `VerificationResult`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToulminError {
    /// A node with this id is already present.
    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// A relation references a node that does not exist.
    #[error("Unknown relation endpoint: {0}")]
    UnknownEndpoint(NodeId),

    /// A relation links a node to itself.
    #[error("Self-loop on node: {0}")]
    SelfLoop(NodeId),

    /// A submission lacks a required component.
    #[error("Malformed submission: missing required field '{field}'")]
    MalformedSubmission { field: &'static str },

    /// A component text exceeds its length limit.
    #[error("Field '{field}' is {len} characters long, maximum is {max}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Too many submissions in a single ingest batch.
    #[error("Batch of {len} submissions exceeds maximum of {max}")]
    BatchTooLarge { len: usize, max: usize },

    /// A scoring weight is outside 0..=100 percentage points.
    #[error("Invalid scoring weight '{name}': {value} exceeds 100")]
    InvalidWeight { name: &'static str, value: u8 },

    /// A Claim, Ground or Warrant node with blank text.
    #[error("Node {0} requires non-empty text")]
    EmptyText(NodeId),

    /// Unrecognised node kind name.
    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    /// Unrecognised relation type name.
    #[error("Unknown relation type: {0}")]
    UnknownRelationType(String),

    /// Canonical encoding failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// TESTS
// =============================================================================
