//! # toulmin-core
//!
//! The Argument Graph Model & Consistency Verification Engine.
//!
//! Arguments follow Toulmin's schema (Claim, Grounds, Warrant, Backing,
//! Rebuttal, Qualifier) and are stored as typed nodes joined by typed,
//! directed relations. On top of that store this crate provides:
//! - structural verification (cycles, orphans, relation-type compatibility)
//! - per-argument quality scoring with structural improvement hints
//! - export to a renderer-neutral layout
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO network, NO file I/O, NO logging
//! - Deterministic: insertion order everywhere, `BTreeMap` indexes
//! - Integer arithmetic only; scores become `f64` at the boundary
//! - Synchronous: one graph snapshot per call, no internal locking

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod ingestor;
pub mod layout;
pub mod primitives;
pub mod quality;
pub mod types;
pub mod validator;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Direction, Node, NodeId, NodeKind, Relation, RelationId, RelationType, ToulminError};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use graph::{Graph, GraphSnapshot, GraphStore};
pub use ingestor::{ArgumentPlan, Ingestor, Submission};
pub use layout::{LayoutEdge, LayoutGraph, LayoutHeader, LayoutNode, LayoutOptions, export_layout};
pub use quality::{
    Analysis, Argument, ClaimSuggestions, ImprovementReport, MissingComponent, QualityScore,
    ScoringWeights, StructuralOnly, SuggestionSource, analyze, analyze_claim, analyze_graph,
};
pub use validator::{InvalidRelation, VerificationResult, verify, verify_argument};
