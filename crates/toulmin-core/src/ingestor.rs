//! # Ingestor Module
//!
//! Submission validation and ingestion protocol for the Toulmin core.
//!
//! - Validate submissions before graph mutation
//! - Reject malformed input as a whole (no partial arguments)
//! - Never deduplicate: every submission becomes a new argument
//! - No semantic inference or enrichment

use crate::graph::Graph;
use crate::primitives::{
    MAX_BATCH_SIZE, MAX_CLAIM_LENGTH, MAX_GROUNDS_LENGTH, MAX_OPTIONAL_LENGTH, MAX_WARRANT_LENGTH,
};
use crate::{Node, NodeId, NodeKind, Relation, RelationType, ToulminError};
use serde::{Deserialize, Serialize};

/// A raw argument as supplied by the gateway.
///
/// Required components are modelled as `Option` so that an absent field can
/// be told apart from a present one and reported precisely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub claim: Option<String>,
    #[serde(default)]
    pub grounds: Option<String>,
    #[serde(default)]
    pub warrant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebuttal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    /// Hover details attached to the claim node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Submission {
    /// Create a submission with the three required components.
    #[must_use]
    pub fn new(
        claim: impl Into<String>,
        grounds: impl Into<String>,
        warrant: impl Into<String>,
    ) -> Self {
        Self {
            claim: Some(claim.into()),
            grounds: Some(grounds.into()),
            warrant: Some(warrant.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_backing(mut self, backing: impl Into<String>) -> Self {
        self.backing = Some(backing.into());
        self
    }

    #[must_use]
    pub fn with_rebuttal(mut self, rebuttal: impl Into<String>) -> Self {
        self.rebuttal = Some(rebuttal.into());
        self
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// The nodes and relations one submission expands into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentPlan {
    pub claim: NodeId,
    pub nodes: Vec<Node>,
    pub relations: Vec<Relation>,
}

/// The Ingestor maps submissions onto the graph store.
///
/// The Ingestor:
/// - Accepts raw submissions from the gateway
/// - Validates required components and length limits
/// - Emits one node per present component and the typed relations linking them
pub struct Ingestor;

impl Ingestor {
    /// Validate a submission without touching any graph.
    ///
    /// Returns `MalformedSubmission` if claim, grounds or warrant is missing
    /// or blank, and `TextTooLong` if any component exceeds its limit.
    pub fn validate(submission: &Submission) -> Result<(), ToulminError> {
        required("claim", submission.claim.as_deref(), MAX_CLAIM_LENGTH)?;
        required("grounds", submission.grounds.as_deref(), MAX_GROUNDS_LENGTH)?;
        required("warrant", submission.warrant.as_deref(), MAX_WARRANT_LENGTH)?;
        optional("backing", submission.backing.as_deref())?;
        optional("rebuttal", submission.rebuttal.as_deref())?;
        optional("qualifier", submission.qualifier.as_deref())?;
        optional("details", submission.details.as_deref())?;
        Ok(())
    }

    /// Expand a validated submission into nodes and relations.
    ///
    /// Node ids are `arg-{seq}.{component}`.
    pub fn plan(seq: u64, submission: &Submission) -> Result<ArgumentPlan, ToulminError> {
        Self::validate(submission)?;

        let id = |component: &str| format!("arg-{seq}.{component}");
        let claim_id = id("claim");

        let mut claim = Node::new(
            claim_id.clone(),
            NodeKind::Claim,
            submission.claim.clone().unwrap_or_default(),
        );
        claim.details = present(submission.details.as_deref()).map(str::to_string);

        let mut nodes = vec![
            claim,
            Node::new(
                id("grounds"),
                NodeKind::Ground,
                submission.grounds.clone().unwrap_or_default(),
            ),
            Node::new(
                id("warrant"),
                NodeKind::Warrant,
                submission.warrant.clone().unwrap_or_default(),
            ),
        ];
        let mut relations = vec![
            Relation::new(id("grounds"), claim_id.clone(), RelationType::Supports),
            Relation::new(id("warrant"), claim_id.clone(), RelationType::Warrants),
        ];

        if let Some(text) = present(submission.backing.as_deref()) {
            nodes.push(Node::new(id("backing"), NodeKind::Backing, text));
            relations.push(Relation::new(
                id("backing"),
                id("warrant"),
                RelationType::Backs,
            ));
        }
        if let Some(text) = present(submission.rebuttal.as_deref()) {
            nodes.push(Node::new(id("rebuttal"), NodeKind::Rebuttal, text));
            relations.push(Relation::new(
                id("rebuttal"),
                claim_id.clone(),
                RelationType::Rebuts,
            ));
        }
        if let Some(text) = present(submission.qualifier.as_deref()) {
            nodes.push(Node::new(id("qualifier"), NodeKind::Qualifier, text));
            relations.push(Relation::new(
                id("qualifier"),
                claim_id.clone(),
                RelationType::Qualifies,
            ));
        }

        Ok(ArgumentPlan {
            claim: NodeId(claim_id),
            nodes,
            relations,
        })
    }

    /// Ingest a single submission. Returns the claim node id.
    pub fn ingest_submission(
        graph: &mut Graph,
        submission: &Submission,
    ) -> Result<NodeId, ToulminError> {
        let mut claims = Self::ingest_batch(graph, std::slice::from_ref(submission))?;
        claims.pop().ok_or(ToulminError::MalformedSubmission { field: "claim" })
    }

    /// Ingest a batch of submissions all-or-nothing.
    ///
    /// Every submission is validated before the graph is touched, and the
    /// expansion is committed through [`Graph::apply_batch`], so on any error
    /// no node or relation is added. Sequence numbers handed out to a failed
    /// batch are not reused.
    ///
    /// Returns the claim node ids in submission order.
    pub fn ingest_batch(
        graph: &mut Graph,
        submissions: &[Submission],
    ) -> Result<Vec<NodeId>, ToulminError> {
        if submissions.len() > MAX_BATCH_SIZE {
            return Err(ToulminError::BatchTooLarge {
                len: submissions.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        for submission in submissions {
            Self::validate(submission)?;
        }

        let mut nodes = Vec::new();
        let mut relations = Vec::new();
        let mut claims = Vec::with_capacity(submissions.len());

        for submission in submissions {
            let seq = graph.allocate_argument();
            let plan = Self::plan(seq, submission)?;
            claims.push(plan.claim);
            nodes.extend(plan.nodes);
            relations.extend(plan.relations);
        }

        graph.apply_batch(nodes, relations)?;
        Ok(claims)
    }

    /// Replace the whole graph with the given submissions (full reload).
    ///
    /// On error the previous graph is kept.
    pub fn reload(graph: &mut Graph, submissions: &[Submission]) -> Result<Vec<NodeId>, ToulminError> {
        let mut fresh = Graph::new();
        let claims = Self::ingest_batch(&mut fresh, submissions)?;
        *graph = fresh;
        Ok(claims)
    }
}

/// A text that counts as present: non-blank.
fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn required(field: &'static str, text: Option<&str>, max: usize) -> Result<(), ToulminError> {
    let text = present(text).ok_or(ToulminError::MalformedSubmission { field })?;
    check_length(field, text, max)
}

fn optional(field: &'static str, text: Option<&str>) -> Result<(), ToulminError> {
    match present(text) {
        Some(text) => check_length(field, text, MAX_OPTIONAL_LENGTH),
        None => Ok(()),
    }
}

fn check_length(field: &'static str, text: &str, max: usize) -> Result<(), ToulminError> {
    let len = text.chars().count();
    if len > max {
        return Err(ToulminError::TextTooLong { field, len, max });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
