//! # API Request/Response Types
//!
//! JSON structures for the HTTP API. Core results that already carry the
//! wire shape (`VerificationResult`, `LayoutGraph`, `Submission`) are used
//! directly; everything else is defined here.

use serde::{Deserialize, Serialize};
use toulmin_core::{ClaimSuggestions, ImprovementReport, MissingComponent, NodeId, Submission};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// INSERT RESPONSES
// =============================================================================

/// Echo of a stored argument plus its claim id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertArgumentResponse {
    pub claim: String,
    pub grounds: String,
    pub warrant: String,
    pub backing: Option<String>,
    pub rebuttal: Option<String>,
    pub qualifier: Option<String>,
    pub claim_id: NodeId,
    pub message: String,
}

impl InsertArgumentResponse {
    #[must_use]
    pub fn new(submission: Submission, claim_id: NodeId) -> Self {
        Self {
            claim: submission.claim.unwrap_or_default(),
            grounds: submission.grounds.unwrap_or_default(),
            warrant: submission.warrant.unwrap_or_default(),
            backing: submission.backing,
            rebuttal: submission.rebuttal,
            qualifier: submission.qualifier,
            claim_id,
            message: "Argument inserted successfully".to_string(),
        }
    }
}

/// Result of a batch insert or a full reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub claim_ids: Vec<NodeId>,
    pub node_count: usize,
    pub relation_count: usize,
    pub message: String,
}

// =============================================================================
// VERIFICATION REQUEST
// =============================================================================

/// Body of `POST /verify-argument-structure`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyArgumentRequest {
    #[serde(default)]
    pub argument_id: Option<String>,
}

// =============================================================================
// IMPROVEMENT
// =============================================================================

/// Query of `GET /suggest-improvements`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImprovementQuery {
    #[serde(default)]
    pub argument_id: Option<String>,
}

/// Improvement report with the score on the `[0, 1]` scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementResponse {
    pub quality_score: f64,
    pub missing_components: Vec<MissingComponent>,
    pub improvement_suggestions: Vec<ClaimSuggestions>,
    pub external_references: Vec<String>,
    pub message: String,
}

impl From<ImprovementReport> for ImprovementResponse {
    fn from(report: ImprovementReport) -> Self {
        Self {
            quality_score: report.quality_score.as_f64(),
            missing_components: report.missing_components,
            improvement_suggestions: report.improvement_suggestions,
            external_references: report.external_references,
            message: report.message,
        }
    }
}

// =============================================================================
// VISUALIZATION
// =============================================================================

/// Query of `GET /visualize-argument-dag`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutQuery {
    /// Overrides the configured label length for this request.
    #[serde(default)]
    pub max_label_length: Option<usize>,
}
