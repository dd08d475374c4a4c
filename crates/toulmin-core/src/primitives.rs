//! # Primitives
//!
//! Fixed runtime constants for the Toulmin core.
//!
//! These limits and defaults are compiled into the binary. Anything a
//! deployment may want to tune (scoring weights, label length) is passed in
//! explicitly as a configuration value instead.

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length (in characters) of a claim.
pub const MAX_CLAIM_LENGTH: usize = 500;

/// Maximum length (in characters) of the grounds.
pub const MAX_GROUNDS_LENGTH: usize = 1000;

/// Maximum length (in characters) of a warrant.
pub const MAX_WARRANT_LENGTH: usize = 500;

/// Maximum length (in characters) of backing, rebuttal, qualifier and details.
pub const MAX_OPTIONAL_LENGTH: usize = 1000;

/// Maximum number of submissions in one ingest batch.
///
/// Batches longer than this are rejected as a whole.
pub const MAX_BATCH_SIZE: usize = 10_000;

// =============================================================================
// SCORING DEFAULTS (percentage points)
// =============================================================================

/// Awarded once Claim, Grounds and Warrant are all present.
pub const DEFAULT_BASE_WEIGHT: u8 = 40;

/// Awarded when at least one Backing is attached to the warrant.
pub const DEFAULT_BACKING_WEIGHT: u8 = 20;

/// Awarded when at least one Rebuttal challenges the claim.
pub const DEFAULT_REBUTTAL_WEIGHT: u8 = 20;

/// Awarded when at least one Qualifier limits the claim.
pub const DEFAULT_QUALIFIER_WEIGHT: u8 = 20;

/// Upper bound of a quality score.
pub const MAX_SCORE: u8 = 100;

// =============================================================================
// LAYOUT
// =============================================================================

/// Placeholder rendered in tooltips when a node has no details.
pub const NOT_AVAILABLE: &str = "N/A";

/// Suffix appended to labels cut by the layout exporter.
pub const LABEL_ELLIPSIS: &str = "...";

/// Magic bytes for the canonical layout snapshot header.
pub const LAYOUT_MAGIC: [u8; 4] = *b"TLAY";

/// Canonical layout snapshot format version.
pub const LAYOUT_VERSION: u8 = 1;
