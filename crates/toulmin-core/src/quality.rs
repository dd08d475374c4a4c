//! # Quality Analyzer
//!
//! Scores how complete each argument is and lists structural hints.
//!
//! Scores are integer percentage points (`0..=100`). They only become
//! floating-point values at the boundary, through [`QualityScore::as_f64`].

use crate::graph::GraphStore;
use crate::primitives::{
    DEFAULT_BACKING_WEIGHT, DEFAULT_BASE_WEIGHT, DEFAULT_QUALIFIER_WEIGHT,
    DEFAULT_REBUTTAL_WEIGHT, MAX_SCORE,
};
use crate::{Direction, Node, NodeId, NodeKind, ToulminError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// SCORING WEIGHTS
// =============================================================================

/// Scoring policy, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Awarded once Claim, Grounds and Warrant are all present.
    pub base_weight: u8,
    pub backing_weight: u8,
    pub rebuttal_weight: u8,
    pub qualifier_weight: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_weight: DEFAULT_BASE_WEIGHT,
            backing_weight: DEFAULT_BACKING_WEIGHT,
            rebuttal_weight: DEFAULT_REBUTTAL_WEIGHT,
            qualifier_weight: DEFAULT_QUALIFIER_WEIGHT,
        }
    }
}

impl ScoringWeights {
    /// Reject any weight above 100 points.
    pub fn validate(&self) -> Result<(), ToulminError> {
        let named = [
            ("base_weight", self.base_weight),
            ("backing_weight", self.backing_weight),
            ("rebuttal_weight", self.rebuttal_weight),
            ("qualifier_weight", self.qualifier_weight),
        ];
        match named.into_iter().find(|(_, value)| *value > MAX_SCORE) {
            Some((name, value)) => Err(ToulminError::InvalidWeight { name, value }),
            None => Ok(()),
        }
    }
}

/// Completeness score in percentage points, capped at 100.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct QualityScore(u8);

impl QualityScore {
    /// Build a score, saturating at 100.
    #[must_use]
    pub fn from_points(points: u16) -> Self {
        let capped = points.min(u16::from(MAX_SCORE));
        Self(u8::try_from(capped).unwrap_or(MAX_SCORE))
    }

    #[must_use]
    pub const fn points(self) -> u8 {
        self.0
    }

    /// The score on the `[0, 1]` scale.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

// =============================================================================
// ARGUMENT EXTRACTION
// =============================================================================

/// A required component absent from an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MissingComponent {
    Grounds,
    Warrant,
}

/// One claim and the components attached to it through correctly typed
/// relations.
#[derive(Debug, Clone)]
pub struct Argument<'g> {
    pub claim: &'g Node,
    pub grounds: Vec<&'g Node>,
    pub warrants: Vec<&'g Node>,
    /// Backings of any of the warrants, without duplicates.
    pub backings: Vec<&'g Node>,
    pub rebuttals: Vec<&'g Node>,
    pub qualifiers: Vec<&'g Node>,
}

impl<'g> Argument<'g> {
    /// Collect the argument rooted at `claim`.
    ///
    /// Returns `None` if the id is unknown or not a Claim. Relations whose
    /// endpoint kinds do not match their type are ignored.
    pub fn rooted_at<G: GraphStore>(graph: &'g G, claim: &NodeId) -> Option<Self> {
        let root = graph.node(claim).filter(|n| n.kind == NodeKind::Claim)?;
        let mut argument = Self {
            claim: root,
            grounds: Vec::new(),
            warrants: Vec::new(),
            backings: Vec::new(),
            rebuttals: Vec::new(),
            qualifiers: Vec::new(),
        };

        for source in typed_sources(graph, root) {
            match source.kind {
                NodeKind::Ground => argument.grounds.push(source),
                NodeKind::Warrant => argument.warrants.push(source),
                NodeKind::Rebuttal => argument.rebuttals.push(source),
                NodeKind::Qualifier => argument.qualifiers.push(source),
                NodeKind::Claim | NodeKind::Backing => {}
            }
        }

        for warrant in &argument.warrants {
            for backing in typed_sources(graph, *warrant) {
                if !argument.backings.iter().any(|b| b.id == backing.id) {
                    argument.backings.push(backing);
                }
            }
        }

        Some(argument)
    }
}

/// Sources of incoming relations whose type accepts (source, target).
fn typed_sources<'g, G: GraphStore>(graph: &'g G, target: &'g Node) -> Vec<&'g Node> {
    graph
        .relations_of(&target.id, Direction::Incoming)
        .iter()
        .filter_map(|rid| graph.relation(*rid))
        .filter_map(|rel| {
            let source = graph.node(&rel.source)?;
            rel.relation_type
                .accepts(source.kind, target.kind)
                .then_some(source)
        })
        .collect()
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Hints for one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSuggestions {
    /// Claim text.
    pub claim: String,
    pub improvement_suggestions: Vec<String>,
}

/// Analysis of a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub quality_score: QualityScore,
    pub missing_components: Vec<MissingComponent>,
    pub suggestions: Vec<ClaimSuggestions>,
}

const HINT_GROUNDS: &str = "Add grounds: evidence or data that supports the claim.";
const HINT_WARRANT: &str = "Add a warrant explaining why the grounds support the claim.";
const HINT_BACKING: &str = "Add backing that establishes the authority of the warrant.";
const HINT_REBUTTAL: &str = "Consider a rebuttal: conditions under which the claim would not hold.";
const HINT_QUALIFIER: &str = "Add a qualifier stating how strongly the claim is asserted.";
const HINT_COMPLETE: &str = "All Toulmin components are present.";

/// Score one argument and list its structural hints.
#[must_use]
pub fn analyze(argument: &Argument<'_>, weights: &ScoringWeights) -> Analysis {
    let mut missing = Vec::new();
    if argument.grounds.is_empty() {
        missing.push(MissingComponent::Grounds);
    }
    if argument.warrants.is_empty() {
        missing.push(MissingComponent::Warrant);
    }

    let optional = [
        (!argument.backings.is_empty(), weights.backing_weight, HINT_BACKING),
        (!argument.rebuttals.is_empty(), weights.rebuttal_weight, HINT_REBUTTAL),
        (!argument.qualifiers.is_empty(), weights.qualifier_weight, HINT_QUALIFIER),
    ];

    let mut points: u16 = 0;
    if missing.is_empty() {
        points = u16::from(weights.base_weight);
    }
    let mut hints: Vec<String> = missing
        .iter()
        .map(|component| match component {
            MissingComponent::Grounds => HINT_GROUNDS.to_string(),
            MissingComponent::Warrant => HINT_WARRANT.to_string(),
        })
        .collect();

    for (present, weight, hint) in optional {
        if present {
            points = points.saturating_add(u16::from(weight));
        } else {
            hints.push(hint.to_string());
        }
    }
    if hints.is_empty() {
        hints.push(HINT_COMPLETE.to_string());
    }

    Analysis {
        quality_score: QualityScore::from_points(points),
        missing_components: missing,
        suggestions: vec![ClaimSuggestions {
            claim: argument.claim.text.clone(),
            improvement_suggestions: hints,
        }],
    }
}

// =============================================================================
// GRAPH REPORT
// =============================================================================

/// Provider of extra suggestion text for a claim.
///
/// Implementations may wrap a language model or a rule base. The analyzer
/// appends their output after the structural hints.
pub trait SuggestionSource {
    fn suggest(&self, claim: &Node) -> Vec<String>;
}

/// A source that contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralOnly;

impl SuggestionSource for StructuralOnly {
    fn suggest(&self, _claim: &Node) -> Vec<String> {
        Vec::new()
    }
}

/// Improvement report across several arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImprovementReport {
    /// Mean score over the analyzed arguments, rounded down.
    pub quality_score: QualityScore,
    /// Union of missing components, Grounds before Warrant.
    pub missing_components: Vec<MissingComponent>,
    pub improvement_suggestions: Vec<ClaimSuggestions>,
    /// Always empty. References come from outside the core.
    pub external_references: Vec<String>,
    pub message: String,
}

/// Analyze every argument in the graph, in claim insertion order.
pub fn analyze_graph<G: GraphStore, S: SuggestionSource + ?Sized>(
    graph: &G,
    weights: &ScoringWeights,
    source: &S,
) -> ImprovementReport {
    let arguments: Vec<Argument<'_>> = graph
        .claims()
        .into_iter()
        .filter_map(|claim| Argument::rooted_at(graph, &claim.id))
        .collect();
    report(&arguments, weights, source)
}

/// Analyze the single argument rooted at `claim`, if it exists.
pub fn analyze_claim<G: GraphStore, S: SuggestionSource + ?Sized>(
    graph: &G,
    claim: &NodeId,
    weights: &ScoringWeights,
    source: &S,
) -> Option<ImprovementReport> {
    let argument = Argument::rooted_at(graph, claim)?;
    Some(report(std::slice::from_ref(&argument), weights, source))
}

fn report<S: SuggestionSource + ?Sized>(
    arguments: &[Argument<'_>],
    weights: &ScoringWeights,
    source: &S,
) -> ImprovementReport {
    let mut total: usize = 0;
    let mut missing: BTreeSet<MissingComponent> = BTreeSet::new();
    let mut suggestions = Vec::with_capacity(arguments.len());

    for argument in arguments {
        let analysis = analyze(argument, weights);
        total = total.saturating_add(usize::from(analysis.quality_score.points()));
        missing.extend(analysis.missing_components.iter().copied());

        for mut entry in analysis.suggestions {
            entry.improvement_suggestions.extend(source.suggest(argument.claim));
            suggestions.push(entry);
        }
    }

    let mean = total.checked_div(arguments.len()).unwrap_or(0);
    let message = if arguments.is_empty() {
        "No arguments available for analysis".to_string()
    } else {
        format!(
            "Improvement suggestions generated for {} argument(s)",
            arguments.len()
        )
    };

    ImprovementReport {
        quality_score: QualityScore::from_points(u16::try_from(mean).unwrap_or(u16::MAX)),
        missing_components: missing.into_iter().collect(),
        improvement_suggestions: suggestions,
        external_references: Vec::new(),
        message,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::ingestor::{Ingestor, Submission};
    use crate::{Relation, RelationType};

    fn ingest(graph: &mut Graph, submission: &Submission) -> NodeId {
        Ingestor::ingest_submission(graph, submission).expect("ingest")
    }

    #[test]
    fn minimal_argument_scores_base_weight() {
        let mut graph = Graph::new();
        let claim = ingest(&mut graph, &Submission::new("C", "G", "W"));
        let argument = Argument::rooted_at(&graph, &claim).expect("argument");
        let analysis = analyze(&argument, &ScoringWeights::default());

        assert!(analysis.missing_components.is_empty());
        assert_eq!(analysis.quality_score.points(), 40);
        assert_eq!(analysis.quality_score.as_f64().to_bits(), 0.4_f64.to_bits());
    }

    #[test]
    fn complete_argument_scores_full() {
        let mut graph = Graph::new();
        let submission = Submission::new("C", "G", "W")
            .with_backing("B")
            .with_rebuttal("R")
            .with_qualifier("Q");
        let claim = ingest(&mut graph, &submission);
        let argument = Argument::rooted_at(&graph, &claim).expect("argument");
        let analysis = analyze(&argument, &ScoringWeights::default());

        assert_eq!(analysis.quality_score.points(), 100);
        assert_eq!(
            analysis.suggestions[0].improvement_suggestions,
            vec![HINT_COMPLETE.to_string()]
        );
    }

    #[test]
    fn score_is_capped() {
        let mut graph = Graph::new();
        let submission = Submission::new("C", "G", "W")
            .with_backing("B")
            .with_rebuttal("R")
            .with_qualifier("Q");
        let claim = ingest(&mut graph, &submission);
        let argument = Argument::rooted_at(&graph, &claim).expect("argument");
        let weights = ScoringWeights {
            base_weight: 100,
            backing_weight: 100,
            rebuttal_weight: 100,
            qualifier_weight: 100,
        };

        assert_eq!(analyze(&argument, &weights).quality_score.points(), MAX_SCORE);
    }

    #[test]
    fn missing_warrant_withholds_base_weight() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("c", NodeKind::Claim, "C")).expect("c");
        graph.add_node(Node::new("g", NodeKind::Ground, "G")).expect("g");
        graph.add_node(Node::new("q", NodeKind::Qualifier, "Q")).expect("q");
        graph
            .add_relation(Relation::new("g", "c", RelationType::Supports))
            .expect("supports");
        graph
            .add_relation(Relation::new("q", "c", RelationType::Qualifies))
            .expect("qualifies");

        let argument = Argument::rooted_at(&graph, &NodeId::new("c")).expect("argument");
        let analysis = analyze(&argument, &ScoringWeights::default());

        assert_eq!(analysis.missing_components, vec![MissingComponent::Warrant]);
        assert_eq!(analysis.quality_score.points(), 20);
        assert_eq!(analysis.suggestions[0].improvement_suggestions[0], HINT_WARRANT);
    }

    #[test]
    fn mistyped_relation_does_not_count() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("c", NodeKind::Claim, "C")).expect("c");
        graph.add_node(Node::new("w", NodeKind::Warrant, "W")).expect("w");
        graph
            .add_relation(Relation::new("w", "c", RelationType::Supports))
            .expect("relation");

        let argument = Argument::rooted_at(&graph, &NodeId::new("c")).expect("argument");
        assert!(argument.warrants.is_empty());
    }

    #[test]
    fn weights_above_hundred_rejected() {
        let weights = ScoringWeights {
            rebuttal_weight: 101,
            ..ScoringWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(ToulminError::InvalidWeight {
                name: "rebuttal_weight",
                value: 101
            })
        );
        assert!(ScoringWeights::default().validate().is_ok());
    }

    struct Echo;

    impl SuggestionSource for Echo {
        fn suggest(&self, claim: &Node) -> Vec<String> {
            vec![format!("Rephrase '{}'", claim.text)]
        }
    }

    #[test]
    fn graph_report_averages_and_unions() {
        let mut graph = Graph::new();
        ingest(&mut graph, &Submission::new("A", "G", "W").with_backing("B"));
        graph.add_node(Node::new("lone", NodeKind::Claim, "L")).expect("lone");

        let report = analyze_graph(&graph, &ScoringWeights::default(), &Echo);

        // (60 + 0) / 2
        assert_eq!(report.quality_score.points(), 30);
        assert_eq!(
            report.missing_components,
            vec![MissingComponent::Grounds, MissingComponent::Warrant]
        );
        assert_eq!(report.improvement_suggestions.len(), 2);
        assert_eq!(
            report.improvement_suggestions[1].improvement_suggestions.last(),
            Some(&"Rephrase 'L'".to_string())
        );
        assert!(report.external_references.is_empty());
        assert_eq!(
            report.message,
            "Improvement suggestions generated for 2 argument(s)"
        );
    }

    #[test]
    fn empty_graph_report() {
        let report = analyze_graph(&Graph::new(), &ScoringWeights::default(), &StructuralOnly);
        assert_eq!(report.quality_score, QualityScore::default());
        assert_eq!(report.message, "No arguments available for analysis");
    }

    #[test]
    fn analyze_claim_selects_one_argument() {
        let mut graph = Graph::new();
        ingest(&mut graph, &Submission::new("A", "G", "W"));
        let second = ingest(&mut graph, &Submission::new("B", "G", "W"));

        let report = analyze_claim(&graph, &second, &ScoringWeights::default(), &StructuralOnly)
            .expect("report");
        assert_eq!(report.improvement_suggestions.len(), 1);
        assert_eq!(report.improvement_suggestions[0].claim, "B");
        assert!(
            analyze_claim(&graph, &NodeId::new("nope"), &ScoringWeights::default(), &StructuralOnly)
                .is_none()
        );
    }
}
