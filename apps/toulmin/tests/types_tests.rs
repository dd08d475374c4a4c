//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use toulmin::api::{
    HealthResponse, ImprovementQuery, ImprovementResponse, InsertArgumentResponse, LayoutQuery,
    StyleSheet, VerifyArgumentRequest, display_attributes,
};
use toulmin::error::ErrorResponse;
use toulmin_core::{
    Graph, GraphStore, Ingestor, LayoutOptions, MissingComponent, Node, NodeId, NodeKind, Relation,
    RelationType, ScoringWeights, StructuralOnly, Submission, VerificationResult, analyze_graph,
    export_layout, verify,
};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.3.0".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.3.0\""));
}

// =============================================================================
// SUBMISSION TESTS
// =============================================================================

#[test]
fn test_submission_optional_fields_default_to_none() {
    let json = r#"{"claim":"C","grounds":"G","warrant":"W"}"#;
    let submission: Submission = serde_json::from_str(json).unwrap();

    assert_eq!(submission, Submission::new("C", "G", "W"));
    assert!(submission.backing.is_none());
    assert!(submission.details.is_none());
}

#[test]
fn test_submission_missing_required_field_still_parses() {
    // Validation, not deserialization, rejects it.
    let submission: Submission = serde_json::from_str(r#"{"claim":"C"}"#).unwrap();
    assert!(submission.warrant.is_none());
    assert!(Ingestor::validate(&submission).is_err());
}

#[test]
fn test_submission_skips_absent_optionals() {
    let json = serde_json::to_string(&Submission::new("C", "G", "W")).unwrap();
    assert!(!json.contains("backing"));
    assert!(!json.contains("qualifier"));
}

#[test]
fn test_insert_response_echo() {
    let submission = Submission::new("C", "G", "W").with_rebuttal("R");
    let response = InsertArgumentResponse::new(submission, NodeId::new("arg-0.claim"));

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["claim"], "C");
    assert_eq!(value["rebuttal"], "R");
    assert!(value["backing"].is_null());
    assert_eq!(value["claim_id"], "arg-0.claim");
    assert_eq!(value["message"], "Argument inserted successfully");
}

// =============================================================================
// REQUEST TESTS
// =============================================================================

#[test]
fn test_verify_request_without_id() {
    let request: VerifyArgumentRequest = serde_json::from_str("{}").unwrap();
    assert!(request.argument_id.is_none());
}

#[test]
fn test_verify_request_with_id() {
    let request: VerifyArgumentRequest =
        serde_json::from_str(r#"{"argument_id":"arg-3.claim"}"#).unwrap();
    assert_eq!(request.argument_id.as_deref(), Some("arg-3.claim"));
}

#[test]
fn test_queries_default_to_none() {
    assert!(ImprovementQuery::default().argument_id.is_none());
    assert!(LayoutQuery::default().max_label_length.is_none());
}

// =============================================================================
// GRAPH ELEMENT TESTS
// =============================================================================

#[test]
fn test_node_kind_names_ignore_case() {
    let node: Node = serde_json::from_str(r#"{"id":"c","kind":"claim","text":"C"}"#).unwrap();
    assert_eq!(node.kind, NodeKind::Claim);

    let relation: Relation =
        serde_json::from_str(r#"{"source":"g","target":"c","type":"SUPPORTS"}"#).unwrap();
    assert_eq!(relation.relation_type, RelationType::Supports);
}

#[test]
fn test_unknown_names_rejected_with_message() {
    let err = serde_json::from_str::<Node>(r#"{"id":"x","kind":"evidence","text":"E"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Unknown node kind: evidence"));

    let err = serde_json::from_str::<Relation>(r#"{"source":"a","target":"b","type":"causes"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("causes"));
}

#[test]
fn test_node_kind_serializes_canonical_name() {
    let json = serde_json::to_string(&Node::new("q", NodeKind::Qualifier, "Q")).unwrap();
    assert!(json.contains(r#""kind":"Qualifier""#));
}

// =============================================================================
// VERIFICATION RESULT TESTS
// =============================================================================

#[test]
fn test_verification_result_keys() {
    let mut graph = Graph::new();
    Ingestor::ingest_submission(&mut graph, &Submission::new("C", "G", "W")).unwrap();

    let value = serde_json::to_value(verify(&graph)).unwrap();
    let object = value.as_object().unwrap();

    for key in [
        "is_valid",
        "has_cycles",
        "orphaned_nodes",
        "invalid_relations",
        "message",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert!(!object.contains_key("cycle"));
}

#[test]
fn test_invalid_relation_uses_type_key() {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new("c", NodeKind::Claim, "C"))
        .unwrap();
    graph
        .add_node(Node::new("w", NodeKind::Warrant, "W"))
        .unwrap();
    graph
        .add_relation(Relation::new("w", "c", RelationType::Supports))
        .unwrap();

    let value = serde_json::to_value(verify(&graph)).unwrap();
    let invalid = &value["invalid_relations"][0];
    assert_eq!(invalid["source"], "w");
    assert_eq!(invalid["target"], "c");
    assert_eq!(invalid["type"], "supports");
}

#[test]
fn test_verification_result_round_trip() {
    let json = r#"{
        "is_valid": false,
        "has_cycles": true,
        "orphaned_nodes": [],
        "invalid_relations": [],
        "cycle": ["a", "b", "a"],
        "message": "Graph structure invalid: cycle detected (a -> b -> a)"
    }"#;
    let result: VerificationResult = serde_json::from_str(json).unwrap();
    assert!(result.has_cycles);
    assert_eq!(result.cycle.len(), 3);
}

// =============================================================================
// IMPROVEMENT RESPONSE TESTS
// =============================================================================

#[test]
fn test_improvement_response_from_report() {
    let mut graph = Graph::new();
    Ingestor::ingest_submission(
        &mut graph,
        &Submission::new("C", "G", "W").with_qualifier("Q"),
    )
    .unwrap();

    let report = analyze_graph(&graph, &ScoringWeights::default(), &StructuralOnly);
    let response = ImprovementResponse::from(report);

    assert_eq!(response.quality_score.to_bits(), 0.6_f64.to_bits());
    assert!(response.external_references.is_empty());
    assert_eq!(response.improvement_suggestions[0].claim, "C");
}

#[test]
fn test_missing_component_names() {
    let json = serde_json::to_string(&[MissingComponent::Grounds, MissingComponent::Warrant])
        .unwrap();
    assert_eq!(json, r#"["Grounds","Warrant"]"#);
}

// =============================================================================
// LAYOUT AND STYLE TESTS
// =============================================================================

#[test]
fn test_layout_uses_type_keys() {
    let mut graph = Graph::new();
    Ingestor::ingest_submission(&mut graph, &Submission::new("C", "G", "W")).unwrap();

    let value = serde_json::to_value(export_layout(&graph, &LayoutOptions::default())).unwrap();

    assert_eq!(value["nodes"][1]["type"], "Ground");
    assert_eq!(value["nodes"][1]["id"], "arg-0.grounds");
    assert!(value["nodes"][1]["details"].is_null());
    assert_eq!(value["edges"][1]["type"], "warrants");
}

#[test]
fn test_display_attributes_flatten_into_style() {
    let value = serde_json::to_value(StyleSheet::default()).unwrap();
    let first = &value["nodes"][0];

    assert_eq!(first["category"], "Claim");
    assert_eq!(first["background_color"], "#FF4136");
    assert_eq!(value["edges"]["line_color"], "#ccc");
}

#[test]
fn test_display_attributes_fall_back_to_default_colour() {
    assert_eq!(display_attributes(NodeKind::Backing).background_color, "#0074D9");
    assert_eq!(display_attributes(NodeKind::Warrant).background_color, "#2ECC40");
}

// =============================================================================
// ERROR RESPONSE TESTS
// =============================================================================

#[test]
fn test_error_response_shape() {
    let error = ErrorResponse::new("validation_error", "Argument ID is required");
    let value = serde_json::to_value(&error).unwrap();

    assert_eq!(value["detail"]["error_type"], "validation_error");
    assert_eq!(value["detail"]["message"], "Argument ID is required");
}
