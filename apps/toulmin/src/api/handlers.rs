//! # API Endpoint Handlers
//!
//! Reads (verify, analyze, layout) take the graph read lock; ingest and
//! reload take the write lock. Core calls never await while holding it.
//!
//! Extractor rejections are taken as `Result` and converted to [`AppError`]
//! so malformed input gets the same error body as every other failure.

use super::{
    AppState,
    style::StyleSheet,
    types::{
        BatchResponse, HealthResponse, ImprovementQuery, ImprovementResponse,
        InsertArgumentResponse, LayoutQuery, VerifyArgumentRequest,
    },
};
use crate::error::AppError;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use toulmin_core::{
    GraphStore, Ingestor, LayoutGraph, LayoutOptions, NodeId, StructuralOnly, Submission,
    VerificationResult, analyze_claim, analyze_graph, export_layout, verify, verify_argument,
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// INGEST HANDLERS
// =============================================================================

/// Store one argument.
pub async fn insert_argument_handler(
    State(state): State<AppState>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> Result<Json<InsertArgumentResponse>, AppError> {
    let Json(submission) = payload?;
    let claim_id = {
        let mut graph = state.graph.write().await;
        Ingestor::ingest_submission(&mut graph, &submission)?
    };

    tracing::info!("Inserted argument {}", claim_id);
    Ok(Json(InsertArgumentResponse::new(submission, claim_id)))
}

/// Store a list of arguments, all or nothing.
pub async fn insert_arguments_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Submission>>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(submissions) = payload?;
    let mut graph = state.graph.write().await;
    let claim_ids = Ingestor::ingest_batch(&mut graph, &submissions)?;

    tracing::info!("Inserted {} arguments", claim_ids.len());
    Ok(Json(BatchResponse {
        message: format!("{} argument(s) inserted successfully", claim_ids.len()),
        node_count: graph.node_count(),
        relation_count: graph.relation_count(),
        claim_ids,
    }))
}

/// Replace the whole graph.
pub async fn reload_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Submission>>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(submissions) = payload?;
    let mut graph = state.graph.write().await;
    let claim_ids = Ingestor::reload(&mut graph, &submissions)?;

    tracing::info!("Reloaded graph with {} arguments", claim_ids.len());
    Ok(Json(BatchResponse {
        message: format!("Argument graph reloaded with {} argument(s)", claim_ids.len()),
        node_count: graph.node_count(),
        relation_count: graph.relation_count(),
        claim_ids,
    }))
}

// =============================================================================
// VERIFICATION HANDLERS
// =============================================================================

/// Verify the whole graph.
pub async fn verify_graph_handler(State(state): State<AppState>) -> Json<VerificationResult> {
    let graph = state.graph.read().await;
    let result = verify(&*graph);
    log_verification(&result);
    Json(result)
}

/// Verify one argument by claim id.
pub async fn verify_argument_handler(
    State(state): State<AppState>,
    body: Result<Option<Json<VerifyArgumentRequest>>, JsonRejection>,
) -> Result<Json<VerificationResult>, AppError> {
    let argument_id = body?
        .and_then(|Json(request)| request.argument_id)
        .filter(|id| !id.trim().is_empty())
        .ok_or(AppError::MissingField("Argument ID"))?;

    let graph = state.graph.read().await;
    let result = verify_argument(&*graph, &NodeId::new(argument_id));
    log_verification(&result);
    Ok(Json(result))
}

fn log_verification(result: &VerificationResult) {
    if result.is_valid {
        tracing::info!("Verification passed");
    } else {
        tracing::warn!("Verification failed: {}", result.message);
    }
}

// =============================================================================
// IMPROVEMENT HANDLER
// =============================================================================

/// Quality report for every argument, or for `?argument_id=`.
pub async fn suggest_improvements_handler(
    State(state): State<AppState>,
    query: Result<Query<ImprovementQuery>, QueryRejection>,
) -> Result<Json<ImprovementResponse>, AppError> {
    let Query(query) = query?;
    let graph = state.graph.read().await;

    let report = match query.argument_id {
        Some(id) => analyze_claim(&*graph, &NodeId::new(id.as_str()), &state.weights, &StructuralOnly)
            .ok_or(AppError::ArgumentNotFound(id))?,
        None => analyze_graph(&*graph, &state.weights, &StructuralOnly),
    };

    Ok(Json(report.into()))
}

// =============================================================================
// VISUALIZATION HANDLERS
// =============================================================================

/// Layout of the whole graph.
pub async fn visualize_handler(
    State(state): State<AppState>,
    query: Result<Query<LayoutQuery>, QueryRejection>,
) -> Result<Json<LayoutGraph>, AppError> {
    let Query(query) = query?;
    let options = LayoutOptions {
        max_label_length: query.max_label_length.or(state.layout.max_label_length),
    };

    let graph = state.graph.read().await;
    Ok(Json(export_layout(&*graph, &options)))
}

/// Category → display attributes table.
pub async fn style_handler() -> Json<StyleSheet> {
    Json(StyleSheet::default())
}
