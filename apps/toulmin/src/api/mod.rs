//! # Toulmin HTTP API Module
//!
//! This module implements the HTTP gateway using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /insert-argument` - Store one argument
//! - `POST /insert-arguments` - Store a list of arguments (all or nothing)
//! - `PUT /arguments` - Replace the whole graph
//! - `GET /verify-argument-structure` - Verify the whole graph
//! - `POST /verify-argument-structure` - Verify one argument by claim id
//! - `GET /suggest-improvements` - Quality scores and hints
//! - `GET /visualize-argument-dag` - Renderer-neutral layout
//! - `GET /dag-style` - Display attributes per category
//!
//! ## Server Configuration
//!
//! - `[server] cors_origins` / `TOULMIN_CORS_ORIGINS`: `*` or comma-separated
//!   origins (default: localhost only)
//! - `[server] rate_limit` / `TOULMIN_RATE_LIMIT`: requests per minute
//!   (default: 100, 0 to disable)

mod handlers;
mod middleware;
pub mod style;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use style::{DisplayAttributes, StyleSheet, display_attributes};
pub use types::{
    BatchResponse, HealthResponse, ImprovementQuery, ImprovementResponse, InsertArgumentResponse,
    LayoutQuery, VerifyArgumentRequest,
};

use crate::config::ServerConfig;
use crate::error::AppError;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use toulmin_core::{Graph, LayoutOptions, ScoringWeights};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the argument graph plus analysis settings.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<RwLock<Graph>>,
    pub weights: ScoringWeights,
    pub layout: LayoutOptions,
}

impl AppState {
    /// Create state around `graph` with default settings.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            weights: ScoringWeights::default(),
            layout: LayoutOptions::default(),
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `Some("*")`: any origin
/// - `Some(list)`: the comma-separated origins that parse
/// - `None`, or a list where nothing parses: localhost only
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| match s.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", s);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", s, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                restricted_cors(allowed)
            }
        }
        None => build_localhost_cors(),
    }
}

fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/insert-argument", post(handlers::insert_argument_handler))
        .route("/insert-arguments", post(handlers::insert_arguments_handler))
        .route("/arguments", put(handlers::reload_handler))
        .route(
            "/verify-argument-structure",
            get(handlers::verify_graph_handler).post(handlers::verify_argument_handler),
        )
        .route(
            "/suggest-improvements",
            get(handlers::suggest_improvements_handler),
        )
        .route("/visualize-argument-dag", get(handlers::visualize_handler))
        .route("/dag-style", get(handlers::style_handler));

    if server.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/minute", server.rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(server.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(server.cors_origins.as_deref()))
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Bind `server.addr()` and serve until the process is stopped.
pub async fn run_server(server: &ServerConfig, state: AppState) -> Result<(), AppError> {
    let addr = server.addr();
    let router = create_router(state, server);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("Bind failed: {}", e)))?;

    tracing::info!("Toulmin HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::Server(format!("Server error: {}", e)))
}
