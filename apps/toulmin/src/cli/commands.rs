//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState, ImprovementResponse};
use crate::config::AppConfig;
use crate::error::AppError;
use std::path::{Path, PathBuf};
use toulmin_core::{
    Graph, GraphSnapshot, GraphStore, Ingestor, LayoutOptions, NodeId, StructuralOnly,
    Submission, VerificationResult, analyze_claim, analyze_graph, export_layout, verify,
    verify_argument,
};

// =============================================================================
// INPUT FILES
// =============================================================================

/// Maximum input file size (100 MB).
const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Accepted input documents.
#[derive(Debug)]
pub enum InputDocument {
    /// Raw submissions, expanded by the ingestor.
    Submissions(Vec<Submission>),
    /// A graph given node by node.
    Snapshot(GraphSnapshot),
}

impl InputDocument {
    /// Parse a document: a JSON array is a submission list, anything else a snapshot.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.is_array() {
            Ok(InputDocument::Submissions(serde_json::from_value(value)?))
        } else {
            Ok(InputDocument::Snapshot(serde_json::from_value(value)?))
        }
    }

    /// Build the graph this document describes.
    pub fn into_graph(self) -> Result<Graph, AppError> {
        match self {
            InputDocument::Submissions(submissions) => {
                let mut graph = Graph::new();
                Ingestor::ingest_batch(&mut graph, &submissions)?;
                Ok(graph)
            }
            InputDocument::Snapshot(snapshot) => Ok(Graph::from_snapshot(snapshot)?),
        }
    }
}

/// Resolve `path` and make sure it names a regular file of sane size.
fn validate_file_path(path: &Path) -> Result<PathBuf, AppError> {
    let canonical = path.canonicalize()?;
    let metadata = std::fs::metadata(&canonical)?;

    if !metadata.is_file() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Path '{}' is not a regular file", path.display()),
        )));
    }
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_INPUT_FILE_SIZE
            ),
        )));
    }
    Ok(canonical)
}

/// Read an input file into a graph.
pub fn load_graph(path: &Path) -> Result<Graph, AppError> {
    let path = validate_file_path(path)?;
    let content = std::fs::read_to_string(&path)?;
    let document = InputDocument::parse(&content)?;
    let graph = document.into_graph()?;

    tracing::info!(
        "Loaded {} nodes and {} relations from {:?}",
        graph.node_count(),
        graph.relation_count(),
        path
    );
    Ok(graph)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    file: Option<&Path>,
) -> Result<(), AppError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let graph = match file {
        Some(path) => load_graph(path)?,
        None => Graph::new(),
    };

    println!("Toulmin Argument Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.server.host);
    println!("  Port:       {}", config.server.port);
    println!("  Rate limit: {} req/min", config.server.rate_limit);
    println!("  Arguments:  {}", graph.claims().len());
    println!();
    println!("Endpoints:");
    println!("  POST /insert-argument          - Store one argument");
    println!("  POST /insert-arguments         - Store a list of arguments");
    println!("  PUT  /arguments                - Replace all arguments");
    println!("  GET  /verify-argument-structure - Verify the graph");
    println!("  POST /verify-argument-structure - Verify one argument");
    println!("  GET  /suggest-improvements     - Quality report");
    println!("  GET  /visualize-argument-dag   - Layout for rendering");
    println!("  GET  /dag-style                - Display attributes");
    println!("  GET  /health                   - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let state = AppState::new(graph)
        .with_weights(config.scoring)
        .with_layout(config.layout);
    api::run_server(&config.server, state).await
}

// =============================================================================
// VERIFY COMMAND
// =============================================================================

/// Verify a file, failing if any defect is found.
pub fn cmd_verify(file: &Path, argument: Option<&str>, json_mode: bool) -> Result<(), AppError> {
    let graph = load_graph(file)?;
    let result = match argument {
        Some(id) => verify_argument(&graph, &NodeId::new(id)),
        None => verify(&graph),
    };

    if json_mode {
        print_json(&result)?;
    } else {
        print_verification(file, &graph, &result);
    }

    if result.is_valid {
        Ok(())
    } else {
        Err(AppError::InvalidStructure(result.message))
    }
}

fn print_verification(file: &Path, graph: &Graph, result: &VerificationResult) {
    println!("Argument Graph Verification");
    println!("===========================");
    println!("File:      {:?}", file);
    println!("Nodes:     {}", graph.node_count());
    println!("Relations: {}", graph.relation_count());
    println!();
    println!("Valid:     {}", if result.is_valid { "yes" } else { "no" });
    println!("Cycles:    {}", if result.has_cycles { "yes" } else { "no" });

    if !result.cycle.is_empty() {
        let path: Vec<&str> = result.cycle.iter().map(NodeId::as_str).collect();
        println!("  {}", path.join(" -> "));
    }
    if !result.orphaned_nodes.is_empty() {
        println!("Orphaned nodes:");
        for id in &result.orphaned_nodes {
            println!("  {}", id);
        }
    }
    if !result.invalid_relations.is_empty() {
        println!("Invalid relations:");
        for rel in &result.invalid_relations {
            println!(
                "  {}: {} {} {}",
                rel.relation, rel.source, rel.relation_type, rel.target
            );
        }
    }
    println!();
    println!("{}", result.message);
}

// =============================================================================
// ANALYZE COMMAND
// =============================================================================

/// Print the quality report of a file.
pub fn cmd_analyze(
    config: &AppConfig,
    file: &Path,
    argument: Option<&str>,
    json_mode: bool,
) -> Result<(), AppError> {
    let graph = load_graph(file)?;
    let report = match argument {
        Some(id) => analyze_claim(&graph, &NodeId::new(id), &config.scoring, &StructuralOnly)
            .ok_or_else(|| AppError::ArgumentNotFound(id.to_string()))?,
        None => analyze_graph(&graph, &config.scoring, &StructuralOnly),
    };

    if json_mode {
        return print_json(&ImprovementResponse::from(report));
    }

    println!("Argument Quality Report");
    println!("=======================");
    println!("Mean score: {}/100", report.quality_score.points());
    if !report.missing_components.is_empty() {
        let missing: Vec<String> = report
            .missing_components
            .iter()
            .map(|c| format!("{:?}", c))
            .collect();
        println!("Missing:    {}", missing.join(", "));
    }
    println!();
    for entry in &report.improvement_suggestions {
        println!("Claim: {}", entry.claim);
        for hint in &entry.improvement_suggestions {
            println!("  - {}", hint);
        }
    }
    println!();
    println!("{}", report.message);

    Ok(())
}

// =============================================================================
// LAYOUT COMMAND
// =============================================================================

/// Print the layout of a file as JSON, optionally writing canonical bytes.
pub fn cmd_layout(
    config: &AppConfig,
    file: &Path,
    max_label_length: Option<usize>,
    output: Option<&Path>,
    json_mode: bool,
) -> Result<(), AppError> {
    let graph = load_graph(file)?;
    let options = LayoutOptions {
        max_label_length: max_label_length.or(config.layout.max_label_length),
    };
    let layout = export_layout(&graph, &options);

    if let Some(output) = output {
        let bytes = layout.to_canonical_bytes()?;
        std::fs::write(output, &bytes)?;
        let hash = layout.layout_hash()?;

        if json_mode {
            return print_json(&serde_json::json!({
                "output": output.to_string_lossy(),
                "bytes": bytes.len(),
                "checksum": layout.checksum(),
                "blake3": hash,
            }));
        }
        println!("Wrote {} bytes to {:?}", bytes.len(), output);
        println!("Checksum: {}", layout.checksum());
        println!("BLAKE3:   {}", hash);
        return Ok(());
    }

    print_json(&layout)
}

// =============================================================================
// TESTS
// =============================================================================
