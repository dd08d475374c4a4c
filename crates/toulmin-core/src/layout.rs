//! # Layout Exporter
//!
//! Turns a graph into a renderer-neutral list of nodes and edges.
//!
//! The exporter prepares strings only. Colours, shapes and positions belong
//! to whoever draws the layout; `category` is the hook they key on.
//!
//! Output follows store insertion order, so two exports of an unchanged
//! graph are identical value-for-value and byte-for-byte in canonical form.

use crate::graph::GraphStore;
use crate::primitives::{LABEL_ELLIPSIS, LAYOUT_MAGIC, LAYOUT_VERSION, NOT_AVAILABLE};
use crate::{Node, NodeId, NodeKind, RelationType, ToulminError};
use serde::{Deserialize, Serialize};

/// Exporter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Maximum label length in characters. `None` keeps labels whole.
    pub max_label_length: Option<usize>,
}

// =============================================================================
// LAYOUT TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub category: NodeKind,
    pub details: Option<String>,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub relation_label: RelationType,
}

/// Render-ready description of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

/// Export `graph` as a layout.
#[must_use]
pub fn export_layout<G: GraphStore>(graph: &G, options: &LayoutOptions) -> LayoutGraph {
    let nodes = graph
        .all_nodes()
        .iter()
        .map(|node| LayoutNode {
            id: node.id.clone(),
            label: label(&node.text, options.max_label_length),
            category: node.kind,
            details: node.details.clone(),
            tooltip: tooltip(node),
        })
        .collect();

    let edges = graph
        .all_relations()
        .iter()
        .map(|rel| LayoutEdge {
            source: rel.source.clone(),
            target: rel.target.clone(),
            relation_label: rel.relation_type,
        })
        .collect();

    LayoutGraph { nodes, edges }
}

/// Cut `text` to `max` characters and mark the cut.
fn label(text: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if text.chars().count() > max => {
            let mut cut: String = text.chars().take(max).collect();
            cut.push_str(LABEL_ELLIPSIS);
            cut
        }
        _ => text.to_string(),
    }
}

fn tooltip(node: &Node) -> String {
    let details = node
        .details
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NOT_AVAILABLE);
    format!("Type: {}\nDetails: {}", node.kind, details)
}

// =============================================================================
// CANONICAL FORM
// =============================================================================

/// Header of the canonical layout snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutHeader {
    pub magic: [u8; 4],
    pub version: u8,
    pub node_count: u64,
    pub edge_count: u64,
    pub checksum: u64,
}

impl LayoutHeader {
    fn validate(&self) -> Result<(), ToulminError> {
        if self.magic != LAYOUT_MAGIC {
            return Err(ToulminError::SerializationError(
                "Invalid layout format".to_string(),
            ));
        }
        if self.version != LAYOUT_VERSION {
            return Err(ToulminError::SerializationError(
                "Unsupported layout version".to_string(),
            ));
        }
        Ok(())
    }
}

impl LayoutGraph {
    /// Order-sensitive checksum over every string and tag in the layout.
    ///
    /// Not cryptographic. Enable `crypto-hash` for [`LayoutGraph::layout_hash`].
    #[must_use]
    pub fn checksum(&self) -> u64 {
        let mut hash: u64 = 0;
        let mut mix = |bytes: &[u8], salt: u32| {
            for byte in bytes {
                hash = hash.rotate_left(salt) ^ u64::from(*byte);
            }
            hash = hash.rotate_left(3) ^ 0xFF;
        };

        for node in &self.nodes {
            mix(node.id.as_str().as_bytes(), 13);
            mix(node.label.as_bytes(), 7);
            mix(node.category.as_str().as_bytes(), 11);
            mix(node.details.as_deref().unwrap_or("").as_bytes(), 17);
            mix(node.tooltip.as_bytes(), 19);
        }
        for edge in &self.edges {
            mix(edge.source.as_str().as_bytes(), 23);
            mix(edge.target.as_str().as_bytes(), 29);
            mix(edge.relation_label.as_str().as_bytes(), 5);
        }

        hash
    }

    /// Encode as `[header_len: u32 LE][header][data]`, all postcard.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, ToulminError> {
        let header = LayoutHeader {
            magic: LAYOUT_MAGIC,
            version: LAYOUT_VERSION,
            node_count: self.nodes.len() as u64,
            edge_count: self.edges.len() as u64,
            checksum: self.checksum(),
        };

        let header_bytes = postcard::to_allocvec(&header)
            .map_err(|e| ToulminError::SerializationError(format!("Header: {}", e)))?;
        let data_bytes = postcard::to_allocvec(self)
            .map_err(|e| ToulminError::SerializationError(format!("Data: {}", e)))?;

        let header_len = u32::try_from(header_bytes.len())
            .map_err(|_| ToulminError::SerializationError("Header too large".to_string()))?;

        let mut out = Vec::with_capacity(4 + header_bytes.len() + data_bytes.len());
        out.extend_from_slice(&header_len.to_le_bytes());
        out.extend_from_slice(&header_bytes);
        out.extend_from_slice(&data_bytes);
        Ok(out)
    }

    /// Decode canonical bytes, checking header and checksum.
    pub fn from_canonical_bytes(data: &[u8]) -> Result<Self, ToulminError> {
        let too_short = || ToulminError::SerializationError("Data too short".to_string());

        let (len_bytes, rest) = data.split_first_chunk::<4>().ok_or_else(too_short)?;
        let header_len = u32::from_le_bytes(*len_bytes) as usize;
        if rest.len() < header_len {
            return Err(too_short());
        }
        let (header_bytes, data_bytes) = rest.split_at(header_len);

        let header: LayoutHeader = postcard::from_bytes(header_bytes)
            .map_err(|e| ToulminError::SerializationError(format!("Header: {}", e)))?;
        header.validate()?;

        let layout: LayoutGraph = postcard::from_bytes(data_bytes)
            .map_err(|e| ToulminError::SerializationError(format!("Data: {}", e)))?;

        if layout.nodes.len() as u64 != header.node_count
            || layout.edges.len() as u64 != header.edge_count
            || layout.checksum() != header.checksum
        {
            return Err(ToulminError::SerializationError(
                "Checksum mismatch".to_string(),
            ));
        }
        Ok(layout)
    }

    /// BLAKE3 hex digest of the canonical bytes.
    #[cfg(feature = "crypto-hash")]
    pub fn layout_hash(&self) -> Result<String, ToulminError> {
        let bytes = self.to_canonical_bytes()?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
