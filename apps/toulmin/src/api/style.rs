//! # Display Attributes
//!
//! Pure mapping from node category to how a renderer should draw it.
//! The core only tags nodes with a category; colours live here.

use serde::{Deserialize, Serialize};
use toulmin_core::NodeKind;

/// Fill used for categories without a dedicated colour.
pub const DEFAULT_NODE_COLOR: &str = "#0074D9";

/// Colour of edges at rest.
pub const EDGE_COLOR: &str = "#ccc";

/// Colour of an edge under the pointer.
pub const EDGE_HIGHLIGHT_COLOR: &str = "#FFD700";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    pub background_color: String,
    pub text_color: String,
    pub border_color: String,
    pub border_width: u8,
}

/// Attributes for one category.
#[must_use]
pub fn display_attributes(kind: NodeKind) -> DisplayAttributes {
    let background = match kind {
        NodeKind::Claim => "#FF4136",
        NodeKind::Warrant => "#2ECC40",
        NodeKind::Rebuttal => "#FF851B",
        NodeKind::Ground | NodeKind::Backing | NodeKind::Qualifier => DEFAULT_NODE_COLOR,
    };

    DisplayAttributes {
        background_color: background.to_string(),
        text_color: "#fff".to_string(),
        border_color: "#fff".to_string(),
        border_width: 2,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub category: NodeKind,
    #[serde(flatten)]
    pub attributes: DisplayAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub line_color: String,
    pub highlight_color: String,
    pub width: u8,
    pub highlight_width: u8,
}

/// Complete style sheet served to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub nodes: Vec<CategoryStyle>,
    pub edges: EdgeStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            nodes: NodeKind::ALL
                .into_iter()
                .map(|category| CategoryStyle {
                    category,
                    attributes: display_attributes(category),
                })
                .collect(),
            edges: EdgeStyle {
                line_color: EDGE_COLOR.to_string(),
                highlight_color: EDGE_HIGHLIGHT_COLOR.to_string(),
                width: 2,
                highlight_width: 4,
            },
        }
    }
}
