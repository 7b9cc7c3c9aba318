//! Render a catalog view as nested accordion list markup.
//!
//! Rendering is two steps: `tree` turns the catalog into numbered, anchored
//! nodes for the catalog's presentation, and `html` serializes those nodes.
//! The presentation mode only flips open classes and list visibility.

mod html;
mod tree;

pub use html::to_html;
pub use tree::{NodeKind, RenderNode, RenderTree, build_tree};

use crate::catalog::Catalog;
use crate::search::PresentationMode;
use serde::{Deserialize, Serialize};

/// Class names used in the emitted markup.
///
/// Defaults match the stylesheet and accordion script shipped with the
/// generated documentation pages.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Class on the clickable anchor of group and section items.
    pub toggle_class: String,
    /// Class added to group and section items when expanded.
    pub open_class: String,
    pub group_list_class: String,
    pub section_list_class: String,
    pub deprecated_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            toggle_class: "dd".to_string(),
            open_class: "open".to_string(),
            group_list_class: "sectlevel1".to_string(),
            section_list_class: "sectlevel2".to_string(),
            deprecated_class: "line-through".to_string(),
        }
    }
}

/// Render `catalog` in `mode`. An empty catalog renders as an empty string.
pub fn render(catalog: &Catalog, mode: PresentationMode, options: &RenderOptions) -> String {
    let tree = build_tree(catalog, mode);
    let html = to_html(&tree, options);
    tracing::debug!(
        key = %catalog.key,
        ?mode,
        nodes = tree.node_count(),
        bytes = html.len(),
        "catalog rendered"
    );
    html
}
