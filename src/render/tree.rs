//! Structured render tree built from a (filtered) catalog.
//!
//! Nodes carry their dotted number, display label, anchor fragment and
//! deprecation state, so the markup serializer only decides layout.

use crate::catalog::{Catalog, Entry, Group, Presentation, Section};
use crate::search::PresentationMode;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Section,
    Entry,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RenderNode {
    pub kind: NodeKind,
    /// Dotted order path, e.g. `1.1.2`.
    pub number: String,
    pub label: String,
    /// Fragment without the leading `#`: `_` + path segments + raw text.
    pub anchor: String,
    pub deprecated: bool,
    pub children: Vec<RenderNode>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RenderTree {
    pub mode: PresentationMode,
    pub nodes: Vec<RenderNode>,
}

impl RenderTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total nodes at every depth.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[RenderNode]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.children)).sum()
        }
        count(&self.nodes)
    }
}

/// Build the tree for `catalog` in its own presentation.
///
/// Single-group catalogs drop the group level: their sections become the
/// top-level nodes, still numbered under the group's order.
pub fn build_tree(catalog: &Catalog, mode: PresentationMode) -> RenderTree {
    let nodes = match catalog.presentation {
        Presentation::SingleGroup => catalog
            .groups
            .iter()
            .flat_map(|group| {
                group
                    .sections
                    .iter()
                    .map(move |section| section_node(group, section))
            })
            .collect(),
        Presentation::MultiGroup => catalog.groups.iter().map(group_node).collect(),
    };
    RenderTree { mode, nodes }
}

fn group_node(group: &Group) -> RenderNode {
    let path = [group.order.as_str()];
    RenderNode {
        kind: NodeKind::Group,
        number: path.join("."),
        label: group.name.clone(),
        anchor: anchor(&path, &group.name),
        deprecated: false,
        children: group
            .sections
            .iter()
            .map(|section| section_node(group, section))
            .collect(),
    }
}

fn section_node(group: &Group, section: &Section) -> RenderNode {
    let path = [group.order.as_str(), section.order.as_str()];
    RenderNode {
        kind: NodeKind::Section,
        number: path.join("."),
        label: section.description.clone(),
        anchor: anchor(&path, &section.link),
        deprecated: false,
        children: section
            .entries
            .iter()
            .map(|entry| entry_node(group, section, entry))
            .collect(),
    }
}

fn entry_node(group: &Group, section: &Section, entry: &Entry) -> RenderNode {
    let path = [
        group.order.as_str(),
        section.order.as_str(),
        entry.order.as_str(),
    ];
    RenderNode {
        kind: NodeKind::Entry,
        number: path.join("."),
        label: entry.description.clone(),
        anchor: anchor(&path, &entry.description),
        deprecated: entry.is_deprecated(),
        children: Vec::new(),
    }
}

fn anchor(path: &[&str], text: &str) -> String {
    format!("_{}_{}", path.join("_"), text)
}
