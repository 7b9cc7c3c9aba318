//! Query filtering over a catalog.
//!
//! Matching is a case-folded substring test against group names and
//! section/entry descriptions; urls, aliases and links are never consulted.
//! Results keep catalog order and original order numbers.

use crate::catalog::{Catalog, Group, Section};
use crate::render::{RenderOptions, render};
use serde::Serialize;
use std::borrow::Cow;

/// Open state requested from the renderer.
///
/// An empty query shows the whole catalog `Collapsed`; any other query shows
/// its matches `Expanded`. The mode never changes which nodes are emitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    Collapsed,
    Expanded,
}

/// Number of nodes at each level of a search view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ViewCounts {
    pub groups: usize,
    pub sections: usize,
    pub entries: usize,
}

/// Filtered view of a catalog plus the presentation it should be shown in.
#[derive(Clone, Debug)]
pub struct SearchResult<'a> {
    view: Cow<'a, Catalog>,
    mode: PresentationMode,
}

impl<'a> SearchResult<'a> {
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.view
    }

    pub fn into_catalog(self) -> Catalog {
        self.view.into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn counts(&self) -> ViewCounts {
        ViewCounts {
            groups: self.view.groups.len(),
            sections: self.view.section_count(),
            entries: self.view.entry_count(),
        }
    }

    /// Serialize this view with the accordion markup.
    pub fn render(&self, options: &RenderOptions) -> String {
        render(&self.view, self.mode, options)
    }
}

/// Case-folded query text.
struct Query {
    folded: String,
}

impl Query {
    fn new(raw: &str) -> Self {
        Self {
            folded: raw.to_lowercase(),
        }
    }

    fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

/// Filter `catalog` against `query`.
///
/// An empty query returns the catalog itself, collapsed. Otherwise each
/// section is kept whole when its description matches; a non-matching
/// section is kept with only its first matching entry, and scanning stops
/// there. A group whose name matches is kept whole, regardless of what its
/// sections did.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> SearchResult<'a> {
    let query = Query::new(query);
    if query.is_empty() {
        tracing::debug!(key = %catalog.key, "empty query, showing full catalog");
        return SearchResult {
            view: Cow::Borrowed(catalog),
            mode: PresentationMode::Collapsed,
        };
    }

    let groups: Vec<Group> = catalog
        .groups
        .iter()
        .filter_map(|group| filter_group(group, &query))
        .collect();

    let result = SearchResult {
        view: Cow::Owned(catalog.with_groups(groups)),
        mode: PresentationMode::Expanded,
    };
    let counts = result.counts();
    tracing::debug!(
        key = %catalog.key,
        query = %query.folded,
        groups = counts.groups,
        sections = counts.sections,
        entries = counts.entries,
        "search complete"
    );
    result
}

fn filter_group(group: &Group, query: &Query) -> Option<Group> {
    if query.matches(&group.name) {
        return Some(group.clone());
    }

    let sections: Vec<Section> = group
        .sections
        .iter()
        .filter_map(|section| filter_section(section, query))
        .collect();
    if sections.is_empty() {
        return None;
    }
    Some(Group {
        name: group.name.clone(),
        order: group.order.clone(),
        sections,
    })
}

fn filter_section(section: &Section, query: &Query) -> Option<Section> {
    if query.matches(&section.description) {
        return Some(section.clone());
    }
    // Only the first matching entry is surfaced for a non-matching section.
    section
        .entries
        .iter()
        .find(|entry| query.matches(&entry.description))
        .map(|entry| section.with_single_entry(entry))
}
