//! Indexed view of a loaded catalog.
//!
//! The index enforces the ordering invariants the schema cannot express
//! (sibling orders are unique, aliases are unique within a group) and
//! provides lookup by section alias and by numeric anchor path.

use crate::catalog::identity::{CatalogKey, Order};
use crate::catalog::model::{Catalog, Entry, Group, LoadOptions, Section, load_catalog_from_path};
use crate::error::CatalogError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Location {
    group: usize,
    section: Option<usize>,
    entry: Option<usize>,
}

/// Node addressed by a numeric anchor path such as `1.2.3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorTarget<'a> {
    Group(&'a Group),
    Section(&'a Group, &'a Section),
    Entry(&'a Group, &'a Section, &'a Entry),
}

#[derive(Debug)]
/// Catalog plus a derived index keyed by anchor path.
pub struct CatalogIndex {
    catalog: Catalog,
    by_path: BTreeMap<String, Location>,
}

impl CatalogIndex {
    /// Load a catalog from disk and index it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let catalog = load_catalog_from_path(path, &LoadOptions::default())?;
        Self::new(catalog)
    }

    /// Index an already-constructed catalog, validating it first.
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        validate_catalog(&catalog)
            .map_err(|details| CatalogError::invalid_shape(catalog.key.0.clone(), details))?;
        let by_path = build_index(&catalog);
        Ok(Self { catalog, by_path })
    }

    pub fn key(&self) -> &CatalogKey {
        &self.catalog.key
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// First section (in catalog order) carrying `alias`.
    pub fn section_by_alias(&self, alias: &str) -> Option<(&Group, &Section)> {
        self.catalog.groups.iter().find_map(|group| {
            group
                .sections
                .iter()
                .find(|section| section.alias == alias)
                .map(|section| (group, section))
        })
    }

    /// Resolve a dotted order path (`"1"`, `"1.2"`, `"1.2.3"`).
    pub fn resolve_anchor(&self, path: &str) -> Option<AnchorTarget<'_>> {
        let location = self.by_path.get(path)?;
        let group = &self.catalog.groups[location.group];
        match (location.section, location.entry) {
            (None, _) => Some(AnchorTarget::Group(group)),
            (Some(s), None) => Some(AnchorTarget::Section(group, &group.sections[s])),
            (Some(s), Some(e)) => {
                let section = &group.sections[s];
                Some(AnchorTarget::Entry(group, section, &section.entries[e]))
            }
        }
    }

    /// Anchor paths in stable order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }
}

/// Check sibling orders and aliases, reporting every problem found.
pub(crate) fn validate_catalog(catalog: &Catalog) -> Result<(), String> {
    let mut errors = Vec::new();

    check_orders(
        "groups",
        catalog.groups.iter().map(|group| &group.order),
        &mut errors,
    );
    for group in &catalog.groups {
        let scope = format!("group {}", group.order);
        check_orders(
            &scope,
            group.sections.iter().map(|section| &section.order),
            &mut errors,
        );

        let mut aliases = BTreeSet::new();
        for section in &group.sections {
            if !section.alias.is_empty() && !aliases.insert(section.alias.as_str()) {
                errors.push(format!("{scope}: duplicate section alias '{}'", section.alias));
            }
            check_orders(
                &format!("section {}.{}", group.order, section.order),
                section.entries.iter().map(|entry| &entry.order),
                &mut errors,
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn check_orders<'a>(
    scope: &str,
    orders: impl Iterator<Item = &'a Order>,
    errors: &mut Vec<String>,
) {
    let mut seen = BTreeSet::new();
    for order in orders {
        if order.as_str().trim().is_empty() {
            errors.push(format!("{scope}: empty order"));
            continue;
        }
        if !seen.insert(order.as_str()) {
            errors.push(format!("{scope}: duplicate order {order}"));
        }
    }
}

fn build_index(catalog: &Catalog) -> BTreeMap<String, Location> {
    let mut map = BTreeMap::new();
    for (g, group) in catalog.groups.iter().enumerate() {
        map.insert(
            group.order.to_string(),
            Location {
                group: g,
                section: None,
                entry: None,
            },
        );
        for (s, section) in group.sections.iter().enumerate() {
            let section_path = format!("{}.{}", group.order, section.order);
            for (e, entry) in section.entries.iter().enumerate() {
                map.insert(
                    format!("{section_path}.{}", entry.order),
                    Location {
                        group: g,
                        section: Some(s),
                        entry: Some(e),
                    },
                );
            }
            map.insert(
                section_path,
                Location {
                    group: g,
                    section: Some(s),
                    entry: None,
                },
            );
        }
    }
    map
}
