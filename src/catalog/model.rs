//! Deserializable representation of a generated documentation catalog.
//!
//! A catalog file is either grouped (`groups: [...]`, one page per service)
//! or flat (`sections: [...]`, the RPC interface page). Both become the same
//! [`Catalog`] value: flat files are wrapped in one implicit group. Nested
//! collections that are missing or `null` load as empty.

use crate::catalog::identity::{CatalogKey, Order, Presentation};
use crate::catalog::index::validate_catalog;
use crate::error::CatalogError;
use crate::schema_loader::validate_catalog_value;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Immutable catalog: groups of sections of entries plus the layout tag.
pub struct Catalog {
    pub key: CatalogKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub presentation: Presentation,
    pub groups: Vec<Group>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Top-level grouping of sections; implicit (`default`) on single-group pages.
pub struct Group {
    #[serde(default)]
    pub name: String,
    pub order: Order,
    #[serde(
        rename = "list",
        alias = "sections",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One documented controller or RPC interface.
pub struct Section {
    #[serde(default)]
    pub alias: String,
    pub order: Order,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(
        rename = "list",
        alias = "entries",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub entries: Vec<Entry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One documented endpoint or RPC method.
pub struct Entry {
    pub order: Order,
    #[serde(default = "not_deprecated", deserialize_with = "flag_text")]
    pub deprecated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "desc")]
    pub description: String,
}

impl Catalog {
    /// Assemble a catalog in memory.
    ///
    /// A single-group layout only fits one group, so `SingleGroup` with more
    /// than one group is promoted to `MultiGroup`. File loading rejects that
    /// combination instead.
    pub fn new(key: CatalogKey, presentation: Presentation, groups: Vec<Group>) -> Self {
        let presentation = if presentation == Presentation::SingleGroup && groups.len() > 1 {
            Presentation::MultiGroup
        } else {
            presentation
        };
        Self {
            key,
            title: None,
            presentation,
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.groups.iter().map(|group| group.sections.len()).sum()
    }

    pub fn entry_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.sections)
            .map(|section| section.entries.len())
            .sum()
    }

    /// Same key, title, and layout, with a different set of groups.
    pub(crate) fn with_groups(&self, groups: Vec<Group>) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            presentation: self.presentation,
            groups,
        }
    }
}

impl Group {
    pub fn new(name: impl Into<String>, order: impl Into<Order>, sections: Vec<Section>) -> Self {
        Self {
            name: name.into(),
            order: order.into(),
            sections,
        }
    }
}

impl Section {
    pub fn new(
        alias: impl Into<String>,
        order: impl Into<Order>,
        link: impl Into<String>,
        description: impl Into<String>,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            alias: alias.into(),
            order: order.into(),
            link: link.into(),
            description: description.into(),
            entries,
        }
    }

    /// Copy of this section keeping only `entry`.
    pub(crate) fn with_single_entry(&self, entry: &Entry) -> Self {
        Self {
            alias: self.alias.clone(),
            order: self.order.clone(),
            link: self.link.clone(),
            description: self.description.clone(),
            entries: vec![entry.clone()],
        }
    }
}

impl Entry {
    pub fn new(order: impl Into<Order>, description: impl Into<String>) -> Self {
        Self {
            order: order.into(),
            deprecated: not_deprecated(),
            url: None,
            description: description.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn mark_deprecated(mut self) -> Self {
        self.deprecated = "true".to_string();
        self
    }

    /// Only the literal flag `"true"` marks an entry as deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated == "true"
    }
}

/// Knobs for turning a catalog file into a [`Catalog`].
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Key to use when the file does not declare one.
    pub fallback_key: Option<CatalogKey>,
    /// Check the raw JSON against the embedded catalog schema first.
    pub validate_schema: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            fallback_key: None,
            validate_schema: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    key: Option<CatalogKey>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    presentation: Option<Presentation>,
    #[serde(default)]
    groups: Option<Vec<Group>>,
    #[serde(default)]
    sections: Option<Vec<Section>>,
}

// Flat catalogs get one unnamed group; no non-empty query matches its name.
const IMPLICIT_GROUP_ORDER: &str = "1";
const UNNAMED_CATALOG_KEY: &str = "default";

impl CatalogFile {
    fn into_catalog(self, origin: &str, options: &LoadOptions) -> Result<Catalog, CatalogError> {
        let key = self
            .key
            .or_else(|| options.fallback_key.clone())
            .unwrap_or_else(|| CatalogKey(UNNAMED_CATALOG_KEY.to_string()));

        let (groups, presentation) = match (self.groups, self.sections) {
            (Some(_), Some(_)) => {
                return Err(CatalogError::invalid_shape(
                    origin,
                    "catalog declares both 'groups' and 'sections'",
                ));
            }
            (Some(groups), None) => {
                let presentation = self
                    .presentation
                    .unwrap_or_else(|| Presentation::for_group_count(groups.len()));
                (groups, presentation)
            }
            (None, Some(sections)) => {
                if self.presentation == Some(Presentation::MultiGroup) {
                    return Err(CatalogError::invalid_shape(
                        origin,
                        "flat catalogs cannot use the multi_group presentation",
                    ));
                }
                (
                    vec![Group::new("", IMPLICIT_GROUP_ORDER, sections)],
                    Presentation::SingleGroup,
                )
            }
            (None, None) => (
                Vec::new(),
                self.presentation.unwrap_or(Presentation::SingleGroup),
            ),
        };

        if presentation == Presentation::SingleGroup && groups.len() > 1 {
            return Err(CatalogError::invalid_shape(
                origin,
                format!(
                    "single_group presentation declared with {} groups",
                    groups.len()
                ),
            ));
        }

        Ok(Catalog {
            key,
            title: self.title,
            presentation,
            groups,
        })
    }
}

/// Build a catalog from an already-parsed JSON value.
pub fn load_catalog_from_value(
    value: Value,
    origin: &str,
    options: &LoadOptions,
) -> Result<Catalog, CatalogError> {
    if options.validate_schema {
        validate_catalog_value(&value, origin)?;
    }
    let file: CatalogFile = serde_json::from_value(value)
        .map_err(|err| CatalogError::invalid_shape(origin, err.to_string()))?;
    let catalog = file.into_catalog(origin, options)?;
    validate_catalog(&catalog).map_err(|details| CatalogError::invalid_shape(origin, details))?;

    tracing::info!(
        key = %catalog.key,
        presentation = catalog.presentation.as_str(),
        groups = catalog.groups.len(),
        sections = catalog.section_count(),
        entries = catalog.entry_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse and validate a catalog from JSON text.
pub fn load_catalog_from_str(
    text: &str,
    origin: &str,
    options: &LoadOptions,
) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_str(text).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    load_catalog_from_value(value, origin, options)
}

/// Read, parse, and validate a catalog file from disk.
pub fn load_catalog_from_path(path: &Path, options: &LoadOptions) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog_from_str(&text, &path.display().to_string(), options)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_deprecated() -> String {
    "false".to_string()
}

fn flag_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value.to_string(),
        Some(Flag::Text(value)) => value,
        None => not_deprecated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(value: Value) -> Result<Catalog, CatalogError> {
        load_catalog_from_value(value, "test", &LoadOptions::default())
    }

    #[test]
    fn grouped_file_with_one_group_is_single_group() {
        let catalog = load(json!({
            "key": "admin",
            "groups": [{
                "name": "default",
                "order": "1",
                "list": [{
                    "alias": "AdminController",
                    "order": "1",
                    "link": "admin_api",
                    "desc": "Admin API",
                    "list": [{
                        "order": "1",
                        "deprecated": "false",
                        "url": "http://localhost:9010/kaleido-admin/admin",
                        "desc": "update admin"
                    }]
                }]
            }]
        }))
        .unwrap();

        assert_eq!(catalog.key, CatalogKey("admin".into()));
        assert_eq!(catalog.presentation, Presentation::SingleGroup);
        let entry = &catalog.groups[0].sections[0].entries[0];
        assert_eq!(
            entry.url.as_deref(),
            Some("http://localhost:9010/kaleido-admin/admin")
        );
        assert!(!entry.is_deprecated());
    }

    #[test]
    fn flat_file_is_wrapped_in_implicit_group() {
        let catalog = load(json!({
            "key": "rpc",
            "sections": [
                {"alias": "Add dependency", "order": "1", "link": "add_dependency", "desc": "Add dependency", "list": []},
                {"alias": "IRpcAdminAuthService", "order": "2", "link": "admin_rpc", "desc": "Admin RPC",
                 "list": [{"order": "1", "desc": "register admin"}]}
            ]
        }))
        .unwrap();

        assert_eq!(catalog.presentation, Presentation::SingleGroup);
        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].name, "");
        assert_eq!(catalog.groups[0].order.as_str(), "1");
        assert_eq!(catalog.section_count(), 2);
        let entry = &catalog.groups[0].sections[1].entries[0];
        assert_eq!(entry.url, None);
        assert_eq!(entry.deprecated, "false");
    }

    #[test]
    fn missing_or_null_lists_default_to_empty() {
        let catalog = load(json!({
            "groups": [
                {"name": "alpha", "order": "1", "list": null},
                {"name": "beta", "order": "2", "list": [
                    {"alias": "A", "order": "1", "link": "a", "desc": "A"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(catalog.presentation, Presentation::MultiGroup);
        assert!(catalog.groups[0].sections.is_empty());
        assert!(catalog.groups[1].sections[0].entries.is_empty());
        assert_eq!(catalog.key, CatalogKey("default".into()));
    }

    #[test]
    fn boolean_deprecation_flags_are_normalized() {
        let catalog = load(json!({
            "sections": [{"order": "1", "link": "x", "desc": "X", "list": [
                {"order": "1", "deprecated": true, "desc": "old"},
                {"order": "2", "deprecated": false, "desc": "new"}
            ]}]
        }))
        .unwrap();
        let entries = &catalog.groups[0].sections[0].entries;
        assert!(entries[0].is_deprecated());
        assert_eq!(entries[1].deprecated, "false");
    }

    #[test]
    fn conflicting_shapes_are_rejected() {
        let err = load(json!({"groups": [], "sections": []})).unwrap_err();
        assert!(err.is_shape_error());

        let err = load(json!({
            "presentation": "single_group",
            "groups": [
                {"name": "a", "order": "1"},
                {"name": "b", "order": "2"}
            ]
        }))
        .unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn flat_file_rejects_multi_group_presentation() {
        let err = load(json!({
            "presentation": "multi_group",
            "sections": [{"order": "1", "link": "x", "desc": "X"}]
        }))
        .unwrap_err();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("multi_group"), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error_naming_the_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_catalog_from_path(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("absent.json"), "{err}");
    }

    #[test]
    fn constructor_promotes_single_group_with_many_groups() {
        let groups = vec![Group::new("a", "1", Vec::new()), Group::new("b", "2", Vec::new())];
        let catalog = Catalog::new(CatalogKey("two".into()), Presentation::SingleGroup, groups);
        assert_eq!(catalog.presentation, Presentation::MultiGroup);

        let one = Catalog::new(
            CatalogKey("one".into()),
            Presentation::SingleGroup,
            vec![Group::new("a", "1", Vec::new())],
        );
        assert_eq!(one.presentation, Presentation::SingleGroup);
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = load_catalog_from_str("{\"groups\": [", "broken", &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn fallback_key_applies_when_file_has_none() {
        let options = LoadOptions {
            fallback_key: Some(CatalogKey("wardrobe".into())),
            ..Default::default()
        };
        let catalog = load_catalog_from_value(json!({"groups": []}), "test", &options).unwrap();
        assert_eq!(catalog.key, CatalogKey("wardrobe".into()));
        assert!(catalog.is_empty());
    }
}
