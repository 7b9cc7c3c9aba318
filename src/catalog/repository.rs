//! Holds one or more documentation catalogs for lookup by key.
//!
//! Each generated page (admin, ai, wardrobe, rpc) documents one service; the
//! repository keeps them side by side so a host can search whichever page is
//! active without reloading anything.

use crate::catalog::identity::CatalogKey;
use crate::catalog::model::{Catalog, LoadOptions, Section, load_catalog_from_path};
use crate::search::{SearchResult, search};
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Default)]
/// In-memory store for catalogs keyed by `CatalogKey`.
pub struct CatalogRepository {
    catalogs: BTreeMap<CatalogKey, Arc<Catalog>>,
}

impl CatalogRepository {
    /// Register a catalog for later lookup, replacing any previous catalog
    /// with the same key.
    pub fn register(&mut self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        tracing::info!(key = %catalog.key, "catalog registered");
        if self
            .catalogs
            .insert(catalog.key.clone(), Arc::clone(&catalog))
            .is_some()
        {
            tracing::warn!(key = %catalog.key, "replaced previously registered catalog");
        }
        catalog
    }

    /// Fetch a catalog by key, if present.
    pub fn get(&self, key: &CatalogKey) -> Option<Arc<Catalog>> {
        self.catalogs.get(key).cloned()
    }

    /// Registered keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &CatalogKey> {
        self.catalogs.keys()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Resolve a section by alias inside a registered catalog.
    pub fn find_section(&self, key: &CatalogKey, alias: &str) -> Option<&Section> {
        self.catalogs
            .get(key)?
            .groups
            .iter()
            .flat_map(|group| &group.sections)
            .find(|section| section.alias == alias)
    }

    /// Run a search against one registered catalog.
    pub fn search<'a>(&'a self, key: &CatalogKey, query: &str) -> Option<SearchResult<'a>> {
        self.catalogs
            .get(key)
            .map(|catalog| search(catalog.as_ref(), query))
    }

    /// Load every `*.json` catalog in `dir`, in file-name order.
    ///
    /// Files without a `key` are registered under their file stem. Duplicate
    /// keys are rejected so two pages cannot silently shadow each other.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("reading catalog dir {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            } else {
                tracing::warn!(path = %path.display(), "skipping non-catalog entry");
            }
        }
        paths.sort();

        let mut repository = Self::default();
        for path in paths {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .with_context(|| format!("catalog file {} has no usable name", path.display()))?;
            let options = LoadOptions {
                fallback_key: Some(CatalogKey(stem)),
                ..Default::default()
            };
            let catalog = load_catalog_from_path(&path, &options)
                .with_context(|| format!("loading {}", path.display()))?;
            if repository.catalogs.contains_key(&catalog.key) {
                bail!(
                    "duplicate catalog key '{}' in {}",
                    catalog.key,
                    path.display()
                );
            }
            repository.register(catalog);
        }

        if repository.is_empty() {
            bail!("no catalogs found under {}", dir.display());
        }
        Ok(repository)
    }
}
