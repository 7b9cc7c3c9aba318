//! Search-and-render engine for generated API documentation catalogs.
//!
//! A documentation page carries an immutable catalog of groups, sections and
//! entries. Hosts load it once (`load_catalog_from_path`), then call
//! [`search`] with whatever the user typed and [`render`] the resulting view
//! as accordion markup. Nothing here touches a display surface or reads
//! input devices; event wiring belongs to the host.

pub mod catalog;
pub mod error;
pub mod render;
mod schema_loader;
pub mod search;

pub use catalog::{
    AnchorTarget, Catalog, CatalogIndex, CatalogKey, CatalogRepository, Entry, Group, LoadOptions,
    Order, Presentation, Section, load_catalog_from_path, load_catalog_from_str,
    load_catalog_from_value,
};
pub use error::CatalogError;
pub use render::{NodeKind, RenderNode, RenderOptions, RenderTree, build_tree, render, to_html};
pub use search::{PresentationMode, SearchResult, ViewCounts, search};

/// Search `catalog` and render the view in one call.
pub fn search_and_render(catalog: &Catalog, query: &str, options: &RenderOptions) -> String {
    search(catalog, query).render(options)
}
