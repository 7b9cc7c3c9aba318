//! Documentation catalog wiring.
//!
//! A catalog is the immutable group → section → entry tree behind one
//! generated documentation page. `model` loads it from JSON, `index`
//! validates ordering invariants and resolves anchor paths, and
//! `repository` holds several catalogs keyed by page.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{CatalogKey, Order, Presentation};
pub use index::{AnchorTarget, CatalogIndex};
pub use model::{
    Catalog, Entry, Group, LoadOptions, Section, load_catalog_from_path, load_catalog_from_str,
    load_catalog_from_value,
};
pub use repository::CatalogRepository;
