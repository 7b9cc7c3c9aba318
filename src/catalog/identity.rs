use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Key naming one documentation catalog (e.g., `admin`, `rpc`).
///
/// The repository resolves catalogs by this key, so each generated page keeps
/// a stable handle even when several are loaded side by side.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Ordering number assigned to a group, section, or entry when the catalog
/// was generated.
///
/// Orders are carried as text because that is how the generator emits them;
/// filtering never renumbers, so a filtered view may show gaps.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(pub String);

impl Order {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Order {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the renderer lays out a catalog.
///
/// `SingleGroup` hides the lone implicit group and lists its sections at the
/// top level; `MultiGroup` renders each group as its own top-level item. The
/// tag is fixed when the catalog is loaded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Presentation {
    SingleGroup,
    MultiGroup,
}

const PRESENTATIONS: &[&str] = &["single_group", "multi_group"];

impl Presentation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presentation::SingleGroup => "single_group",
            Presentation::MultiGroup => "multi_group",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "single_group" => Some(Presentation::SingleGroup),
            "multi_group" => Some(Presentation::MultiGroup),
            _ => None,
        }
    }

    /// Layout used when a catalog file does not declare one.
    pub fn for_group_count(count: usize) -> Self {
        if count == 1 {
            Presentation::SingleGroup
        } else {
            Presentation::MultiGroup
        }
    }
}

impl Serialize for Presentation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Presentation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value)
            .ok_or_else(|| serde::de::Error::unknown_variant(&value, PRESENTATIONS))
    }
}
