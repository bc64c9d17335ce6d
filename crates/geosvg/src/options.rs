use geosvg_render::Padding;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Decides which feature properties are copied onto rendered elements as attributes.
#[derive(Clone)]
pub enum PropertyFilter {
    /// Keep exactly the listed property keys.
    Only(Vec<String>),
    /// Keep the keys accepted by a predicate.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl PropertyFilter {
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(keys.into_iter().map(Into::into).collect())
    }

    pub fn custom(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn allows(&self, key: &str) -> bool {
        match self {
            Self::Only(keys) => keys.iter().any(|k| k == key),
            Self::Custom(f) => f(key),
        }
    }
}

/// Only `class` is copied by default.
impl Default for PropertyFilter {
    fn default() -> Self {
        Self::only(["class"])
    }
}

impl std::fmt::Debug for PropertyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Only(keys) => f.debug_tuple("Only").field(keys).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Drawing settings in a serializable form, e.g. loaded from a JSON config file.
///
/// ```json
/// {
///   "padding": { "top": 10, "right": 10, "bottom": 10, "left": 10 },
///   "attributes": { "class": "map" },
///   "properties": ["class", "id"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrawOptions {
    /// Replaces the drawing's padding when set.
    pub padding: Option<Padding>,
    /// Attributes of the root `<svg>` element.
    pub attributes: BTreeMap<String, String>,
    /// Feature properties to copy onto elements. `None` keeps the default (`class` only).
    pub properties: Option<Vec<String>>,
}

impl DrawOptions {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
