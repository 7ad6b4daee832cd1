//! Element attribute handling.

use indexmap::IndexMap;
use std::sync::Arc;

/// Map of element attributes preserving insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attrs: IndexMap<Arc<str>, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.attrs.insert(Arc::from(name), value.to_string());
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    /// Get number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Get attribute names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(|k| k.as_ref())
    }
}

/// Map a React-style prop name onto its HTML attribute name.
///
/// `httpEquiv` becomes `http-equiv`, the handful of renamed props
/// (`className`, `htmlFor`, `charSet`) map to their HTML spelling, and
/// everything else passes through untouched.
pub fn prop_to_attribute(prop: &str) -> String {
    match prop {
        "className" => "class".to_string(),
        "htmlFor" => "for".to_string(),
        "charSet" => "charset".to_string(),
        "httpEquiv" => "http-equiv".to_string(),
        "crossOrigin" => "crossorigin".to_string(),
        "noModule" => "nomodule".to_string(),
        "referrerPolicy" => "referrerpolicy".to_string(),
        p => p.to_string(),
    }
}

/// Inverse of [`prop_to_attribute`] for the names it renames.
pub fn attribute_to_prop(attr: &str) -> String {
    match attr {
        "class" => "className".to_string(),
        "for" => "htmlFor".to_string(),
        "charset" => "charSet".to_string(),
        "http-equiv" => "httpEquiv".to_string(),
        "crossorigin" => "crossOrigin".to_string(),
        "nomodule" => "noModule".to_string(),
        "referrerpolicy" => "referrerPolicy".to_string(),
        a => a.to_string(),
    }
}
