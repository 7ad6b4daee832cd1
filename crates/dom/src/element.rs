//! Render elements.

use crate::attributes::AttributeMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Element type tag, interned.
///
/// Comparison is exact: `"Script"` and `"script"` are different tags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    pub fn new(name: &str) -> Self {
        static INTERNED: Lazy<RwLock<HashMap<String, Arc<str>>>> =
            Lazy::new(|| RwLock::new(HashMap::new()));

        {
            let cache = INTERNED.read();
            if let Some(s) = cache.get(name) {
                return TagName(s.clone());
            }
        }

        let mut cache = INTERNED.write();
        let s = cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::from(name))
            .clone();
        TagName(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn script() -> Self {
        Self::new("script")
    }
    pub fn style() -> Self {
        Self::new("style")
    }
    pub fn meta() -> Self {
        Self::new("meta")
    }

    /// Whether the tag is an HTML void element.
    pub fn is_void(&self) -> bool {
        matches!(
            self.as_str(),
            "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
                | "param" | "source" | "track" | "wbr"
        )
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

/// A single element produced by the host render pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Element type tag.
    pub tag: TagName,
    /// Attributes, in render order.
    pub attributes: AttributeMap,
    /// Inline literal content (script or style text set as raw inner HTML).
    pub inner_html: Option<String>,
}

impl Element {
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: AttributeMap::new(),
            inner_html: None,
        }
    }

    /// Shorthand for `Element::new(TagName::new(tag))`.
    pub fn tag(tag: &str) -> Self {
        Self::new(TagName::new(tag))
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = Some(html.into());
        self
    }

    /// Inline script with the given source text.
    pub fn inline_script(source: impl Into<String>) -> Self {
        Self::new(TagName::script()).with_inner_html(source)
    }

    /// Inline stylesheet with the given CSS text.
    pub fn inline_style(css: impl Into<String>) -> Self {
        Self::new(TagName::style()).with_inner_html(css)
    }

    /// External script referenced by URL.
    pub fn external_script(src: &str) -> Self {
        Self::new(TagName::script()).with_attribute("src", src)
    }

    /// The `<meta http-equiv=... content=...>` element carrying a policy.
    pub fn meta_csp(header: &str, policy: &str) -> Self {
        Self::new(TagName::meta())
            .with_attribute("http-equiv", header)
            .with_attribute("content", policy)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Inline content, if present and non-empty.
    pub fn inline_content(&self) -> Option<&str> {
        self.inner_html.as_deref().filter(|html| !html.is_empty())
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.tag.is_void()
    }
}
