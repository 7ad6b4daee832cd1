//! The seam between the plugin and the host render pipeline.

use common::CspResult;
use dom::Component;
use serde_json::{Map, Value};

/// Accessors the host exposes while rendering one page.
pub trait RenderHooks {
    /// Components rendered into `<head>`.
    fn head_components(&self) -> &[Component];
    /// Components rendered at the start of `<body>`.
    fn pre_body_components(&self) -> &[Component];
    /// Components rendered at the end of `<body>`.
    fn post_body_components(&self) -> &[Component];
    /// Replace the head component list.
    fn replace_head_components(&mut self, components: Vec<Component>);
}

/// In-memory component lists for a single page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageComponents {
    pub head: Vec<Component>,
    pub pre_body: Vec<Component>,
    pub post_body: Vec<Component>,
}

impl PageComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `{"head": [...], "preBody": [...], "postBody": [...]}`.
    ///
    /// Missing lists are treated as empty.
    pub fn from_json(value: &Value) -> CspResult<Self> {
        let list = |key: &str| match value.get(key) {
            Some(v) => Component::list_from_json(v),
            None => Ok(Vec::new()),
        };

        Ok(Self {
            head: list("head")?,
            pre_body: list("preBody")?,
            post_body: list("postBody")?,
        })
    }

    pub fn from_json_str(json: &str) -> CspResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("head".to_string(), Component::list_to_json(&self.head));
        obj.insert("preBody".to_string(), Component::list_to_json(&self.pre_body));
        obj.insert("postBody".to_string(), Component::list_to_json(&self.post_body));
        Value::Object(obj)
    }
}

impl RenderHooks for PageComponents {
    fn head_components(&self) -> &[Component] {
        &self.head
    }

    fn pre_body_components(&self) -> &[Component] {
        &self.pre_body
    }

    fn post_body_components(&self) -> &[Component] {
        &self.post_body
    }

    fn replace_head_components(&mut self, components: Vec<Component>) {
        self.head = components;
    }
}
