//! Component trees as handed over by the host render pipeline.
//!
//! Render hooks return lists whose entries are either elements or further
//! lists (a component that renders several elements). The JSON shape mirrors
//! what a React-based static-site generator serializes:
//!
//! ```json
//! [{"type": "script", "props": {"dangerouslySetInnerHTML": {"__html": "..."}}},
//!  [{"type": "link", "props": {"rel": "preload", "href": "/app.js"}}]]
//! ```

use crate::attributes::{attribute_to_prop, prop_to_attribute};
use crate::element::{Element, TagName};
use common::{CspError, CspResult};
use serde_json::{Map, Value};

const INNER_HTML_PROP: &str = "dangerouslySetInnerHTML";
const INNER_HTML_KEY: &str = "__html";

/// One entry of a render-hook list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Component {
    Element(Element),
    List(Vec<Component>),
}

impl Component {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Component::Element(e) => Some(e),
            Component::List(_) => None,
        }
    }

    /// Decode a component tree from its JSON form.
    pub fn from_json(value: &Value) -> CspResult<Self> {
        match value {
            Value::Array(items) => Ok(Component::List(decode_list(items)?)),
            Value::Object(obj) => decode_element(obj).map(Component::Element),
            other => Err(CspError::parse(format!(
                "expected an element object or a list, found {}",
                json_kind(other)
            ))),
        }
    }

    /// Decode a render-hook list. `null` entries are skipped, as React skips them.
    pub fn list_from_json(value: &Value) -> CspResult<Vec<Component>> {
        match value {
            Value::Array(items) => decode_list(items),
            Value::Null => Ok(Vec::new()),
            other => Err(CspError::parse(format!(
                "expected a component list, found {}",
                json_kind(other)
            ))),
        }
    }

    /// Encode back into the host's JSON shape.
    pub fn to_json(&self) -> Value {
        match self {
            Component::List(items) => Value::Array(items.iter().map(Component::to_json).collect()),
            Component::Element(elem) => {
                let mut props = Map::new();
                for (name, value) in elem.attributes.iter() {
                    props.insert(attribute_to_prop(name), Value::String(value.to_string()));
                }
                if let Some(html) = &elem.inner_html {
                    let mut inner = Map::new();
                    inner.insert(INNER_HTML_KEY.to_string(), Value::String(html.clone()));
                    props.insert(INNER_HTML_PROP.to_string(), Value::Object(inner));
                }

                let mut obj = Map::new();
                obj.insert("type".to_string(), Value::String(elem.tag.to_string()));
                obj.insert("props".to_string(), Value::Object(props));
                Value::Object(obj)
            }
        }
    }

    /// Encode a whole list.
    pub fn list_to_json(components: &[Component]) -> Value {
        Value::Array(components.iter().map(Component::to_json).collect())
    }
}

impl From<Element> for Component {
    fn from(elem: Element) -> Self {
        Component::Element(elem)
    }
}

/// Flatten a list exactly one level deep.
///
/// `[[a, b], c]` yields `[a, b, c]`; `[[[a]]]` yields `[[a]]`, whose single
/// entry is still a list.
pub fn flatten_one(components: &[Component]) -> impl Iterator<Item = &Component> {
    components.iter().flat_map(|c| match c {
        Component::List(items) => items.iter(),
        single => std::slice::from_ref(single).iter(),
    })
}

fn decode_list(items: &[Value]) -> CspResult<Vec<Component>> {
    items
        .iter()
        .filter(|v| !v.is_null())
        .map(Component::from_json)
        .collect()
}

fn decode_element(obj: &Map<String, Value>) -> CspResult<Element> {
    let tag = match obj.get("type") {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(CspError::parse(format!(
                "element type must be a string, found {}",
                json_kind(other)
            )))
        }
        None => return Err(CspError::parse("element is missing its type")),
    };

    let mut elem = Element::new(TagName::new(tag));

    let props = match obj.get("props") {
        Some(Value::Object(props)) => props,
        Some(Value::Null) | None => return Ok(elem),
        Some(other) => {
            return Err(CspError::parse(format!(
                "props of <{}> must be an object, found {}",
                tag,
                json_kind(other)
            )))
        }
    };

    for (name, value) in props {
        if name == INNER_HTML_PROP {
            elem.inner_html = decode_inner_html(tag, value)?;
            continue;
        }

        match value {
            Value::String(s) => elem.attributes.set(&prop_to_attribute(name), s),
            Value::Number(n) => elem.attributes.set(&prop_to_attribute(name), &n.to_string()),
            Value::Bool(true) => elem.attributes.set(&prop_to_attribute(name), ""),
            Value::Bool(false) | Value::Null => {}
            _ => tracing::trace!("skipping non-scalar prop {} on <{}>", name, tag),
        }
    }

    Ok(elem)
}

fn decode_inner_html(tag: &str, value: &Value) -> CspResult<Option<String>> {
    let inner = match value {
        Value::Object(inner) => inner,
        Value::Null => return Ok(None),
        other => {
            return Err(CspError::malformed(
                tag,
                format!("{} must be an object, found {}", INNER_HTML_PROP, json_kind(other)),
            ))
        }
    };

    match inner.get(INNER_HTML_KEY) {
        Some(Value::String(html)) => Ok(Some(html.clone())),
        None => Ok(None),
        Some(other) => Err(CspError::malformed(
            tag,
            format!("{} must be a string, found {}", INNER_HTML_KEY, json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
