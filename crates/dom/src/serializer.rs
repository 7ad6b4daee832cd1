//! HTML serialization of render components.

use crate::component::Component;
use crate::element::Element;

/// Serialize a single element to HTML.
///
/// Inline content is written verbatim: it is script or style text and must
/// reach the browser byte-for-byte or its hash no longer matches.
pub fn serialize_element(elem: &Element) -> String {
    let mut output = String::new();
    write_element(elem, &mut output);
    output
}

/// Serialize a component, descending into nested lists.
pub fn serialize_component(component: &Component) -> String {
    let mut output = String::new();
    write_component(component, &mut output);
    output
}

/// Serialize a list of components, one top-level entry per line.
pub fn serialize_components(components: &[Component]) -> String {
    let mut output = String::new();
    for component in components {
        write_component(component, &mut output);
        output.push('\n');
    }
    output
}

fn write_component(component: &Component, output: &mut String) {
    match component {
        Component::Element(elem) => write_element(elem, output),
        Component::List(items) => {
            for item in items {
                write_component(item, output);
            }
        }
    }
}

fn write_element(elem: &Element, output: &mut String) {
    let tag_name = elem.tag.as_str();

    output.push('<');
    output.push_str(tag_name);

    for (name, value) in elem.attributes.iter() {
        output.push(' ');
        output.push_str(name);
        if !value.is_empty() {
            output.push_str("=\"");
            output.push_str(&escape_html_attribute(value));
            output.push('"');
        }
    }

    output.push('>');

    if elem.is_void() {
        return;
    }

    if let Some(html) = &elem.inner_html {
        output.push_str(html);
    }

    output.push_str("</");
    output.push_str(tag_name);
    output.push('>');
}

/// Escape HTML attribute value.
pub fn escape_html_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
