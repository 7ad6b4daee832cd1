//! Render-node model for server-rendered page components.
//!
//! This crate models the head and body components a static-site render
//! pipeline produces, decodes them from the host's JSON shape, and
//! serializes them back to HTML.

pub mod attributes;
pub mod component;
pub mod element;
pub mod serializer;

pub use attributes::AttributeMap;
pub use component::{flatten_one, Component};
pub use element::{Element, TagName};
pub use serializer::{serialize_component, serialize_components, serialize_element};
