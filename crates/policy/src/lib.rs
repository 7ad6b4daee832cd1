//! Content Security Policy assembly.
//!
//! This crate builds hash-based policies for server-rendered pages:
//! - Directive defaults, merging and serialization
//! - Hash source expressions for inline content
//! - Discovery of inline scripts and styles across render hooks

pub mod collector;
pub mod csp;
pub mod hash;

pub use collector::{collect_elements, get_hashes, hash_tokens};
pub use csp::{DirectiveMap, DEFAULT_DIRECTIVES, SCRIPT_SRC, STYLE_SRC};
pub use hash::{HashAlgorithm, HashToken};
