//! Content Security Policy directive store and serializer.

use common::CspError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Directive applied to inline `<script>` hashes.
pub const SCRIPT_SRC: &str = "script-src";
/// Directive applied to inline `<style>` hashes.
pub const STYLE_SRC: &str = "style-src";

/// Directives every page starts from unless defaults are switched off.
pub const DEFAULT_DIRECTIVES: [(&str, &str); 9] = [
    ("base-uri", "'self'"),
    ("default-src", "'self'"),
    ("script-src", "'self'"),
    ("style-src", "'self'"),
    ("object-src", "'none'"),
    ("form-action", "'self'"),
    ("font-src", "'self' data:"),
    ("connect-src", "'self'"),
    ("img-src", "'self' data:"),
];

/// Mapping from directive name to its space-joined source list.
///
/// Iteration follows insertion order; overwriting a directive keeps its
/// original position. An empty value means the directive is left out of the
/// serialized policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct DirectiveMap {
    directives: IndexMap<String, String>,
}

impl DirectiveMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default directive set.
    pub fn defaults() -> Self {
        DEFAULT_DIRECTIVES.iter().copied().collect()
    }

    /// Build the working directive set for a page.
    ///
    /// Starts from [`DirectiveMap::defaults`] when `merge_defaults` is set and
    /// from nothing otherwise, then overlays `user`. A user value replaces the
    /// default for the same directive outright.
    pub fn merge(merge_defaults: bool, user: Option<&DirectiveMap>) -> Self {
        let mut merged = if merge_defaults {
            Self::defaults()
        } else {
            Self::new()
        };

        if let Some(user) = user {
            for (name, value) in user.iter() {
                merged.set(name, value);
            }
        }

        merged
    }

    /// Append hash tokens to a directive.
    ///
    /// When `enabled`, the directive becomes `"<existing> <hashes>"`, with an
    /// absent directive counting as empty. The separator is written even when
    /// `hashes` is empty so deployed policies stay byte-identical.
    pub fn augment_with_hashes(&mut self, directive: &str, enabled: bool, hashes: &str) {
        if !enabled {
            return;
        }

        let existing = self.get(directive).unwrap_or("");
        let augmented = format!("{} {}", existing, hashes);
        self.set(directive, &augmented);
    }

    /// Serialize into the policy string carried by the meta tag.
    ///
    /// Each non-empty directive contributes `"<name> <value>; "`; the final
    /// space is trimmed, leaving the last semicolon in place.
    pub fn to_policy_string(&self) -> String {
        let mut policy = self
            .directives
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .fold(String::new(), |mut acc, (name, value)| {
                acc.push_str(name);
                acc.push(' ');
                acc.push_str(value);
                acc.push_str("; ");
                acc
            });
        policy.pop();
        policy
    }

    /// Set a directive, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: &str) {
        self.directives.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.directives.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.directives.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for DirectiveMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_policy_string())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for DirectiveMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set(name.as_ref(), value.as_ref());
        }
        map
    }
}

/// Directive values arrive from host JSON. Strings are taken as-is; `false`
/// and `null` switch a directive off. Anything else is a configuration error.
impl TryFrom<IndexMap<String, Value>> for DirectiveMap {
    type Error = CspError;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut map = Self::new();
        for (name, value) in raw {
            match value {
                Value::String(s) => map.set(&name, &s),
                Value::Bool(false) | Value::Null => map.set(&name, ""),
                other => {
                    return Err(CspError::config(format!(
                        "directive {} must be a string, false or null, found {}",
                        name, other
                    )))
                }
            }
        }
        Ok(map)
    }
}
