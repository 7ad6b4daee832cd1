//! Plugin configuration.

use common::{CspError, CspResult};
use csp_policy::DirectiveMap;
use serde::Deserialize;
use std::path::Path;

/// Options the host passes to the plugin for each render pass.
///
/// Field names follow the host's camelCase option keys when loaded from
/// JSON; missing keys take the defaults below and unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Skip injection entirely in development builds.
    pub disable_on_dev: bool,
    /// Emit `Content-Security-Policy-Report-Only` instead of an enforcing policy.
    pub report_only: bool,
    /// Append hashes of inline scripts to `script-src`.
    pub merge_script_hashes: bool,
    /// Append hashes of inline styles to `style-src`.
    pub merge_style_hashes: bool,
    /// Start from the built-in directive set.
    pub merge_default_directives: bool,
    /// User directives overlaid on the defaults.
    pub directives: Option<DirectiveMap>,
}

impl PluginOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from the host's JSON option object.
    pub fn from_json_str(json: &str) -> CspResult<Self> {
        serde_json::from_str(json).map_err(|err| {
            if err.is_data() {
                CspError::config(err.to_string())
            } else {
                CspError::Json(err)
            }
        })
    }

    /// Load options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CspResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_disable_on_dev(mut self, disable: bool) -> Self {
        self.disable_on_dev = disable;
        self
    }

    pub fn with_report_only(mut self, report_only: bool) -> Self {
        self.report_only = report_only;
        self
    }

    pub fn with_script_hashes(mut self, merge: bool) -> Self {
        self.merge_script_hashes = merge;
        self
    }

    pub fn with_style_hashes(mut self, merge: bool) -> Self {
        self.merge_style_hashes = merge;
        self
    }

    pub fn with_default_directives(mut self, merge: bool) -> Self {
        self.merge_default_directives = merge;
        self
    }

    pub fn with_directives(mut self, directives: DirectiveMap) -> Self {
        self.directives = Some(directives);
        self
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            disable_on_dev: true,
            report_only: false,
            merge_script_hashes: true,
            merge_style_hashes: true,
            merge_default_directives: true,
            directives: None,
        }
    }
}

/// Kind of build the page is rendered for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildEnv {
    Development,
    #[default]
    Production,
}

impl BuildEnv {
    /// Map a `NODE_ENV`-style value; only `"development"` means development.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("development") => BuildEnv::Development,
            _ => BuildEnv::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, BuildEnv::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = PluginOptions::default();
        assert!(options.disable_on_dev);
        assert!(!options.report_only);
        assert!(options.merge_script_hashes);
        assert!(options.merge_style_hashes);
        assert!(options.merge_default_directives);
        assert!(options.directives.is_none());
    }

    #[test]
    fn test_from_json_camel_case() {
        let options = PluginOptions::from_json_str(
            r#"{
                "plugins": [],
                "reportOnly": true,
                "mergeStyleHashes": false,
                "directives": {"script-src": "'self' https://www.google-analytics.com", "object-src": false}
            }"#,
        )
        .unwrap();

        assert!(options.report_only);
        assert!(!options.merge_style_hashes);
        assert!(options.merge_script_hashes);
        let directives = options.directives.unwrap();
        assert_eq!(
            directives.get("script-src"),
            Some("'self' https://www.google-analytics.com")
        );
        assert_eq!(directives.get("object-src"), Some(""));
    }

    #[test]
    fn test_directives_must_be_mapping() {
        let err = PluginOptions::from_json_str(r#"{"directives": "default-src 'self'"}"#)
            .unwrap_err();
        assert!(matches!(err, CspError::Config(_)));

        let err = PluginOptions::from_json_str(r#"{"directives": {"img-src": 1}}"#).unwrap_err();
        assert!(matches!(err, CspError::Config(_)));
    }

    #[test]
    fn test_syntax_error_is_json_error() {
        let err = PluginOptions::from_json_str("{").unwrap_err();
        assert!(matches!(err, CspError::Json(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"disableOnDev": false}}"#).unwrap();

        let options = PluginOptions::from_path(file.path()).unwrap();
        assert!(!options.disable_on_dev);
    }

    #[test]
    fn test_build_env() {
        assert!(BuildEnv::from_node_env(Some("development")).is_development());
        assert!(!BuildEnv::from_node_env(Some("production")).is_development());
        assert!(!BuildEnv::from_node_env(None).is_development());
    }
}
