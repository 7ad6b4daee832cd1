//! Common error types.

use thiserror::Error;

/// Error raised while assembling a Content-Security-Policy for a page.
///
/// Every variant halts the page render: a broken policy is never emitted.
#[derive(Error, Debug)]
pub enum CspError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed inline content on <{tag}>: {reason}")]
    MalformedContent { tag: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CspResult<T> = Result<T, CspError>;

impl CspError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedContent {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = CspError::malformed("script", "__html is a number");
        assert_eq!(
            err.to_string(),
            "Malformed inline content on <script>: __html is a number"
        );
    }

    #[test]
    fn test_json_error_converts() {
        fn parse() -> CspResult<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }
        assert!(matches!(parse(), Err(CspError::Json(_))));
    }
}
