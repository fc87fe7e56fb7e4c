//! Structured errors for machine parsing

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("[{code:?}] {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidCapability,
    InvalidParameter,
    /// A required OS identity lookup failed; continuing would use a wrong home directory.
    ConfigurationFatal,
    UnsupportedPlatform,
    ActionFailed,
    Unknown,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestions: Vec::new(),
            context: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn invalid_capability(kind: &str) -> Self {
        Self::new(
            ErrorCode::InvalidCapability,
            format!("{} is not a valid type", kind),
        )
        .with_suggestions(
            crate::capability::KIND_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn invalid_parameter(kind: &str, param: &str, expected: &[&str]) -> Self {
        Self::new(
            ErrorCode::InvalidParameter,
            format!("{} is not a valid parameter for {}", param, kind),
        )
        .with_suggestions(expected.iter().map(|s| s.to_string()).collect())
    }

    pub fn configuration_fatal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationFatal, message)
    }

    pub fn unsupported_platform() -> Self {
        Self::new(
            ErrorCode::UnsupportedPlatform,
            "Privacy permissions are only tracked on macOS",
        )
    }

    pub fn action_failed(action: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::ActionFailed,
            format!("{} failed: {}", action, reason),
        )
    }

    pub fn is_fatal(&self) -> bool {
        self.code == ErrorCode::ConfigurationFatal
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = Error::invalid_capability("bad-type");
        assert_eq!(err.to_string(), "[InvalidCapability] bad-type is not a valid type");
        assert!(!err.suggestions.is_empty());
    }

    #[test]
    fn serializes_code_in_screaming_case() {
        let err = Error::configuration_fatal("no passwd entry");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CONFIGURATION_FATAL");
        assert!(json.get("suggestions").is_none());
        assert!(err.is_fatal());
    }
}
