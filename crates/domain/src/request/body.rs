//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// Content type attached to every JSON request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP request body of a test case.
///
/// Bodies are kept as the literal JSON text the case declares, so that the
/// exact document (whitespace included) is what goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Literal JSON document
    Json(String),
}

impl RequestBody {
    /// Creates a JSON body from its literal text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json(content.into())
    }

    /// Checks that the body text is a well-formed JSON document.
    ///
    /// # Errors
    ///
    /// Returns the parser message when the text is not valid JSON.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::None => Ok(()),
            Self::Json(content) => serde_json::from_str::<serde_json::Value>(content)
                .map(|_| ())
                .map_err(|e| e.to_string()),
        }
    }
}
