//! Response specification type

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Headers;

/// HTTP response as seen by the assertions of a single case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Value of the `Content-Type` header, if present
    pub content_type: Option<String>,
    /// Response headers
    pub headers: Headers,
    /// Parsed JSON body; `null` when the body is empty or not JSON
    pub body: Value,
    /// Response body as received
    pub raw_body: String,
    /// Response time
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Builds a response from its wire parts.
    ///
    /// The body is decoded lossily as UTF-8 and then parsed as JSON.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: &[u8], duration: Duration) -> Self {
        let raw_body = String::from_utf8_lossy(body).into_owned();
        let parsed = serde_json::from_str(&raw_body).unwrap_or(Value::Null);
        let content_type = headers.get("content-type").map(str::to_string);

        Self {
            status,
            content_type,
            headers,
            body: parsed,
            raw_body,
            duration,
        }
    }

    /// Returns the `Content-Type` value lowercased; media types compare
    /// case-insensitively.
    #[must_use]
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(str::to_ascii_lowercase)
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            content_type: None,
            headers: Headers::new(),
            body: Value::Null,
            raw_body: String::new(),
            duration: Duration::ZERO,
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Truncation is acceptable: durations over ~584 million years are not realistic
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
