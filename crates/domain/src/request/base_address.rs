//! Base address all case paths resolve against

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::QueryParams;
use crate::error::{DomainError, DomainResult};

/// Root URL of the service under test.
///
/// Set once before a run and never mutated. Joining keeps any path prefix the
/// base carries, and a case path resolves the same with or without a leading
/// slash (`/posts` and `posts` are the same endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseAddress(Url);

impl BaseAddress {
    /// Parses and validates a base address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBaseAddress` if the string is not an
    /// absolute `http` or `https` URL.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::InvalidBaseAddress(
                "base address is empty".to_string(),
            ));
        }

        let url = Url::parse(raw)
            .map_err(|e| DomainError::InvalidBaseAddress(format!("{e}: {raw}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidBaseAddress(format!(
                "unsupported scheme '{}': {raw}",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(DomainError::InvalidBaseAddress(format!(
                "base address must not carry a query or fragment: {raw}"
            )));
        }

        Ok(Self(url))
    }

    /// Resolves a case path and its query parameters against this base.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBaseAddress` if the joined string no
    /// longer forms a valid URL.
    pub fn join(&self, path: &str, query: &QueryParams) -> DomainResult<Url> {
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = format!("{base}/{path}");

        let mut url = Url::parse(&joined)
            .map_err(|e| DomainError::InvalidBaseAddress(format!("{e}: {joined}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        Ok(url)
    }
}

impl fmt::Display for BaseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_str().trim_end_matches('/'))
    }
}

impl TryFrom<String> for BaseAddress {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<BaseAddress> for String {
    fn from(value: BaseAddress) -> Self {
        value.to_string()
    }
}
