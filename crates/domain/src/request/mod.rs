//! HTTP Request domain types

mod base_address;
mod body;
mod method;
mod query;
mod spec;

pub use base_address::BaseAddress;
pub use body::{JSON_CONTENT_TYPE, RequestBody};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::{DEFAULT_TIMEOUT_MS, RequestSpec};
