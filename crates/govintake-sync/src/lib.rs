//! Fetch layer: GraphQL request documents and response decoding, plus an
//! HTTP client behind the `http` feature.

mod error;
pub mod graphql;

#[cfg(feature = "http")]
pub mod http;

pub use error::SyncError;
pub use graphql::{build_query, decode_response};

#[cfg(feature = "http")]
pub use http::SyncClient;
