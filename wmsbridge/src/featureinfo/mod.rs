//! WMS GetFeatureInfo client.
//!
//! One query per click: build the request URL from the viewport snapshot,
//! GET it through an injected HTTP client, deserialize the JSON feature
//! collection. No caching, no retries, no de-duplication between
//! overlapping queries.

mod http;
mod service;
mod types;

use thiserror::Error;

pub use http::{AsyncHttpClient, ReqwestClient};
pub use service::FeatureInfoService;
pub use types::{Feature, FeatureCollection};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;

/// Errors that can occur while querying feature information.
///
/// All of these are per-query and recoverable: they reach the controller's
/// query-failure hook and never affect overlay state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeatureInfoError {
    /// Transport-level failure: connection, non-success status, body read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body was not the expected JSON shape.
    #[error("malformed feature info body: {0}")]
    MalformedBody(String),
}
