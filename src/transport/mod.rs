//! Single HTTP round trips to the provider.
//!
//! [`Transport`] is the seam between request shaping and the network:
//! [`HttpTransport`] performs real requests, tests substitute a recorder.

pub mod form;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use std::fmt;

use crate::error::ClientResult;

pub use form::{FormValue, Payload};
pub use http::HttpTransport;

/// The verbs the provider API understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// GET and DELETE carry parameters in the query string; POST uses a
    /// multipart body so files can be attached.
    pub fn uses_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully shaped request, ready to send
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub params: Payload,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Undecoded provider response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one request. Non-2xx statuses are not errors here;
    /// the provider reports failures in the body.
    async fn execute(&self, request: ApiRequest) -> ClientResult<RawResponse>;
}
