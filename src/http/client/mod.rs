pub mod reqwest_client;
use std::sync::Arc;

use async_trait::async_trait;
use http::{Request, Response, StatusCode};

use crate::{
    error::{ErrorKind, SchemaError},
    http::api::{Api, Authority, ResponseFail, json_request},
};

pub use reqwest_client::ReqwestTransport;

/// The network underneath the client.
///
/// Non-2xx answers are responses, not errors: only a request that produced no
/// response at all (refused, reset, timed out) is a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError>;
}

#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct TransportError {
    source: Box<dyn std::error::Error + Send + Sync>,
    reason: FailReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailReason {
    Io,
    Timeout,
    /// the transport could not represent the request, nothing was sent
    Unsendable,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
            reason: FailReason::Io,
        }
    }
    pub fn timeout(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
            reason: FailReason::Timeout,
        }
    }
    pub fn unsendable(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
            reason: FailReason::Unsendable,
        }
    }
    pub fn is_timeout(&self) -> bool {
        self.reason == FailReason::Timeout
    }
    pub fn is_unsendable(&self) -> bool {
        self.reason == FailReason::Unsendable
    }
}

/// Sends [`Api`] requests over a [`Transport`] and types what comes back.
#[derive(Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: Arc<T>,
    base_url: Arc<str>,
    authority: Authority,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_url: self.base_url.clone(),
            authority: self.authority.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: &str, authority: Authority) -> Self {
        Self {
            transport: Arc::new(transport),
            base_url: base_url.trim_end_matches('/').into(),
            authority,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request is validated before it leaves, the response after it
    /// arrives; either failing yields [`ErrorKind::Schema`].
    ///
    /// ```rust,no_run,ignore
    /// let guild = client.send::<GetGuild>(&GetGuildRequest::new(id)).await?;
    /// ```
    pub async fn send<A: Api>(&self, request: &A::Request) -> crate::Result<A::Response> {
        validator::Validate::validate(request)
            .map_err(crate::Error::context("validate request"))?;
        let request = json_request::<A>(request, &self.base_url, &self.authority)?;
        let method = request.method().clone();
        let uri = request.uri().clone();
        tracing::debug!(%method, %uri, "send request");
        let response = self.transport.execute(request).await.map_err(|e| {
            if e.is_unsendable() {
                return crate::Error::invalid_request(format!("cannot send request: {e}"));
            }
            tracing::warn!(%method, %uri, %e, "request did not complete");
            crate::Error::new(e.into(), "send request")
        })?;
        let status = response.status();
        if !status.is_success() {
            let fail = ResponseFail::from_body(status, response.body());
            tracing::warn!(%method, %uri, %status, code = fail.code, message = %fail.message, "request rejected");
            return Err(crate::Error::new(classify(status, fail), "response status"));
        }
        let parsed = serde_json::from_slice::<A::Response>(response.body()).map_err(|e| {
            crate::Error::new(ErrorKind::Schema(SchemaError::Decode(e)), "parse response")
        })?;
        validator::Validate::validate(&parsed)
            .map_err(crate::Error::context("validate response"))?;
        tracing::debug!(%method, %uri, %status, "request done");
        Ok(parsed)
    }
}

fn classify(status: StatusCode, fail: ResponseFail) -> ErrorKind {
    match status.as_u16() {
        401 => ErrorKind::Auth(fail),
        403 => ErrorKind::Permission(fail),
        404 => ErrorKind::NotFound(fail),
        _ => ErrorKind::Status { status, fail },
    }
}
