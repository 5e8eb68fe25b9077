pub mod guild;
use std::{fmt::Display, sync::Arc};

use http::{
    HeaderMap, HeaderValue, Method, Request, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
};
use reqwest::Url;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::Validate;

use crate::consts;

/// Credential attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Authority {
    /// `Authorization: Bot {token}`
    Bot(Arc<str>),
    /// `Authorization: Bearer {token}`, OAuth2 access tokens
    Bearer(Arc<str>),
}

impl std::fmt::Debug for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authority::Bot(_) => f.write_str("Bot(..)"),
            Authority::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

impl Authority {
    pub fn new_bot(token: impl Into<Arc<str>>) -> Self {
        Authority::Bot(token.into())
    }
    pub fn new_bearer(token: impl Into<Arc<str>>) -> Self {
        Authority::Bearer(token.into())
    }
    pub fn token(&self) -> String {
        match self {
            Authority::Bot(token) => format!("Bot {token}"),
            Authority::Bearer(token) => format!("Bearer {token}"),
        }
    }

    pub fn header(&self) -> crate::Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.token())
            .map_err(|_| crate::Error::invalid_request("token is not a valid header value"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// One REST route: how to address it and what comes back.
pub trait Api {
    type Request: Validate;
    type Response: DeserializeOwned + Validate;
    const METHOD: Method;
    fn path(request: &Self::Request) -> String;
    fn query(_request: &Self::Request) -> Vec<(&'static str, String)> {
        Vec::new()
    }
    fn headers(_request: &Self::Request) -> crate::Result<HeaderMap> {
        Ok(HeaderMap::new())
    }
    /// JSON body, `None` for body-less methods
    fn body(_request: &Self::Request) -> crate::Result<Option<Vec<u8>>> {
        Ok(None)
    }
}

pub fn json_body<T: Serialize>(body: &T) -> crate::Result<Option<Vec<u8>>> {
    serde_json::to_vec(body)
        .map(Some)
        .map_err(crate::Error::context("serialize json request"))
}

pub fn json_request<A: Api>(
    request: &A::Request,
    base_url: &str,
    auth: &Authority,
) -> crate::Result<Request<Vec<u8>>> {
    let mut url = Url::parse(&format!("{}{}", base_url, A::path(request)))
        .map_err(|e| crate::Error::invalid_request(format!("invalid url: {e}")))?;
    let query = A::query(request);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    let body = A::body(request)?;
    let mut builder = Request::builder()
        .method(A::METHOD)
        .uri(url.as_str())
        .header(AUTHORIZATION, auth.header()?)
        .header(USER_AGENT, consts::USER_AGENT);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    if let Some(headers) = builder.headers_mut() {
        headers.extend(A::headers(request)?);
    }
    builder
        .body(body.unwrap_or_default())
        .map_err(|e| crate::Error::invalid_request(format!("fail to build request: {e}")))
}

/// Error body of a rejected call, `{"code": 50013, "message": "Missing Permissions"}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseFail {
    #[serde(default)]
    pub code: u32,
    pub message: String,
    /// per-field details on form errors
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ResponseFail {
    /// Decodes the body, or falls back to the status line when it is not a Discord error.
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|_| ResponseFail {
            code: 0,
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_owned(),
            errors: None,
        })
    }
}

impl Display for ResponseFail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{}", self.code, self.message)?;
        if let Some(errors) = &self.errors {
            write!(f, " {errors}")?;
        }
        Ok(())
    }
}
