use std::borrow::Cow;

use http::StatusCode;

use crate::http::{api::ResponseFail, client::TransportError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Cow<'static, str>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }
    pub const fn context<K: Into<ErrorKind>>(
        context: impl Into<Cow<'static, str>>,
    ) -> impl FnOnce(K) -> Error {
        move |kind| Error::new(kind.into(), context)
    }
    pub fn invalid_request(context: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidRequest, context)
    }
    pub fn config(context: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, context)
    }
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
    pub fn context_str(&self) -> &str {
        &self.context
    }
    /// Status code of the rejected response, if the remote answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.kind {
            ErrorKind::Auth(_) => Some(StatusCode::UNAUTHORIZED),
            ErrorKind::Permission(_) => Some(StatusCode::FORBIDDEN),
            ErrorKind::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }
    pub fn is_schema(&self) -> bool {
        matches!(self.kind, ErrorKind::Schema(_))
    }
}

impl From<serde_json::Error> for ErrorKind {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJson(err)
    }
}

impl From<TransportError> for ErrorKind {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<SchemaError> for ErrorKind {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<validator::ValidationErrors> for ErrorKind {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Schema(SchemaError::Constraint(err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The request never produced a response: connect failure, timeout, reset.
    #[error("transport error: {0}")]
    Transport(TransportError),
    #[error("unauthorized: {0}")]
    Auth(ResponseFail),
    #[error("missing permission: {0}")]
    Permission(ResponseFail),
    #[error("not found: {0}")]
    NotFound(ResponseFail),
    #[error("schema violation: {0}")]
    Schema(SchemaError),
    /// Any other non-2xx answer (bad request, rate limited, server error).
    #[error("request failed with {status}: {fail}")]
    Status {
        status: StatusCode,
        fail: ResponseFail,
    },
    #[error("serde_json error: {0}")]
    SerdeJson(serde_json::Error),
    #[error("invalid request")]
    InvalidRequest,
    #[error("invalid configuration")]
    Config,
}

/// A body that does not fit the guild schema, in either direction.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("cannot decode body: {0}")]
    Decode(serde_json::Error),
    #[error("{0}")]
    Constraint(validator::ValidationErrors),
    #[error("image size {0} is not a power of two in [16, 4096]")]
    ImageSize(u32),
    #[error("format {format} is not available for {kind}")]
    ImageFormat {
        kind: &'static str,
        format: &'static str,
    },
}
