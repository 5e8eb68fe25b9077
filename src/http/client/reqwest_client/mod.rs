use std::time::Duration;

use async_trait::async_trait;
use http::{Request, Response};
use reqwest::ClientBuilder;

use super::{Transport, TransportError};

/// [`Transport`] over a pooled `reqwest` client.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a default client, `timeout` bounds the whole request.
    pub fn new(timeout: Option<Duration>) -> crate::Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| crate::Error::config(format!("cannot build http client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps a client the caller already configured.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::timeout(err)
        } else {
            TransportError::new(err)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, TransportError> {
        let request = reqwest::Request::try_from(request).map_err(TransportError::unsendable)?;
        let resp = self.client.execute(request).await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        let mut response = Response::new(body.to_vec());
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
