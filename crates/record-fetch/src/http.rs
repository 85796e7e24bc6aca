use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use crate::errors::TransportError;
use crate::ports::{HttpPort, HttpReply};

/// reqwest-backed transport.
#[derive(Clone, Debug)]
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    /// Build a client; `timeout` bounds each whole request when set.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self { client })
    }

    async fn complete(
        url: &str,
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<HttpReply, TransportError> {
        let response = sent.map_err(|err| map_error(url, err))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| map_error(url, err))?;
        Ok(HttpReply { status, body })
    }
}

fn map_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(url.to_string())
    } else {
        TransportError::Request {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl HttpPort for ReqwestHttp {
    async fn get_json(&self, url: &str) -> Result<HttpReply, TransportError> {
        let sent = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await;
        Self::complete(url, sent).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError> {
        let sent = self.client.post(url).json(body).send().await;
        Self::complete(url, sent).await
    }
}
