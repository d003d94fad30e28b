use anyhow::{Context, Error};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use reqwest_tracing::TracingMiddleware;
use std::collections::HashMap;
use thiserror::Error as ThisError;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Requests are sent once. Failed requests are reported to the caller
/// instead of being retried.
#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
    #[error("Request to {url} was rejected with status {status}")]
    Rejected {
        url: Url,
        status: StatusCode,
        message: Option<String>,
    },
}

impl HttpClientError {
    /// The `message` the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            HttpClientError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<HashMap<&'static str, String>> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: HashMap<&'static str, String>) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();

        for (key, value) in value.into_iter() {
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} {key}")))?;
            header_map.insert(key, value);
        }
        Ok(Self(header_map))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    pub fn new() -> Self {
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(TracingMiddleware::default())
            .build();
        Self { client }
    }

    pub fn bearer_header(token: &str) -> HashMap<&'static str, String> {
        HashMap::from([("authorization", format!("Bearer {token}"))])
    }

    pub async fn get_json<DTO: DeserializeOwned>(&self, url: Url) -> Result<DTO, HttpClientError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?;
        Self::parse_json(url, response).await
    }

    pub async fn post_json<DTO: DeserializeOwned>(
        &self,
        url: Url,
        headers: HashMap<&'static str, String>,
        body: Value,
    ) -> Result<DTO, HttpClientError> {
        let mut header_map = HeadersMapGenerator::try_from(headers)?.into_inner();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = serde_json::to_vec(&body).context("Failed to serialize request body")?;
        let response = self
            .client
            .post(url.clone())
            .headers(header_map)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to post request to {url}"))?;
        Self::parse_json(url, response).await
    }

    async fn parse_json<DTO: DeserializeOwned>(
        url: Url,
        response: Response,
    ) -> Result<DTO, HttpClientError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to get text response")?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| body.get("message").and_then(Value::as_str).map(String::from));
            return Err(HttpClientError::Rejected {
                url,
                status,
                message,
            });
        }

        serde_json::from_str::<DTO>(&text)
            .with_context(|| format!("Failed to deserialize response {text}"))
            .map_err(HttpClientError::ResponseError)
    }
}
