// catalog-client/src/client/http.rs
// HTTP 客户端 - 网络通信

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP 客户端 trait
///
/// `get`/`post`/`patch` return `Ok(None)` for a success response without a
/// body (204 or zero-length). Failures are never retried.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>>;
    async fn delete(&self, path: &str) -> ClientResult<()>;
}

/// Decode a response into `T`, `None` for an empty success body.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> ClientResult<Option<T>> {
    if !status.is_success() {
        return Err(ClientError::from_response(status.as_u16(), bytes));
    }
    if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Check the status of a response whose body is ignored.
pub(crate) fn check_status(status: StatusCode, bytes: &[u8]) -> ClientResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::from_response(status.as_u16(), bytes))
    }
}

/// Join a base URL and a resource path with exactly one slash between them
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(status = %status, len = bytes.len(), "HTTP response");
        decode_response(status, &bytes)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        self.send(self.client.get(&url)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");
        self.send(self.client.post(&url).json(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(url = %url, "PATCH");
        self.send(self.client.patch(&url).json(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        tracing::debug!(url = %url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        check_status(status, &bytes)
    }
}
