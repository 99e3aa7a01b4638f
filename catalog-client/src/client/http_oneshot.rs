// catalog-client/src/client/http_oneshot.rs
// Oneshot HTTP 客户端 - 内存通信
//
// 需要启用 "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{HttpClient, check_status, decode_response};
use crate::{ClientError, ClientResult};

/// Oneshot HTTP 客户端 (内存调用)
///
/// 使用 Tower Service 的 oneshot 模式直接调用 Router，
/// 适用于同进程托管 API 的场景和测试，零网络开销。
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use catalog_client::{CatalogState, ClientConfig, OneshotHttpClient};
///
/// let router: Router = build_api().with_state(state);
/// let catalog = CatalogState::new(OneshotHttpClient::new(router), &ClientConfig::default());
/// catalog.categories().fetch_all(false).await;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// 创建新的 Oneshot HTTP 客户端
    ///
    /// # Arguments
    /// * `router` - 已初始化的 Axum Router (with_state 已调用)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn uri(path: &str) -> String {
        format!("/{}", path.trim_start_matches('/'))
    }

    /// 构建请求
    fn build_request(method: Method, path: &str, body: Option<Vec<u8>>) -> ClientResult<Request<Body>> {
        let builder = Request::builder()
            .method(method)
            .uri(Self::uri(path))
            .header(header::CONTENT_TYPE, "application/json");
        let body = body.map(Body::from).unwrap_or_else(Body::empty);
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// 执行请求, 返回状态码和响应体
    async fn execute(&self, request: Request<Body>) -> ClientResult<(http::StatusCode, Vec<u8>)> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        Ok((status, body_bytes.to_vec()))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Option<T>> {
        tracing::debug!(method = %method, path = %path, "in-process request");
        let request = Self::build_request(method, path, body)?;
        let (status, bytes) = self.execute(request).await?;
        decode_response(status, &bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        self.request(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let bytes = serde_json::to_vec(body)?;
        self.request(Method::POST, path, Some(bytes)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let bytes = serde_json::to_vec(body)?;
        self.request(Method::PATCH, path, Some(bytes)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        tracing::debug!(path = %path, "in-process DELETE");
        let request = Self::build_request(Method::DELETE, path, None)?;
        let (status, bytes) = self.execute(request).await?;
        check_status(status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::{Value, json};

    fn router() -> Router {
        Router::new()
            .route("/things/", get(|| async { Json(json!([{"id": 1}])) }))
            .route(
                "/things/1",
                get(|| async { StatusCode::NO_CONTENT })
                    .patch(|Json(body): Json<Value>| async move { Json(body) })
                    .delete(|| async {
                        (StatusCode::CONFLICT, Json(json!({"detail": "in use"})))
                    }),
            )
    }

    #[tokio::test]
    async fn test_get_json() {
        let client = OneshotHttpClient::new(router());
        let things: Option<Vec<Value>> = client.get("things/").await.unwrap();
        assert_eq!(things, Some(vec![json!({"id": 1})]));
    }

    #[tokio::test]
    async fn test_get_no_content() {
        let client = OneshotHttpClient::new(router());
        let thing: Option<Value> = client.get("/things/1").await.unwrap();
        assert!(thing.is_none());
    }

    #[tokio::test]
    async fn test_patch_sends_json_body() {
        let client = OneshotHttpClient::new(router());
        let echoed: Option<Value> = client.patch("things/1", &json!({"name": "x"})).await.unwrap();
        assert_eq!(echoed, Some(json!({"name": "x"})));
    }

    #[tokio::test]
    async fn test_delete_error() {
        let client = OneshotHttpClient::new(router());
        let err = client.delete("things/1").await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "in use");
    }

    #[tokio::test]
    async fn test_unknown_route_is_api_error() {
        let client = OneshotHttpClient::new(router());
        let err = client.get::<Value>("missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP Error 404");
    }
}
