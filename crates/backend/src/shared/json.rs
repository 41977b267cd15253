use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::shared::error::ApiError;

/// `Json` body extractor whose rejections render as `400 {"detail": ...}`
/// like every other handler error
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    async fn echo(ApiJson(body): ApiJson<Named>) -> String {
        body.name
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, Value) {
        let app = Router::new().route("/", post(echo));
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = app
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap()
            .into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_rejections_are_bad_requests_with_detail() {
        for (content_type, body) in [
            (Some("application/json"), r#"{"name": 5}"#),
            (Some("application/json"), r#"{"other": "x"}"#),
            (Some("application/json"), "{not json"),
            (None, r#"{"name": "x"}"#),
        ] {
            let (status, value) = send(content_type, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert!(value["detail"].is_string(), "{body}");
        }
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let app = Router::new().route("/", post(echo));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name": "node-1"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"node-1");
    }
}
