//! # CORS ヘッダーミドルウェア
//!
//! ブラウザの管理画面から直接呼び出されるため、
//! 成功・エラー・プリフライトを問わず全レスポンスに CORS ヘッダーを付与する。

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// 許可するリクエストヘッダー
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// レスポンスに CORS ヘッダーを付与する
pub async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/fail", get(|| async { StatusCode::BAD_REQUEST }))
            .layer(from_fn(cors_headers))
    }

    async fn allow_headers(uri: &str) -> (StatusCode, Option<String>, Option<String>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let header_of = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        (
            response.status(),
            header_of(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            header_of(header::ACCESS_CONTROL_ALLOW_HEADERS),
        )
    }

    #[tokio::test]
    async fn test_成功レスポンスにcorsヘッダーを付与する() {
        let (status, origin, headers) = allow_headers("/ok").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(headers.as_deref(), Some(ALLOWED_HEADERS));
    }

    #[tokio::test]
    async fn test_エラーレスポンスにもcorsヘッダーを付与する() {
        let (status, origin, headers) = allow_headers("/fail").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(origin.as_deref(), Some("*"));
        assert_eq!(headers.as_deref(), Some(ALLOWED_HEADERS));
    }

    #[tokio::test]
    async fn test_存在しないパスの404にもcorsヘッダーを付与する() {
        let (status, origin, _) = allow_headers("/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(origin.as_deref(), Some("*"));
    }
}
