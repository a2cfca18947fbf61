//! # Request ID の引き継ぎ
//!
//! 受信したリクエストの `X-Request-Id` を、同じリクエストの処理中に行う
//! 認証基盤・プロフィールストアへの呼び出しに付け直す。
//!
//! `SetRequestIdLayer` が決めた ID を [`store_request_id`] が task-local に置き、
//! 外向きの reqwest 呼び出しは [`inject_request_id`] でそれをヘッダーに写す。
//! task-local 本体は `user_admin_shared::observability` にあり、
//! インフラ層の PostgREST クライアントも同じ値を読む。

use axum::{extract::Request, middleware::Next, response::Response};
use reqwest::RequestBuilder;
use tower_http::request_id::RequestId;
use user_admin_shared::observability::{REQUEST_ID_HEADER, current_request_id, scope_request_id};

/// ID が取得できない場合に使う値
const UNKNOWN_REQUEST_ID: &str = "-";

/// 後続の処理を Request ID のスコープ内で実行するミドルウェア
pub async fn store_request_id(request: Request, next: Next) -> Response {
    let id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map_or_else(|| UNKNOWN_REQUEST_ID.to_string(), str::to_string);

    scope_request_id(id, next.run(request)).await
}

/// スコープ内であれば `X-Request-Id` ヘッダーを付ける
pub fn inject_request_id(builder: RequestBuilder) -> RequestBuilder {
    let Some(id) = current_request_id() else {
        return builder;
    };
    builder.header(REQUEST_ID_HEADER, id)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        middleware::from_fn,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;
    use tower_http::request_id::SetRequestIdLayer;
    use user_admin_shared::observability::MakeRequestUuidV7;

    use super::*;

    /// 外向きリクエストに付くヘッダーを返すテスト用ハンドラ
    async fn outbound_request_id() -> String {
        let request = inject_request_id(reqwest::Client::new().get("http://identity.local"))
            .build()
            .unwrap();
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_受信したrequest_idが外向きリクエストに付く() {
        let app = Router::new()
            .route("/", get(outbound_request_id))
            .layer(from_fn(store_request_id))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "req-0001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"req-0001");
    }

    #[tokio::test]
    async fn test_スコープ外では外向きリクエストを変更しない() {
        let header = outbound_request_id().await;

        assert_eq!(header, "");
    }
}
