//! # プリフライトハンドラ
//!
//! ブラウザの CORS プリフライト（`OPTIONS`）に応答する。
//! CORS ヘッダーは `middleware::cors_headers` が付与するため、本文のみを返す。

/// `OPTIONS` に `200 ok` を返す
pub async fn preflight() -> &'static str {
    "ok"
}
