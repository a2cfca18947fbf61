//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - ボディは `{"error": "<メッセージ>"}` の 1 フィールドのみ
//! - axum の `IntoResponse` 変換は各アプリの責務（shared に axum 依存を入れない）
//! - 固定メッセージは定数で提供する（500 のみ便利コンストラクタあり）

use serde::{Deserialize, Serialize};

/// Authorization ヘッダーが無い場合のメッセージ
pub const MISSING_AUTHORIZATION_MESSAGE: &str = "Authorization header required";

/// トークンが無効な場合のメッセージ
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// 管理者以外のアクセス時のメッセージ
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: Admin access required";

/// 予期しないエラーのメッセージ（内部情報を漏らさない固定値）
pub const INTERNAL_ERROR_MESSAGE: &str = "Unknown error occurred";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// 人間可読なエラーメッセージ
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// 500: 予期しないエラー
    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE)
    }
}
