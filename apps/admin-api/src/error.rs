//! # API エラー定義
//!
//! ハンドラ・認可ゲート・ユースケースが返すエラーと、axum レスポンスへの変換。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | メッセージ |
//! |-----------|----------------|-----------|
//! | `MissingAuthorization` | 401 | `Authorization header required` |
//! | `Unauthorized` | 401 | `Unauthorized` |
//! | `Forbidden` | 403 | `Forbidden: Admin access required` |
//! | `Validation` | 400 | 入力エラーの内容 |
//! | `Provider` | 400 | 認証基盤のメッセージをそのまま |
//! | `Store` | 400 | プロフィールストアのメッセージをそのまま |
//! | `Unexpected` | 500 | `Unknown error occurred`（詳細はログのみ） |
//!
//! ボディは常に `{"error": "<メッセージ>"}` 形式。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum::IntoStaticStr;
use thiserror::Error;
use user_admin_shared::{
    ErrorResponse,
    error_response::{FORBIDDEN_MESSAGE, MISSING_AUTHORIZATION_MESSAGE, UNAUTHORIZED_MESSAGE},
};

/// ユーザー作成リクエストの必須項目が欠けている場合のメッセージ
pub const MISSING_CREATE_FIELDS_MESSAGE: &str =
    "Missing required fields: email, password, name, role, department";

/// ユーザー削除リクエストの userId が欠けている場合のメッセージ
pub const MISSING_USER_ID_MESSAGE: &str = "Missing required field: userId";

/// userId が UUID 形式でない場合のメッセージ
pub const INVALID_USER_ID_MESSAGE: &str = "Invalid userId format";

/// 認証基盤がユーザーを返さなかった場合のメッセージ
pub const USER_NOT_RETURNED_MESSAGE: &str = "Failed to create user";

/// API で発生するエラー
///
/// `Display` はクライアントに返すメッセージと一致する（`Unexpected` を除く）。
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ApiError {
    /// Authorization ヘッダーが無い
    #[error("{}", MISSING_AUTHORIZATION_MESSAGE)]
    MissingAuthorization,

    /// トークンが無効、または認証基盤で解決できない
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    /// 呼び出し元が管理者ではない（プロフィールが無い場合を含む）
    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden,

    /// 入力エラー
    #[error("{0}")]
    Validation(String),

    /// 認証基盤のエラー
    #[error("{0}")]
    Provider(String),

    /// プロフィールストアのエラー
    #[error("{0}")]
    Store(String),

    /// 予期しないエラー（詳細はクライアントに返さない）
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// HTTP ステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthorization | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) | ApiError::Provider(_) | ApiError::Store(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ログの `error.kind` フィールドに出力する種別名
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Unexpected(detail) => {
                tracing::error!(
                    error.category = "internal",
                    error.kind = self.kind(),
                    "予期しないエラー: {}",
                    detail
                );
                ErrorResponse::internal_error()
            }
            other => ErrorResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
