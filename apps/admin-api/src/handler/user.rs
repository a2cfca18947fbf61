//! # ユーザー管理 API ハンドラ
//!
//! 管理者向けのユーザー作成・削除エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /functions/v1/create-user` - ユーザー作成
//! - `POST /functions/v1/delete-user` - ユーザー削除
//!
//! どちらも `middleware::require_admin` を通過したリクエストのみ到達する。

use std::sync::Arc;

use axum::{Extension, Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use user_admin_domain::user::{NewUser, UserId};
use utoipa::ToSchema;

use crate::{
    error::{
        ApiError,
        INVALID_USER_ID_MESSAGE,
        MISSING_CREATE_FIELDS_MESSAGE,
        MISSING_USER_ID_MESSAGE,
    },
    middleware::Caller,
    usecase::{CreatedUser, UserUseCaseImpl},
};

/// ユーザー管理 API の共有状態
pub struct UserState {
    pub usecase: UserUseCaseImpl,
}

// --- リクエスト型 ---

/// ユーザー作成リクエスト
///
/// 5 項目すべてが必須（空文字列不可）。未知のフィールドは拒否する。
///
/// 欠落時に固定メッセージを返すため `Option` で受け、スキーマ上は必須とする。
#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[schema(value_type = String, required = true)]
    pub email:      Option<String>,
    #[schema(value_type = String, required = true)]
    pub password:   Option<String>,
    #[schema(value_type = String, required = true)]
    pub name:       Option<String>,
    #[schema(value_type = String, required = true)]
    pub role:       Option<String>,
    #[schema(value_type = String, required = true)]
    pub department: Option<String>,
}

/// ユーザー削除リクエスト
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct DeleteUserRequest {
    /// 削除するユーザーの ID（UUID）
    #[schema(value_type = String, format = Uuid, required = true)]
    pub user_id: Option<String>,
}

// --- レスポンス型 ---

/// 作成されたユーザー
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserData {
    pub id:         String,
    pub email:      String,
    pub name:       String,
    pub role:       String,
    pub department: String,
}

impl From<CreatedUser> for CreatedUserData {
    fn from(user: CreatedUser) -> Self {
        Self {
            id:         user.id.to_string(),
            email:      user.email,
            name:       user.name,
            role:       user.role,
            department: user.department,
        }
    }
}

/// ユーザー作成レスポンス
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub success: bool,
    pub user:    CreatedUserData,
}

/// ユーザー削除レスポンス
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
}

// --- 入力の検証 ---

/// リクエストボディを JSON としてパースする
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {e}")))
}

/// 空文字列を未指定として扱う
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl CreateUserRequest {
    fn into_new_user(self) -> Result<NewUser, ApiError> {
        let missing = || ApiError::Validation(MISSING_CREATE_FIELDS_MESSAGE.to_string());

        NewUser::new(
            non_empty(self.email).ok_or_else(missing)?,
            non_empty(self.password).ok_or_else(missing)?,
            non_empty(self.name).ok_or_else(missing)?,
            non_empty(self.role).ok_or_else(missing)?,
            non_empty(self.department).ok_or_else(missing)?,
        )
        .map_err(|_| missing())
    }
}

impl DeleteUserRequest {
    fn into_user_id(self) -> Result<UserId, ApiError> {
        let user_id = non_empty(self.user_id)
            .ok_or_else(|| ApiError::Validation(MISSING_USER_ID_MESSAGE.to_string()))?;

        UserId::parse_str(&user_id)
            .map_err(|_| ApiError::Validation(INVALID_USER_ID_MESSAGE.to_string()))
    }
}

// --- ハンドラ ---

/// POST /functions/v1/create-user
///
/// 認証基盤にユーザーを作成し、同じ ID でプロフィールを登録する。
#[utoipa::path(
    post,
    path = "/functions/v1/create-user",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "ユーザー作成成功", body = CreateUserResponse),
        (status = 400, description = "入力エラー・認証基盤/ストアのエラー", body = user_admin_shared::ErrorResponse),
        (status = 401, description = "認証エラー", body = user_admin_shared::ErrorResponse),
        (status = 403, description = "管理者ではない", body = user_admin_shared::ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(actor_id = %caller.user_id))]
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    Extension(caller): Extension<Caller>,
    body: Bytes,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let new_user = parse_body::<CreateUserRequest>(&body)?.into_new_user()?;

    let created = state.usecase.create_user(new_user).await?;

    Ok(Json(CreateUserResponse {
        success: true,
        user:    created.into(),
    }))
}

/// POST /functions/v1/delete-user
///
/// プロフィールを削除した後、認証基盤からユーザーを削除する。
#[utoipa::path(
    post,
    path = "/functions/v1/delete-user",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "ユーザー削除成功", body = DeleteUserResponse),
        (status = 400, description = "入力エラー・認証基盤/ストアのエラー", body = user_admin_shared::ErrorResponse),
        (status = 401, description = "認証エラー", body = user_admin_shared::ErrorResponse),
        (status = 403, description = "管理者ではない", body = user_admin_shared::ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(actor_id = %caller.user_id))]
pub async fn delete_user(
    State(state): State<Arc<UserState>>,
    Extension(caller): Extension<Caller>,
    body: Bytes,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let user_id = parse_body::<DeleteUserRequest>(&body)?.into_user_id()?;

    state.usecase.delete_user(&user_id).await?;

    Ok(Json(DeleteUserResponse { success: true }))
}
