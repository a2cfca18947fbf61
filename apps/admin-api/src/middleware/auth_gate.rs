//! # 管理者認可ゲート
//!
//! 管理操作の前段で呼び出し元が管理者であることを検証する。
//!
//! ## 判定の流れ
//!
//! 1. `Authorization` ヘッダーが無い（値が空の場合を含む）→ 401 `Authorization header required`
//! 2. Bearer トークンを認証基盤でイントロスペクションし、解決できない → 401 `Unauthorized`
//! 3. プロフィールストアから呼び出し元のロールを取得し、`admin` でない
//!    （プロフィールが無い・取得に失敗した場合を含む）→ 403 `Forbidden: Admin access required`
//!
//! 通過した場合は [`Caller`] をリクエストの extensions に格納してハンドラに渡す。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let auth_gate = AuthGate::new(identity_provider, profile_repository);
//!
//! // MethodRouter に掛けることで、許可されないメソッドは認可より前に 405 になる
//! Router::new().route(
//!     "/functions/v1/create-user",
//!     post(create_user).route_layer(from_fn_with_state(auth_gate, require_admin)),
//! )
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use user_admin_domain::user::{UserId, is_admin_role};
use user_admin_infra::ProfileRepository;

use crate::{client::IdentityProviderClient, error::ApiError};

/// 認可ゲートを通過した呼び出し元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
}

/// 認可ゲートの状態
#[derive(Clone)]
pub struct AuthGate {
    identity_provider:  Arc<dyn IdentityProviderClient>,
    profile_repository: Arc<dyn ProfileRepository>,
}

impl AuthGate {
    pub fn new(
        identity_provider: Arc<dyn IdentityProviderClient>,
        profile_repository: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            identity_provider,
            profile_repository,
        }
    }

    /// リクエストヘッダーから呼び出し元を認証し、管理者であることを確認する
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        let token = bearer_token(headers)?;

        let user = self
            .identity_provider
            .get_user(token)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error.category = "auth",
                    error.kind = "invalid_token",
                    "トークンの検証に失敗: {}",
                    e
                );
                ApiError::Unauthorized
            })?;

        let role = self
            .profile_repository
            .find_role(&user.id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error.category = "auth",
                    error.kind = "role_lookup_failed",
                    user_id = %user.id,
                    "ロールの取得に失敗: {}",
                    e
                );
                ApiError::Forbidden
            })?;

        match role {
            Some(role) if is_admin_role(&role) => Ok(Caller { user_id: user.id }),
            Some(role) => {
                tracing::debug!(user_id = %user.id, role = %role, "管理者ではないため拒否");
                Err(ApiError::Forbidden)
            }
            None => {
                tracing::debug!(user_id = %user.id, "プロフィールが存在しないため拒否");
                Err(ApiError::Forbidden)
            }
        }
    }
}

/// `Authorization: Bearer <token>` からトークンを取り出す
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingAuthorization)?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)
}

/// 管理者認可ミドルウェア
///
/// 認可に失敗した場合はハンドラを呼ばずにエラーレスポンスを返す。
pub async fn require_admin(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match gate.authorize(request.headers()).await {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
