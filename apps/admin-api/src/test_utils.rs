//! # テスト用インメモリ認証基盤
//!
//! 認可ゲート・ユースケース・ルーター統合テストで使う
//! [`IdentityProviderClient`] のインメモリ実装。
//!
//! プロフィールストア側は `user_admin_infra::mock::MockProfileRepository` を使う。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use user_admin_domain::{identity::NewIdentity, user::UserId};

use crate::client::{IdentityProviderClient, IdentityProviderError, IdentityUser};

/// 認証基盤が存在しないユーザーの削除に返すメッセージ
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// 無効なトークンに返すメッセージ
pub const INVALID_TOKEN_MESSAGE: &str = "invalid JWT: unable to parse or verify signature";

#[derive(Default)]
struct State {
    tokens:         HashMap<String, IdentityUser>,
    users:          Vec<UserId>,
    created:        Vec<NewIdentity>,
    calls:          Vec<&'static str>,
    create_error:   Option<String>,
    return_no_user: bool,
    delete_error:   Option<String>,
}

/// インメモリの認証基盤
///
/// - `add_user` でアクセストークンとユーザーを登録する
/// - `fail_create` / `return_no_user` / `fail_delete` で次回以降の操作の結果を差し替える
/// - `calls()` で呼び出し順（`"get_user"`, `"create_user"`, `"delete_user"`）を検証できる
#[derive(Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<Mutex<State>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// アクセストークンに対応するユーザーを登録する
    pub fn add_user(&self, token: &str, id: UserId, email: &str) {
        let mut state = self.state();
        state.users.push(id.clone());
        state.tokens.insert(
            token.to_string(),
            IdentityUser {
                id,
                email: Some(email.to_string()),
            },
        );
    }

    /// ユーザーが存在するか
    pub fn contains(&self, id: &UserId) -> bool {
        self.state().users.contains(id)
    }

    /// 作成されたアイデンティティ（作成順）
    pub fn created(&self) -> Vec<NewIdentity> {
        self.state().created.clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    pub fn fail_create(&self, message: impl Into<String>) {
        self.state().create_error = Some(message.into());
    }

    /// 作成が成功してもユーザーを返さないようにする
    pub fn return_no_user(&self) {
        self.state().return_no_user = true;
    }

    pub fn fail_delete(&self, message: impl Into<String>) {
        self.state().delete_error = Some(message.into());
    }
}

#[async_trait]
impl IdentityProviderClient for InMemoryIdentityProvider {
    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityProviderError> {
        let mut state = self.state();
        state.calls.push("get_user");

        let user = state
            .tokens
            .get(access_token)
            .filter(|user| state.users.contains(&user.id))
            .cloned();
        user.ok_or_else(|| IdentityProviderError::InvalidToken(INVALID_TOKEN_MESSAGE.to_string()))
    }

    async fn create_user(
        &self,
        identity: &NewIdentity,
    ) -> Result<Option<IdentityUser>, IdentityProviderError> {
        let mut state = self.state();
        state.calls.push("create_user");

        if let Some(message) = state.create_error.clone() {
            return Err(IdentityProviderError::Rejected {
                status: 422,
                message,
            });
        }

        state.created.push(identity.clone());
        if state.return_no_user {
            return Ok(None);
        }

        let id = UserId::new();
        state.users.push(id.clone());
        Ok(Some(IdentityUser {
            id,
            email: Some(identity.email.as_str().to_string()),
        }))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), IdentityProviderError> {
        let mut state = self.state();
        state.calls.push("delete_user");

        if let Some(message) = state.delete_error.clone() {
            return Err(IdentityProviderError::Rejected {
                status: 500,
                message,
            });
        }

        let Some(position) = state.users.iter().position(|user| user == id) else {
            return Err(IdentityProviderError::Rejected {
                status:  404,
                message: USER_NOT_FOUND_MESSAGE.to_string(),
            });
        };
        state.users.remove(position);
        Ok(())
    }
}
