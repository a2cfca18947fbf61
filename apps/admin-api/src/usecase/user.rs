//! # ユーザー管理ユースケース
//!
//! ユーザーの作成・削除を担当する。
//!
//! ## 作成
//!
//! 1. 認証基盤にアイデンティティを作成する
//! 2. 採番された ID でプロフィールを挿入する
//! 3. 挿入に失敗した場合は作成したアイデンティティを削除する（補償処理）
//!
//! ## 削除
//!
//! プロフィール → アイデンティティの順に削除する。
//! プロフィールの削除に失敗した場合、アイデンティティには触れない。

use std::sync::Arc;

use user_admin_domain::{
    clock::Clock,
    user::{NewUser, Profile, UserId},
};
use user_admin_infra::ProfileRepository;

use crate::{
    client::IdentityProviderClient,
    error::{ApiError, USER_NOT_RETURNED_MESSAGE},
};

/// 作成されたユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub id:         UserId,
    pub email:      String,
    pub name:       String,
    pub role:       String,
    pub department: String,
}

impl CreatedUser {
    fn new(profile: &Profile, email: String) -> Self {
        Self {
            id: profile.id().clone(),
            email,
            name: profile.name().as_str().to_string(),
            role: profile.role().as_str().to_string(),
            department: profile.department().as_str().to_string(),
        }
    }
}

/// ユーザー管理ユースケースの実装
pub struct UserUseCaseImpl {
    identity_provider:  Arc<dyn IdentityProviderClient>,
    profile_repository: Arc<dyn ProfileRepository>,
    clock:              Arc<dyn Clock>,
}

impl UserUseCaseImpl {
    pub fn new(
        identity_provider: Arc<dyn IdentityProviderClient>,
        profile_repository: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity_provider,
            profile_repository,
            clock,
        }
    }

    /// ユーザーを作成する
    ///
    /// # エラー
    ///
    /// - `ApiError::Provider`: 認証基盤が作成を拒否した、またはユーザーを返さなかった
    /// - `ApiError::Store`: プロフィールの挿入に失敗した（アイデンティティは削除済み）
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn create_user(&self, new_user: NewUser) -> Result<CreatedUser, ApiError> {
        let identity = self
            .identity_provider
            .create_user(&new_user.to_identity())
            .await
            .map_err(|e| ApiError::Provider(e.to_string()))?
            .ok_or_else(|| ApiError::Provider(USER_NOT_RETURNED_MESSAGE.to_string()))?;

        let profile = new_user.to_profile(identity.id.clone(), self.clock.now());

        if let Err(insert_error) = self.profile_repository.insert(&profile).await {
            tracing::warn!(
                error.category = "store",
                error.kind = "profile_insert_failed",
                user_id = %identity.id,
                "プロフィールの挿入に失敗したためアイデンティティを削除: {}",
                insert_error
            );

            if let Err(delete_error) = self.identity_provider.delete_user(&identity.id).await {
                tracing::error!(
                    error.category = "consistency",
                    error.kind = "compensation_failed",
                    user_id = %identity.id,
                    "アイデンティティの削除に失敗: プロフィールのないアイデンティティが残っている: {}",
                    delete_error
                );
            }

            return Err(ApiError::Store(insert_error.message()));
        }

        let email = identity
            .email
            .unwrap_or_else(|| new_user.email.as_str().to_string());

        tracing::info!(user_id = %identity.id, "ユーザーを作成");
        Ok(CreatedUser::new(&profile, email))
    }

    /// ユーザーを削除する
    ///
    /// # エラー
    ///
    /// - `ApiError::Store`: プロフィールの削除に失敗した（アイデンティティは削除していない）
    /// - `ApiError::Provider`: アイデンティティの削除に失敗した（プロフィールは削除済み）
    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.profile_repository
            .delete(id)
            .await
            .map_err(|e| ApiError::Store(e.message()))?;

        if let Err(e) = self.identity_provider.delete_user(id).await {
            tracing::error!(
                error.category = "consistency",
                error.kind = "identity_delete_failed",
                user_id = %id,
                "プロフィール削除後にアイデンティティの削除に失敗: {}",
                e
            );
            return Err(ApiError::Provider(e.to_string()));
        }

        tracing::info!(user_id = %id, "ユーザーを削除");
        Ok(())
    }
}
