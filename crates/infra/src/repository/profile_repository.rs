//! # ProfileRepository
//!
//! プロフィール（`users` テーブルの 1 行）の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **最小の操作**: 認可に必要なロール取得と、作成・削除のみを提供する
//! - **削除は冪等**: 対象行が無くてもエラーにしない
//! - **実行時クエリ**: `sqlx::query` を使い、ビルド時の DB 接続を不要にする

use async_trait::async_trait;
use sqlx::PgPool;
use user_admin_domain::user::{Profile, UserId};

use crate::error::InfraError;

/// プロフィールリポジトリトレイト
///
/// ユースケース層・認可ゲートから `Arc<dyn ProfileRepository>` として利用する。
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// ユーザーのロールを取得する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(role))`: プロフィールが見つかった場合
    /// - `Ok(None)`: プロフィールが存在しない場合
    /// - `Err(_)`: ストアのエラー
    async fn find_role(&self, id: &UserId) -> Result<Option<String>, InfraError>;

    /// プロフィールを挿入する
    ///
    /// 同じ ID の行が既に存在する場合はストアのエラーを返す。
    async fn insert(&self, profile: &Profile) -> Result<(), InfraError>;

    /// プロフィールを削除する
    ///
    /// 対象行が存在しない場合も `Ok(())` を返す。
    async fn delete(&self, id: &UserId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の ProfileRepository
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %id))]
    async fn find_role(&self, id: &UserId) -> Result<Option<String>, InfraError> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %profile.id()))]
    async fn insert(&self, profile: &Profile) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role, department, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.name().as_str())
        .bind(profile.email().as_str())
        .bind(profile.role().as_str())
        .bind(profile.department().as_str())
        .bind(profile.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %id))]
    async fn delete(&self, id: &UserId) -> Result<(), InfraError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("削除対象のプロフィールが存在しません");
        }

        Ok(())
    }
}
