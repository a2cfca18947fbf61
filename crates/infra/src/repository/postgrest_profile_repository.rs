//! # PostgREST 実装の ProfileRepository
//!
//! `DATABASE_URL` が未設定の場合に使用する。認証基盤と同じベース URL 配下の
//! `/rest/v1/users` をサービスキーで呼び出す。
//!
//! ## エンドポイント
//!
//! - `GET /rest/v1/users?select=role&id=eq.{id}` - ロール取得
//! - `POST /rest/v1/users` - 挿入（`Prefer: return=minimal`）
//! - `DELETE /rest/v1/users?id=eq.{id}` - 削除（対象行が無くても 204）
//!
//! エラー時のボディは `{"message", "code", "details", "hint"}` 形式で、
//! `message` をそのまま [`InfraError::rejected`] に格納する。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use user_admin_domain::user::{Profile, UserId};
use user_admin_shared::observability::{REQUEST_ID_HEADER, current_request_id};

use super::ProfileRepository;
use crate::error::InfraError;

/// プロフィールを格納するテーブルのパス
const USERS_PATH: &str = "/rest/v1/users";

/// ロール取得レスポンスの 1 行
#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

/// 挿入リクエスト
#[derive(Debug, Serialize)]
struct InsertProfileRow<'a> {
    id:         &'a uuid::Uuid,
    name:       &'a str,
    email:      &'a str,
    role:       &'a str,
    department: &'a str,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// PostgREST のエラーレスポンス
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

/// PostgREST 実装の ProfileRepository
pub struct PostgrestProfileRepository {
    base_url:    String,
    service_key: String,
    client:      reqwest::Client,
}

impl PostgrestProfileRepository {
    /// 新しいリポジトリインスタンスを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: プロジェクトのベース URL（例: `https://xyz.supabase.co`）
    /// - `service_key`: サービスロールキー
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            base_url:    base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            client:      reqwest::Client::new(),
        }
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    /// サービスキーと Request ID を付与する
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key);
        match current_request_id() {
            Some(id) => builder.header(REQUEST_ID_HEADER, id),
            None => builder,
        }
    }
}

/// 2xx 以外のレスポンスを [`InfraError::rejected`] に変換する
async fn rejected(response: reqwest::Response) -> InfraError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    InfraError::rejected(status, message)
}

#[async_trait]
impl ProfileRepository for PostgrestProfileRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %id))]
    async fn find_role(&self, id: &UserId) -> Result<Option<String>, InfraError> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authorize(self.client.get(self.users_url()))
            .query(&[("select", "role"), ("id", id_filter.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let rows = response.json::<Vec<RoleRow>>().await?;
        Ok(rows.into_iter().next().map(|row| row.role))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %profile.id()))]
    async fn insert(&self, profile: &Profile) -> Result<(), InfraError> {
        let row = InsertProfileRow {
            id:         profile.id().as_uuid(),
            name:       profile.name().as_str(),
            email:      profile.email().as_str(),
            role:       profile.role().as_str(),
            department: profile.department().as_str(),
            created_at: profile.created_at(),
        };

        let response = self
            .authorize(self.client.post(self.users_url()))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %id))]
    async fn delete(&self, id: &UserId) -> Result<(), InfraError> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authorize(self.client.delete(self.users_url()))
            .query(&[("id", id_filter.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        Ok(())
    }
}
