//! # 認証基盤クライアント
//!
//! User Admin API から認証基盤（GoTrue 互換の Auth API）への通信を担当する。
//!
//! ## エンドポイント
//!
//! - `GET /auth/v1/user` - アクセストークンのイントロスペクション
//! - `POST /auth/v1/admin/users` - ユーザー作成（サービスキー）
//! - `DELETE /auth/v1/admin/users/{id}` - ユーザー削除（サービスキー）
//!
//! すべてのリクエストに `apikey` ヘッダー（サービスキー）を付与する。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use user_admin_domain::{identity::NewIdentity, user::UserId};

use crate::middleware::request_id::inject_request_id;

/// 認証基盤クライアントエラー
///
/// `Display` は認証基盤が返したメッセージをそのまま出力する。
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// トークンが無効（401 / 403）
    #[error("{0}")]
    InvalidToken(String),

    /// 認証基盤がリクエストを拒否した
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// ネットワークエラー
    #[error("{0}")]
    Network(String),

    /// 予期しないレスポンス
    #[error("{0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for IdentityProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            IdentityProviderError::Unexpected(err.to_string())
        } else {
            IdentityProviderError::Network(err.to_string())
        }
    }
}

// --- リクエスト/レスポンス型 ---

/// 認証基盤上のユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub id:    UserId,
    pub email: Option<String>,
}

/// 認証基盤のユーザーレスポンス（必要なフィールドのみ）
#[derive(Debug, Deserialize)]
struct UserBody {
    id:    uuid::Uuid,
    email: Option<String>,
}

impl From<UserBody> for IdentityUser {
    fn from(body: UserBody) -> Self {
        Self {
            id:    UserId::from_uuid(body.id),
            email: body.email,
        }
    }
}

/// ユーザー作成リクエスト
#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    email:         &'a str,
    password:      &'a str,
    email_confirm: bool,
    user_metadata: UserMetadataBody<'a>,
}

#[derive(Debug, Serialize)]
struct UserMetadataBody<'a> {
    name:       &'a str,
    role:       &'a str,
    department: &'a str,
}

/// 認証基盤のエラーレスポンス
///
/// エンドポイントやバージョンによってメッセージのフィールド名が異なる。
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg:               Option<String>,
    message:           Option<String>,
    error_description: Option<String>,
    error:             Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

/// エラーレスポンスのボディからメッセージを取り出す
///
/// JSON として解釈できない場合はボディ全体を返す。
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(body)
}

/// 認証基盤クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    /// アクセストークンから呼び出し元のユーザーを取得する
    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityProviderError>;

    /// ユーザーを作成する
    ///
    /// 認証基盤が成功を返したがユーザーを含まない場合は `Ok(None)`。
    async fn create_user(
        &self,
        identity: &NewIdentity,
    ) -> Result<Option<IdentityUser>, IdentityProviderError>;

    /// ユーザーを削除する
    async fn delete_user(&self, id: &UserId) -> Result<(), IdentityProviderError>;
}

/// GoTrue 互換 API のクライアント実装
pub struct GoTrueClient {
    base_url:    String,
    service_key: String,
    client:      reqwest::Client,
}

impl GoTrueClient {
    /// 新しい GoTrueClient を作成する
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

    /// 管理 API 用にサービスキーで認証したリクエストを作る
    fn admin_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        inject_request_id(
            builder
                .header("apikey", &self.service_key)
                .bearer_auth(&self.service_key),
        )
    }
}

#[async_trait]
impl IdentityProviderClient for GoTrueClient {
    async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityProviderError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = inject_request_id(
            self.client
                .get(&url)
                .header("apikey", &self.service_key)
                .bearer_auth(access_token),
        )
        .send()
        .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.json::<UserBody>().await?;
                Ok(body.into())
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(IdentityProviderError::InvalidToken(error_message(body)))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(IdentityProviderError::Rejected {
                    status:  status.as_u16(),
                    message: error_message(body),
                })
            }
        }
    }

    async fn create_user(
        &self,
        identity: &NewIdentity,
    ) -> Result<Option<IdentityUser>, IdentityProviderError> {
        let url = format!("{}/auth/v1/admin/users", self.base_url);
        let request = CreateUserBody {
            email:         identity.email.as_str(),
            password:      identity.password.as_str(),
            email_confirm: identity.email_confirmed,
            user_metadata: UserMetadataBody {
                name:       identity.metadata.name.as_str(),
                role:       identity.metadata.role.as_str(),
                department: identity.metadata.department.as_str(),
            },
        };

        let response = self
            .admin_request(self.client.post(&url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(IdentityProviderError::Rejected {
                status:  status.as_u16(),
                message: error_message(body),
            });
        }

        // ユーザーオブジェクトを含まない成功レスポンスは None として扱う
        Ok(serde_json::from_str::<UserBody>(&body)
            .ok()
            .map(IdentityUser::from))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), IdentityProviderError> {
        let url = format!("{}/auth/v1/admin/users/{}", self.base_url, id);

        let response = self.admin_request(self.client.delete(&url)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(IdentityProviderError::Rejected {
                    status:  status.as_u16(),
                    message: error_message(body),
                })
            }
        }
    }
}
