//! # OpenAPI 仕様定義
//!
//! utoipa を使用して User Admin API の OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。

use utoipa::{
    Modify,
    OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::handler::{health, user};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Admin API",
        version = "0.1.0",
        description = "管理者向けユーザー作成・削除 API"
    ),
    paths(
        // health
        health::health_check,
        // users
        user::create_user,
        user::delete_user,
    ),
    components(schemas(
        user_admin_shared::ErrorResponse,
    )),
    tags(
        (name = "health", description = "ヘルスチェック"),
        (name = "users", description = "ユーザー管理"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// セキュリティスキーム定義
///
/// 認証基盤が発行したアクセストークンによる Bearer 認証を追加する。
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}
