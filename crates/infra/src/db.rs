//! # PostgreSQL データベース接続管理
//!
//! `DATABASE_URL` が設定されている場合のみ使用する。
//! 未設定の場合、プロフィールは PostgREST 経由で読み書きする。
//!
//! ## 本番環境での推奨設定
//!
//! ```rust,ignore
//! PgPoolOptions::new()
//!     .max_connections(20)
//!     .acquire_timeout(Duration::from_secs(5))
//!     .idle_timeout(Duration::from_secs(600))
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// PostgreSQL 接続プールを作成する
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// マイグレーションを実行する
///
/// `sqlx::migrate!()` マクロでクレートに埋め込まれた `migrations/` を適用する。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
