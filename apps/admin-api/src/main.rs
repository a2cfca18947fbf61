//! # User Admin API サーバー
//!
//! 管理者がユーザーを作成・削除するための API サーバー。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  管理画面     │────▶│User Admin API│────▶│ 認証基盤 (GoTrue) │
//! │  (Browser)   │     │  port: 8000  │     └──────────────────┘
//! └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                   ┌────────────────────┐
//!                   │ プロフィールストア   │
//!                   │ (PostgREST / PG)   │
//!                   └────────────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ADMIN_API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ADMIN_API_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `SUPABASE_URL` | No | 認証基盤・PostgREST のベース URL |
//! | `SUPABASE_SERVICE_ROLE_KEY` | No | サービスロールキー |
//! | `DATABASE_URL` | No | 設定時はプロフィールを PostgreSQL に直接保存する |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p user-admin-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use user_admin_api::{
    app_builder::{AppDependencies, build_app},
    client::GoTrueClient,
    config::AdminApiConfig,
};
use user_admin_domain::clock::SystemClock;
use user_admin_infra::{
    ProfileRepository,
    db,
    repository::{PostgresProfileRepository, PostgrestProfileRepository},
};
use user_admin_shared::observability::{TracingConfig, init_tracing};

/// User Admin API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. プロフィールストアの選択
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("admin-api"));
    let _tracing_guard = tracing::info_span!("app", service = "admin-api").entered();

    let config = AdminApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::debug!(?config, "設定を読み込みました");

    if config.supabase_url.is_empty() {
        tracing::warn!("SUPABASE_URL が未設定です。認証基盤への接続はすべて失敗します");
    }

    let profile_repository: Arc<dyn ProfileRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url)
                .await
                .context("データベースへの接続に失敗しました")?;
            db::run_migrations(&pool)
                .await
                .context("マイグレーションの実行に失敗しました")?;
            tracing::info!("プロフィールストア: PostgreSQL");
            Arc::new(PostgresProfileRepository::new(pool))
        }
        None => {
            tracing::info!("プロフィールストア: PostgREST");
            Arc::new(PostgrestProfileRepository::new(
                &config.supabase_url,
                &config.service_role_key,
            ))
        }
    };

    let app = build_app(AppDependencies {
        identity_provider: Arc::new(GoTrueClient::new(
            &config.supabase_url,
            &config.service_role_key,
        )),
        profile_repository,
        clock: Arc::new(SystemClock),
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;

    tracing::info!("User Admin API サーバーを起動します: {}", addr);

    axum::serve(listener, app)
        .await
        .context("サーバーの実行中にエラーが発生しました")?;

    Ok(())
}
