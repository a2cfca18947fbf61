//! # User Admin API アプリケーション構築
//!
//! DI（クライアント・State）の組み立てとルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::{any::Any, sync::Arc};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use user_admin_domain::clock::Clock;
use user_admin_infra::ProfileRepository;
use user_admin_shared::observability::{MakeRequestUuidV7, make_request_span};

use crate::{
    client::IdentityProviderClient,
    error::ApiError,
    handler::{UserState, create_user, delete_user, health_check, preflight},
    middleware::{AuthGate, cors_headers, require_admin, store_request_id},
    usecase::UserUseCaseImpl,
};

/// ユーザー作成エンドポイントのパス
pub const CREATE_USER_PATH: &str = "/functions/v1/create-user";

/// ユーザー削除エンドポイントのパス
pub const DELETE_USER_PATH: &str = "/functions/v1/delete-user";

/// アプリケーションが依存する外部コンポーネント
pub struct AppDependencies {
    pub identity_provider:  Arc<dyn IdentityProviderClient>,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub clock:              Arc<dyn Clock>,
}

/// DI の組み立てとルーター定義を行う
///
/// 管理操作の 2 エンドポイントは `POST` のみ認可ゲートを通し、
/// プリフライトの `OPTIONS` は認可なしで応答する。
/// それ以外のメソッドは認可より前に 405 になる。
pub fn build_app(deps: AppDependencies) -> Router {
    let auth_gate = AuthGate::new(
        deps.identity_provider.clone(),
        deps.profile_repository.clone(),
    );

    let user_state = Arc::new(UserState {
        usecase: UserUseCaseImpl::new(
            deps.identity_provider,
            deps.profile_repository,
            deps.clock,
        ),
    });

    Router::new()
        .route("/health", get(health_check))
        .route(
            CREATE_USER_PATH,
            post(create_user)
                .route_layer(from_fn_with_state(auth_gate.clone(), require_admin))
                .options(preflight),
        )
        .route(
            DELETE_USER_PATH,
            post(delete_user)
                .route_layer(from_fn_with_state(auth_gate, require_admin))
                .options(preflight),
        )
        .with_state(user_state)
        // パニックは CORS の内側で捕捉し、500 レスポンスにも CORS ヘッダーを付ける
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(cors_headers))
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        // 4. store_request_id: task-local に保存し、認証基盤・ストアへのヘッダー伝播に使用
        .layer(from_fn(store_request_id))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// ハンドラ内のパニックを 500 レスポンスに変換する
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Unexpected(format!("ハンドラがパニック: {detail}")).into_response()
}
