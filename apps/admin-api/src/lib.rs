//! # User Admin API ライブラリ
//!
//! 管理者がユーザーを作成・削除するための特権 API のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI とルーター構築
//! - `client`: 外部 API クライアント（認証基盤）
//! - `config`: 環境変数からの設定読み込み
//! - `error`: API エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（認可ゲート、CORS、Request ID）
//! - `openapi`: OpenAPI 仕様定義
//! - `usecase`: ユーザー作成・削除のユースケース

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod openapi;
#[doc(hidden)]
pub mod test_utils;
pub mod usecase;
