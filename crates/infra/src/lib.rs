//! # User Admin インフラ層
//!
//! プロフィールストアとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: [`ProfileRepository`] の PostgreSQL / PostgREST 実装
//! - **テスト用モック**: `test-utils` feature で有効になるインメモリ実装
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!          ↘
//!            shared
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use user_admin_infra::{db, repository::PostgresProfileRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/user_admin").await?;
//!     db::run_migrations(&pool).await?;
//!     let repository = PostgresProfileRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use repository::ProfileRepository;
