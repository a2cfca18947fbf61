//! # リポジトリ実装
//!
//! プロフィールストアへのアクセスを [`ProfileRepository`] トレイトで抽象化する。
//!
//! - [`PostgresProfileRepository`]: PostgreSQL に直接接続する（sqlx）
//! - [`PostgrestProfileRepository`]: PostgREST の REST API を経由する（reqwest）

pub mod postgrest_profile_repository;
pub mod profile_repository;

pub use postgrest_profile_repository::PostgrestProfileRepository;
pub use profile_repository::{PostgresProfileRepository, ProfileRepository};
