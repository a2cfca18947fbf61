//! # ユースケース層
//!
//! 認証基盤とプロフィールストアにまたがる管理操作を組み立てる。

pub mod user;

pub use user::{CreatedUser, UserUseCaseImpl};
