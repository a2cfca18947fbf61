//! # User Admin ドメイン層
//!
//! 管理者によるユーザー作成・削除の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 必須入力は生成時に検証し、不正な値を型で排除する
//! - **PII 保護**: メールアドレス・パスワードは `Debug` 出力をマスクする
//! - **外部非依存**: 認証基盤やデータストアの詳細には一切依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザー ID・入力値・プロフィール
//! - [`identity`] - 認証基盤に登録するアイデンティティ
//! - [`clock`] - 時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use user_admin_domain::{DomainError, user::Role};
//!
//! let role = Role::new("admin").unwrap();
//! assert!(role.is_admin());
//!
//! let error = Role::new("").unwrap_err();
//! assert!(matches!(error, DomainError::Validation(_)));
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod identity;
pub mod user;

pub use error::DomainError;
