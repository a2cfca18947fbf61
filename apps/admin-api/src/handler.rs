//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - 認可は `middleware::require_admin` が担当し、ハンドラは入力の検証と
//!   ユースケースの呼び出しに専念する

pub mod health;
pub mod preflight;
pub mod user;

pub use health::health_check;
pub use preflight::preflight;
pub use user::{UserState, create_user, delete_user};
