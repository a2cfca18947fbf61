//! # アイデンティティ
//!
//! 認証基盤に登録するアイデンティティ（認証情報 + メタデータ）を表現する。
//! 認証基盤との通信形式（JSON のフィールド名など）はクライアント側の責務とし、
//! ここでは値のみを保持する。

use crate::user::{Department, Email, Password, Role, UserName};

/// 認証基盤に登録するユーザーメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMetadata {
    pub name:       UserName,
    pub role:       Role,
    pub department: Department,
}

/// 認証基盤に登録する新規アイデンティティ
///
/// `Debug` 出力ではメールアドレスとパスワードがマスクされる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub email:           Email,
    pub password:        Password,
    /// メールアドレスを確認済みとして登録するか
    pub email_confirmed: bool,
    pub metadata:        IdentityMetadata,
}
