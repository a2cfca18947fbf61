//! # ユーザー
//!
//! 管理者が作成・削除するユーザーと、その入力値を表現する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`UserId`] | ユーザー ID | 認証基盤が採番する ID。プロフィールの主キーを兼ねる |
//! | [`NewUser`] | 新規ユーザー | 作成リクエストの検証済み入力 |
//! | [`Profile`] | プロフィール | プロフィールストアの 1 行 |
//!
//! ## 不変条件
//!
//! プロフィールの `id` は対応するアイデンティティの `id` と一致する。
//! 作成時は認証基盤が採番した ID を使ってプロフィールを組み立てる。
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::Utc;
//! use user_admin_domain::user::{NewUser, UserId};
//!
//! let new_user = NewUser::new("a@x.com", "secret123", "A", "member", "eng").unwrap();
//! let profile = new_user.to_profile(UserId::new(), Utc::now());
//!
//! assert_eq!(profile.email().as_str(), "a@x.com");
//! assert!(!profile.role().is_admin());
//! ```

use chrono::{DateTime, Utc};

use crate::{
    DomainError,
    identity::{IdentityMetadata, NewIdentity},
};

/// 管理者ロール名
///
/// 認可ゲートはプロフィールのロールがこの値と完全一致する場合のみ通過させる。
pub const ADMIN_ROLE: &str = "admin";

define_uuid_id! {
    /// ユーザー ID
    ///
    /// 認証基盤のユーザー ID と同一。
    pub struct UserId { label: "ユーザー ID" }
}

define_required_string! {
    /// メールアドレス（値オブジェクト）
    ///
    /// 形式の検証は認証基盤に委ねる。
    pub struct Email {
        label: "メールアドレス",
        pii: true,
    }
}

define_required_string! {
    /// 初期パスワード（値オブジェクト）
    ///
    /// パスワードポリシーの適用は認証基盤に委ねる。
    pub struct Password {
        label: "パスワード",
        pii: true,
    }
}

define_required_string! {
    /// ユーザー名（値オブジェクト）
    pub struct UserName {
        label: "ユーザー名",
    }
}

define_required_string! {
    /// ロール（値オブジェクト）
    ///
    /// `"admin"` 以外の値も自由に設定できる。
    pub struct Role {
        label: "ロール",
    }
}

define_required_string! {
    /// 部署（値オブジェクト）
    pub struct Department {
        label: "部署",
    }
}

impl Role {
    /// 管理者ロールかどうか（大文字小文字を区別する完全一致）
    pub fn is_admin(&self) -> bool {
        is_admin_role(&self.0)
    }
}

/// ロール文字列が管理者ロールかどうかを判定する
pub fn is_admin_role(role: &str) -> bool {
    role == ADMIN_ROLE
}

/// 新規ユーザー（検証済みの作成リクエスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email:      Email,
    pub password:   Password,
    pub name:       UserName,
    pub role:       Role,
    pub department: Department,
}

impl NewUser {
    /// 5 つの必須フィールドを検証して新規ユーザーを作成する
    ///
    /// # エラー
    ///
    /// いずれかが空文字列の場合は `DomainError::Validation` を返す。
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            email:      Email::new(email)?,
            password:   Password::new(password)?,
            name:       UserName::new(name)?,
            role:       Role::new(role)?,
            department: Department::new(department)?,
        })
    }

    /// 認証基盤に登録するアイデンティティを組み立てる
    ///
    /// メールアドレスは確認済みとして登録する。
    pub fn to_identity(&self) -> NewIdentity {
        NewIdentity {
            email:           self.email.clone(),
            password:        self.password.clone(),
            email_confirmed: true,
            metadata:        IdentityMetadata {
                name:       self.name.clone(),
                role:       self.role.clone(),
                department: self.department.clone(),
            },
        }
    }

    /// 認証基盤が採番した ID でプロフィールを組み立てる
    pub fn to_profile(&self, id: UserId, now: DateTime<Utc>) -> Profile {
        Profile::new(
            id,
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.department.clone(),
            now,
        )
    }
}

/// プロフィール（プロフィールストアの 1 行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id:         UserId,
    name:       UserName,
    email:      Email,
    role:       Role,
    department: Department,
    created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        id: UserId,
        name: UserName,
        email: Email,
        role: Role,
        department: Department,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            department,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn department(&self) -> &Department {
        &self.department
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_user_idのparse_strで有効なuuidを受け付ける() {
        let id = UserId::parse_str("0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b").unwrap();

        assert_eq!(id.to_string(), "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b");
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("12345")]
    fn test_user_idのparse_strで不正な形式を拒否する(#[case] input: &str) {
        let result = UserId::parse_str(input);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_必須文字列は空文字列を拒否する() {
        assert!(Email::new("").is_err());
        assert!(Password::new("").is_err());
        assert!(UserName::new("").is_err());
        assert!(Role::new("").is_err());
        assert!(Department::new("").is_err());
    }

    #[test]
    fn test_必須文字列は前後の空白を保持する() {
        let name = UserName::new("  山田  ").unwrap();

        assert_eq!(name.as_str(), "  山田  ");
    }

    #[test]
    fn test_piiのdebug出力はマスクされる() {
        let email = Email::new("a@x.com").unwrap();
        let password = Password::new("secret123").unwrap();

        assert_eq!(format!("{email:?}"), r#"Email("[REDACTED]")"#);
        assert!(!format!("{password:?}").contains("secret123"));
    }

    #[rstest]
    #[case("admin", true)]
    #[case("Admin", false)]
    #[case("ADMIN", false)]
    #[case(" admin", false)]
    #[case("member", false)]
    fn test_管理者ロールは完全一致で判定する(#[case] role: &str, #[case] expected: bool) {
        assert_eq!(is_admin_role(role), expected);
        assert_eq!(Role::new(role).unwrap().is_admin(), expected);
    }

    #[test]
    fn test_new_userのいずれかが空ならバリデーションエラー() {
        let result = NewUser::new("a@x.com", "secret123", "A", "", "eng");

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_to_identityでメール確認済みのメタデータ付きアイデンティティを作る() {
        let new_user = NewUser::new("a@x.com", "secret123", "A", "member", "eng").unwrap();

        let identity = new_user.to_identity();

        assert_eq!(identity.email.as_str(), "a@x.com");
        assert_eq!(identity.password.as_str(), "secret123");
        assert!(identity.email_confirmed);
        assert_eq!(identity.metadata.name.as_str(), "A");
        assert_eq!(identity.metadata.role.as_str(), "member");
        assert_eq!(identity.metadata.department.as_str(), "eng");
    }

    #[test]
    fn test_to_profileで採番済みidと現在時刻を設定する() {
        let new_user = NewUser::new("a@x.com", "secret123", "A", "member", "eng").unwrap();
        let id = UserId::new();
        let now = Utc::now();

        let profile = new_user.to_profile(id.clone(), now);

        assert_eq!(profile.id(), &id);
        assert_eq!(profile.name().as_str(), "A");
        assert_eq!(profile.email().as_str(), "a@x.com");
        assert_eq!(profile.role().as_str(), "member");
        assert_eq!(profile.department().as_str(), "eng");
        assert_eq!(profile.created_at(), now);
    }
}
