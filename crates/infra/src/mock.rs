//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! user-admin-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use user_admin_domain::user::{Profile, UserId};

use crate::{error::InfraError, repository::ProfileRepository};

// ===== MockProfileRepository =====

/// インメモリの ProfileRepository
///
/// `fail_*` で次回以降の操作を失敗させられる。
/// `calls()` で呼び出し順（`"find_role"`, `"insert"`, `"delete"`）を検証できる。
#[derive(Clone, Default)]
pub struct MockProfileRepository {
    profiles:        Arc<Mutex<Vec<Profile>>>,
    calls:           Arc<Mutex<Vec<&'static str>>>,
    find_role_error: Arc<Mutex<Option<String>>>,
    insert_error:    Arc<Mutex<Option<String>>>,
    delete_error:    Arc<Mutex<Option<String>>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&self, profile: Profile) {
        self.profiles.lock().unwrap().push(profile);
    }

    /// 指定 ID のプロフィールを取得する
    pub fn get(&self, id: &UserId) -> Option<Profile> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_find_role(&self, message: impl Into<String>) {
        *self.find_role_error.lock().unwrap() = Some(message.into());
    }

    pub fn fail_insert(&self, message: impl Into<String>) {
        *self.insert_error.lock().unwrap() = Some(message.into());
    }

    pub fn fail_delete(&self, message: impl Into<String>) {
        *self.delete_error.lock().unwrap() = Some(message.into());
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected_error(slot: &Mutex<Option<String>>) -> Result<(), InfraError> {
        match slot.lock().unwrap().as_ref() {
            Some(message) => Err(InfraError::rejected(400, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_role(&self, id: &UserId) -> Result<Option<String>, InfraError> {
        self.record("find_role");
        Self::injected_error(&self.find_role_error)?;
        Ok(self.get(id).map(|p| p.role().as_str().to_string()))
    }

    async fn insert(&self, profile: &Profile) -> Result<(), InfraError> {
        self.record("insert");
        Self::injected_error(&self.insert_error)?;
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.id() == profile.id()) {
            return Err(InfraError::rejected(
                409,
                r#"duplicate key value violates unique constraint "users_pkey""#,
            ));
        }
        profiles.push(profile.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), InfraError> {
        self.record("delete");
        Self::injected_error(&self.delete_error)?;
        self.profiles.lock().unwrap().retain(|p| p.id() != id);
        Ok(())
    }
}
