//! # User Admin API 設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! 認証基盤の URL とサービスキーは未設定でも起動できる（空文字列になる）。
//! その場合は最初のリクエストで認証基盤への接続が失敗する。

use std::{env, fmt};

use thiserror::Error;

/// デフォルトのバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトのポート番号
const DEFAULT_PORT: u16 = 8000;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ADMIN_API_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

/// User Admin API サーバーの設定
#[derive(Clone)]
pub struct AdminApiConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// 認証基盤（および PostgREST）のベース URL
    pub supabase_url:     String,
    /// 特権操作に使うサービスロールキー
    pub service_role_key: String,
    /// 設定時はプロフィールを PostgreSQL に直接保存する
    pub database_url:     Option<String>,
}

impl AdminApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 環境変数を書き換えずにテストできるよう、値の取得方法を注入する。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("ADMIN_API_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("ADMIN_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            supabase_url: lookup("SUPABASE_URL").unwrap_or_default(),
            service_role_key: lookup("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
        })
    }
}

// サービスキーと DB 接続文字列はログに出さない
impl fmt::Debug for AdminApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("supabase_url", &self.supabase_url)
            .field("service_role_key", &"[REDACTED]")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_未設定の値はデフォルトになる() {
        let config = AdminApiConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.supabase_url, "");
        assert_eq!(config.service_role_key, "");
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_設定した値が読み込まれる() {
        let config = AdminApiConfig::from_lookup(lookup_from(&[
            ("ADMIN_API_HOST", "127.0.0.1"),
            ("ADMIN_API_PORT", "9000"),
            ("SUPABASE_URL", "https://xyz.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
            ("DATABASE_URL", "postgres://localhost/user_admin"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.supabase_url, "https://xyz.supabase.co");
        assert_eq!(config.service_role_key, "service-key");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/user_admin")
        );
    }

    #[test]
    fn test_不正なポート番号はエラーになる() {
        let result = AdminApiConfig::from_lookup(lookup_from(&[("ADMIN_API_PORT", "http")]));

        assert!(matches!(result, Err(ConfigError::InvalidPort(v)) if v == "http"));
    }

    #[test]
    fn test_空のdatabase_urlは未設定として扱う() {
        let config = AdminApiConfig::from_lookup(lookup_from(&[("DATABASE_URL", "")])).unwrap();

        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_debug出力にサービスキーが含まれない() {
        let config = AdminApiConfig::from_lookup(lookup_from(&[(
            "SUPABASE_SERVICE_ROLE_KEY",
            "super-secret",
        )]))
        .unwrap();

        let debug = format!("{config:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
