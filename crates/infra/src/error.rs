//! # インフラ層エラー定義
//!
//! プロフィールストア（PostgreSQL / PostgREST）との通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, Http, Rejected 等）
//!
//! ストアが返したエラーメッセージは [`InfraError::message`] で取り出せる。
//! API 層はこのメッセージをそのままクライアントに返す。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From<sqlx::Error>` 等の変換や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// SQL クエリの実行失敗、接続エラー、制約違反など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// HTTP 通信エラー
    ///
    /// PostgREST への接続失敗、タイムアウト、レスポンスのデコード失敗など。
    #[error("HTTP 通信エラー: {0}")]
    Http(#[source] reqwest::Error),

    /// ストアがリクエストを拒否した
    ///
    /// PostgREST が 2xx 以外を返した場合。`message` はレスポンスボディの
    /// `message` フィールド（無ければボディ全体）。
    #[error("ストアがリクエストを拒否しました（{status}）: {message}")]
    Rejected {
        /// HTTP ステータスコード
        status:  u16,
        /// ストアが返したエラーメッセージ
        message: String,
    },
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// クライアントに返すエラーメッセージを取得する
    ///
    /// ストア由来のメッセージは加工せずに返す。
    pub fn message(&self) -> String {
        match &self.kind {
            InfraErrorKind::Database(sqlx::Error::Database(db)) => db.message().to_string(),
            InfraErrorKind::Database(e) => e.to_string(),
            InfraErrorKind::Http(e) => e.to_string(),
            InfraErrorKind::Rejected { message, .. } => message.clone(),
        }
    }

    // ===== Convenience constructors =====

    /// ストアによる拒否エラーを生成する
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Rejected {
                status,
                message: message.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Http(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_sqlx_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_profile_repo", user_id = "U-001");
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::RowNotFound.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_profile_repo"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_rejectedでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_insert");
            let _enter = span.enter();

            let err = InfraError::rejected(409, "duplicate key");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::Rejected { status, message }
                    if *status == 409 && message == "duplicate key"
            ));
            let trace_str = format!("{}", err.span_trace());
            assert!(trace_str.contains("test_insert"));
        });
    }

    #[test]
    fn test_messageはストアのメッセージをそのまま返す() {
        let err = InfraError::rejected(
            409,
            r#"duplicate key value violates unique constraint "users_pkey""#,
        );

        assert_eq!(
            err.message(),
            r#"duplicate key value violates unique constraint "users_pkey""#
        );
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::rejected(400, "bad");

        assert_eq!(
            format!("{err}"),
            "ストアがリクエストを拒否しました（400）: bad"
        );
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let err: InfraError = sqlx::Error::RowNotFound.into();

        assert!(err.source().is_some());
    }
}
