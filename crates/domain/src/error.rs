//! # ドメインエラー
//!
//! 値オブジェクトの生成に失敗したときのエラー。API 層で 400 に変換される。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 値が制約を満たさない（空文字列、UUID でない ID など）
    #[error("{0}")]
    Validation(String),
}
