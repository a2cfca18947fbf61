//! # 外部 API クライアント
//!
//! 認証基盤（GoTrue 互換 API）との通信を担当する。

pub mod identity_provider;

pub use identity_provider::{
    GoTrueClient,
    IdentityProviderClient,
    IdentityProviderError,
    IdentityUser,
};
