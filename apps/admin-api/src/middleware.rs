//! # ミドルウェア
//!
//! User Admin API 用のミドルウェアを提供する。

pub mod auth_gate;
pub mod cors;
pub mod request_id;

pub use auth_gate::{AuthGate, Caller, require_admin};
pub use cors::cors_headers;
pub use request_id::store_request_id;
