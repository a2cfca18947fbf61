//! # ヘルスチェック
//!
//! `GET /health` のレスポンス型。

use serde::{Deserialize, Serialize};

/// 稼働中を示すステータス
pub const HEALTHY: &str = "healthy";

/// ヘルスチェックレスポンス
///
/// ```
/// use user_admin_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    /// 稼働状態
    pub status:  String,
    /// 稼働中のバイナリのバージョン
    pub version: String,
}

impl HealthResponse {
    /// 稼働中のレスポンスを作成する
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  HEALTHY.to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_healthyのjson表現() {
        let json = serde_json::to_string(&HealthResponse::healthy("1.2.3")).unwrap();

        assert_snapshot!(json, @r#"{"status":"healthy","version":"1.2.3"}"#);
    }
}
