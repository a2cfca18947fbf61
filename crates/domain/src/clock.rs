//! # 時刻
//!
//! プロフィールの `created_at` を決める時刻源。
//! ユースケースはこのトレイト経由で現在時刻を取得し、テストでは固定時刻を注入する。

use chrono::{DateTime, SubsecRound, Utc};

/// 現在時刻の取得元
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
///
/// PostgreSQL の `TIMESTAMPTZ` はマイクロ秒精度のため、
/// 保存後に読み戻した値と一致するようマイクロ秒に切り捨てる。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}

/// 常に同じ時刻を返す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
