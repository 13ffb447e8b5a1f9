//! IdGenerator port - ID 生成の抽象化
//!
//! 履歴レコードの ID を採番します。テスト容易性のために trait にしています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::StatusUpdateId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は書き込みごとに新しい ID を返す
///
/// # Thread Safety
/// - `Send + Sync` を要求（リクエストごとに共有されるため）
pub trait IdGenerator: Send + Sync {
    fn generate_status_update_id(&self) -> StatusUpdateId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って時刻部分を決めるので、FixedClock と組み合わせると
/// タイムスタンプ部分が決定的になります。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_status_update_id(&self) -> StatusUpdateId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        StatusUpdateId::from(ulid)
    }
}
