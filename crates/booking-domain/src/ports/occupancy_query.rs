//! Read-only occupancy query port used for ledger audits.

use async_trait::async_trait;

use booking_core::result::AppResult;

use crate::model::RoomOccupancy;

/// Query comparing room counters with reservation rows.
#[async_trait]
pub trait OccupancyQuery: Send + Sync {
    /// List every room with its counter and reservation count.
    async fn list_occupancy(&self) -> AppResult<Vec<RoomOccupancy>>;
}
