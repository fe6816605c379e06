//! Ledger consistency audit.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use booking_core::result::AppResult;
use booking_domain::model::RoomOccupancy;
use booking_domain::ports::OccupancyQuery;

/// Result of comparing every room counter with its reservations.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// All rooms, in the order the query returned them.
    pub rooms: Vec<RoomOccupancy>,
    /// Rooms whose counter drifted or left `0..=initial_capacity`.
    pub drifted: Vec<RoomOccupancy>,
}

impl AuditReport {
    /// True when no room needs attention.
    pub fn is_clean(&self) -> bool {
        self.drifted.is_empty()
    }
}

/// Reports rooms whose capacity counter disagrees with the reservation
/// rows. Never writes.
#[derive(Clone)]
pub struct LedgerAuditor {
    occupancy: Arc<dyn OccupancyQuery>,
}

impl std::fmt::Debug for LedgerAuditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerAuditor").finish()
    }
}

impl LedgerAuditor {
    /// Creates an auditor over the given occupancy source.
    pub fn new(occupancy: Arc<dyn OccupancyQuery>) -> Self {
        Self { occupancy }
    }

    /// Reads every room's counter next to its reservation count.
    ///
    /// A room is reported when `initial_capacity - capacity` differs from
    /// its reservations or the counter leaves `0..=initial_capacity`. Each
    /// reported room is logged at `warn`; counters are left as they are.
    pub async fn audit(&self) -> AppResult<AuditReport> {
        let rooms = self.occupancy.list_occupancy().await?;
        let drifted: Vec<RoomOccupancy> =
            rooms.iter().filter(|r| !r.is_consistent()).cloned().collect();

        for room in &drifted {
            warn!(
                room_id = %room.room_id,
                capacity = room.capacity,
                initial_capacity = room.initial_capacity,
                reservations = room.reservations,
                drift = room.drift(),
                "Room capacity disagrees with reservations"
            );
        }

        info!(
            rooms = rooms.len(),
            drifted = drifted.len(),
            "Ledger audit complete"
        );

        Ok(AuditReport { rooms, drifted })
    }
}
