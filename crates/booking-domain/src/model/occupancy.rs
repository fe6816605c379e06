//! Read model comparing the capacity counter with reservation rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use booking_core::types::RoomId;

/// Capacity counter of one room next to the number of reservations that
/// point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoomOccupancy {
    /// Room ID.
    pub room_id: RoomId,
    /// Room display name.
    pub name: String,
    /// Live remaining capacity.
    pub capacity: i32,
    /// Capacity the room was created with.
    pub initial_capacity: i32,
    /// Reservations currently referencing the room.
    pub reservations: i64,
}

impl RoomOccupancy {
    /// Difference between slots taken per the counter and actual
    /// reservations. Zero when the ledger is consistent.
    pub fn drift(&self) -> i64 {
        i64::from(self.initial_capacity) - i64::from(self.capacity) - self.reservations
    }

    /// Whether the counter lies within `0..=initial_capacity`.
    pub fn within_bounds(&self) -> bool {
        (0..=self.initial_capacity).contains(&self.capacity)
    }

    /// Whether the room needs attention.
    pub fn is_consistent(&self) -> bool {
        self.drift() == 0 && self.within_bounds()
    }
}
