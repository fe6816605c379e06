//! Hotel and room entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use booking_core::types::{HotelId, RoomId};

/// A hotel offering rooms to attendees.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Hotel ID.
    pub id: HotelId,
    /// Display name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A bookable room.
///
/// `capacity` is the live count of free slots; it is decremented on
/// allocation and incremented on release, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room ID.
    pub id: RoomId,
    /// Display name (usually the room number).
    pub name: String,
    /// Remaining free slots.
    pub capacity: i32,
    /// Slots the room was created with.
    pub initial_capacity: i32,
    /// Hotel the room belongs to.
    pub hotel_id: HotelId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Whether at least one slot is free.
    pub fn has_vacancy(&self) -> bool {
        self.capacity >= 1
    }

    /// Number of slots currently taken according to the counter.
    pub fn occupied(&self) -> i32 {
        self.initial_capacity - self.capacity
    }
}
