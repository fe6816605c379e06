//! Reservation entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use booking_core::types::{ReservationId, RoomId, UserId};

use super::room::Room;

/// A user's active reservation of a room slot.
///
/// At most one reservation exists per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation ID.
    pub id: ReservationId,
    /// Owning user.
    pub user_id: UserId,
    /// Room the reservation occupies.
    pub room_id: RoomId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A reservation ID with a snapshot of the room it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationWithRoom {
    /// Reservation ID.
    pub id: ReservationId,
    /// The occupied room.
    #[serde(rename = "Room")]
    pub room: Room,
}
