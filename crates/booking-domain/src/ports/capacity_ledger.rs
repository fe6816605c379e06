//! Capacity ledger trait for per-room slot bookkeeping.

use async_trait::async_trait;

use booking_core::result::AppResult;
use booking_core::types::RoomId;

use crate::model::Room;

/// Trait for atomic reservation and release of room slots.
///
/// Implementations must serialize `reserve_slot`/`release_slot` per room:
/// two concurrent reservations of a room with one free slot yield exactly
/// one success and one `FullRoom`, and the counter never goes negative.
/// Operations on different rooms need no ordering between them.
#[async_trait]
pub trait CapacityLedger: Send + Sync {
    /// Look up a room with its current remaining capacity.
    ///
    /// Fails with `NotFound` if the room does not exist.
    async fn find_room(&self, room_id: RoomId) -> AppResult<Room>;

    /// Take one slot in the room and return the remaining capacity.
    ///
    /// Fails with `NotFound` if the room does not exist and `FullRoom` if
    /// its remaining capacity is below one.
    async fn reserve_slot(&self, room_id: RoomId) -> AppResult<i32>;

    /// Give one slot back and return the remaining capacity.
    ///
    /// The ledger does not track who holds a slot; callers must only
    /// release what they previously reserved.
    async fn release_slot(&self, room_id: RoomId) -> AppResult<i32>;
}
