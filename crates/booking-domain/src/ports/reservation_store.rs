//! Reservation persistence port.

use async_trait::async_trait;

use booking_core::result::AppResult;
use booking_core::types::{ReservationId, RoomId, UserId};

use crate::model::Reservation;

/// Storage of reservations, at most one per user.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Persist a new reservation.
    ///
    /// Fails with `Conflict` if the user already holds one.
    async fn create(&self, user_id: UserId, room_id: RoomId) -> AppResult<Reservation>;

    /// Find the reservation owned by a user.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Reservation>>;

    /// Find a reservation by its ID.
    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>>;

    /// Point an existing reservation at another room, provided it still
    /// occupies `expected_room`.
    ///
    /// Fails with `NotFound` if the reservation is gone and with `Conflict`
    /// if it was moved by someone else in the meantime.
    async fn update_room(
        &self,
        id: ReservationId,
        expected_room: RoomId,
        room_id: RoomId,
    ) -> AppResult<Reservation>;
}
