//! Room allocation: creating, reading, and moving reservations.
//!
//! The allocator is the only writer of reservations and room capacity.
//! Every step returns a tagged [`AppError`]; business-rule rejections are
//! propagated unchanged and never retried. When a store write fails after
//! a slot was taken, the slot is handed back before the error is returned.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::types::{ReservationId, RoomId, UserId};
use booking_domain::model::{Reservation, ReservationWithRoom};
use booking_domain::ports::{CapacityLedger, ReservationStore};

use crate::eligibility::EligibilityChecker;

/// Orchestrates eligibility, capacity, and reservation writes.
#[derive(Clone)]
pub struct BookingAllocator {
    /// Ticket gate for new reservations.
    eligibility: EligibilityChecker,
    /// Room capacity counters.
    ledger: Arc<dyn CapacityLedger>,
    /// Reservation persistence.
    reservations: Arc<dyn ReservationStore>,
}

impl std::fmt::Debug for BookingAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingAllocator")
            .field("eligibility", &self.eligibility)
            .finish_non_exhaustive()
    }
}

impl BookingAllocator {
    /// Creates a new booking allocator.
    pub fn new(
        eligibility: EligibilityChecker,
        ledger: Arc<dyn CapacityLedger>,
        reservations: Arc<dyn ReservationStore>,
    ) -> Self {
        Self {
            eligibility,
            ledger,
            reservations,
        }
    }

    /// Books a slot in `room_id` for `user_id`.
    ///
    /// Eligibility is checked before the ledger is touched, and the slot is
    /// taken before the reservation row is written. A user who already
    /// holds a reservation is rejected with `Conflict`.
    pub async fn create_reservation(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> AppResult<Reservation> {
        self.eligibility.check_eligibility(user_id).await?;

        if let Some(existing) = self.reservations.find_by_user(user_id).await? {
            debug!(
                user_id = %user_id,
                reservation_id = %existing.id,
                "User already holds a reservation"
            );
            return Err(AppError::conflict(format!(
                "User {user_id} already holds reservation {}",
                existing.id
            )));
        }

        self.ledger.find_room(room_id).await?;
        let remaining = self.ledger.reserve_slot(room_id).await?;

        match self.reservations.create(user_id, room_id).await {
            Ok(reservation) => {
                info!(
                    user_id = %user_id,
                    room_id = %room_id,
                    reservation_id = %reservation.id,
                    remaining,
                    "Reservation created"
                );
                Ok(reservation)
            }
            Err(cause) => Err(self.release_after_failure(user_id, room_id, None, cause).await),
        }
    }

    /// Returns the user's reservation with a snapshot of its room.
    pub async fn get_reservation_for_user(&self, user_id: UserId) -> AppResult<ReservationWithRoom> {
        let reservation = self.find_own(user_id).await?;
        let room = self.ledger.find_room(reservation.room_id).await?;

        Ok(ReservationWithRoom {
            id: reservation.id,
            room,
        })
    }

    /// Moves the user's reservation `reservation_id` to `room_id`.
    ///
    /// Only ownership and capacity are checked; eligibility is not
    /// re-evaluated. The new slot is taken before the old one is released,
    /// so a full target leaves the source room untouched. Moving to the
    /// current room still reserves and releases on that room.
    ///
    /// The row is only rewritten if it still points at the room this call
    /// released. A concurrent move of the same reservation makes the later
    /// writer fail with `Conflict` after its ledger steps are undone.
    pub async fn modify_reservation(
        &self,
        user_id: UserId,
        reservation_id: ReservationId,
        room_id: RoomId,
    ) -> AppResult<Reservation> {
        let own = self.find_own(user_id).await?;
        let target = self
            .reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {reservation_id} not found")))?;

        if own.id != target.id {
            debug!(
                user_id = %user_id,
                reservation_id = %reservation_id,
                "Reservation belongs to another user"
            );
            return Err(AppError::forbidden(format!(
                "Reservation {reservation_id} does not belong to user {user_id}"
            )));
        }

        self.ledger.find_room(room_id).await?;
        self.ledger.reserve_slot(room_id).await?;

        let previous = target.room_id;
        if let Err(cause) = self.ledger.release_slot(previous).await {
            return Err(self
                .release_after_failure(user_id, room_id, Some(target.id), cause)
                .await);
        }

        let moved = self
            .reservations
            .update_room(target.id, previous, room_id)
            .await;
        match moved {
            Ok(reservation) => {
                info!(
                    user_id = %user_id,
                    reservation_id = %reservation.id,
                    from_room = %previous,
                    to_room = %room_id,
                    "Reservation moved"
                );
                Ok(reservation)
            }
            Err(cause) => Err(self
                .restore_after_failed_move(user_id, target.id, previous, room_id, cause)
                .await),
        }
    }

    async fn find_own(&self, user_id: UserId) -> AppResult<Reservation> {
        self.reservations
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} has no reservation")))
    }

    /// Hands back a slot taken in `room_id` after a later step failed.
    ///
    /// Returns `cause` when the release succeeds, or an `Internal` error
    /// when the ledger is left decremented.
    async fn release_after_failure(
        &self,
        user_id: UserId,
        room_id: RoomId,
        reservation_id: Option<ReservationId>,
        cause: AppError,
    ) -> AppError {
        match self.ledger.release_slot(room_id).await {
            Ok(remaining) => {
                warn!(
                    user_id = %user_id,
                    room_id = %room_id,
                    reservation_id = ?reservation_id,
                    remaining,
                    error = %cause,
                    "Released slot after failed write"
                );
                cause
            }
            Err(release_err) => {
                error!(
                    user_id = %user_id,
                    room_id = %room_id,
                    reservation_id = ?reservation_id,
                    cause = %cause,
                    error = %release_err,
                    "Compensating release failed, room capacity is stuck one slot low"
                );
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Could not release slot in room {room_id} after: {cause}"),
                    release_err,
                )
            }
        }
    }

    /// Undoes a move whose reservation update failed: retakes the slot in
    /// the previous room, then releases the one taken in the new room.
    async fn restore_after_failed_move(
        &self,
        user_id: UserId,
        reservation_id: ReservationId,
        previous: RoomId,
        room_id: RoomId,
        cause: AppError,
    ) -> AppError {
        if let Err(reserve_err) = self.ledger.reserve_slot(previous).await {
            error!(
                user_id = %user_id,
                room_id = %previous,
                reservation_id = %reservation_id,
                cause = %cause,
                error = %reserve_err,
                "Could not retake slot in previous room after failed move"
            );
            let released = self.ledger.release_slot(room_id).await;
            if let Err(release_err) = &released {
                error!(
                    user_id = %user_id,
                    room_id = %room_id,
                    reservation_id = %reservation_id,
                    error = %release_err,
                    "Compensating release failed, room capacity is stuck one slot low"
                );
            }
            return AppError::with_source(
                ErrorKind::Internal,
                format!("Could not restore room {previous} after: {cause}"),
                reserve_err,
            );
        }

        self.release_after_failure(user_id, room_id, Some(reservation_id), cause)
            .await
    }
}
