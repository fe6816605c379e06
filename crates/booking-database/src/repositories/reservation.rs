//! Reservation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::types::{ReservationId, RoomId, UserId};
use booking_domain::model::Reservation;
use booking_domain::ports::ReservationStore;

const RESERVATION_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

/// Repository for reservations. The `reservations_user_id_key` unique
/// constraint backs the one-reservation-per-user rule.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for ReservationRepository {
    async fn create(&self, user_id: UserId, room_id: RoomId) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations (user_id, room_id) VALUES ($1, $2) \
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(user_id)
        .bind(room_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate =
                matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
            if duplicate {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("User {user_id} already holds a reservation"),
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create reservation", e)
            }
        })
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reservation", e))
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reservation", e))
    }

    async fn update_room(
        &self,
        id: ReservationId,
        expected_room: RoomId,
        room_id: RoomId,
    ) -> AppResult<Reservation> {
        let updated = sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations SET room_id = $3, updated_at = NOW() \
             WHERE id = $1 AND room_id = $2 RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(id)
        .bind(expected_room)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update reservation", e))?;

        match updated {
            Some(reservation) => Ok(reservation),
            None => match self.find_by_id(id).await? {
                Some(current) => Err(AppError::conflict(format!(
                    "Reservation {id} moved to room {} before it could leave room {expected_room}",
                    current.room_id
                ))),
                None => Err(AppError::not_found(format!("Reservation {id} not found"))),
            },
        }
    }
}
