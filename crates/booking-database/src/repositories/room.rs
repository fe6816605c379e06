//! Room repository: the PostgreSQL-backed capacity ledger.
//!
//! Slot reservation is a single conditional `UPDATE`, so the row lock
//! taken by PostgreSQL serializes concurrent callers on the same room and
//! the capacity check cannot race with the decrement.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::types::{HotelId, RoomId};
use booking_domain::model::{Room, RoomOccupancy};
use booking_domain::ports::{CapacityLedger, OccupancyQuery};

const ROOM_COLUMNS: &str = "id, name, capacity, initial_capacity, hotel_id, created_at, updated_at";

/// Repository for rooms and their live capacity counters.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by ID.
    pub async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"))
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    /// Create a room with all of its slots free.
    pub async fn create(&self, hotel_id: HotelId, name: &str, capacity: i32) -> AppResult<Room> {
        if capacity < 0 {
            return Err(AppError::validation(format!(
                "Room capacity must be non-negative, got {capacity}"
            )));
        }

        sqlx::query_as::<_, Room>(&format!(
            "INSERT INTO rooms (name, capacity, initial_capacity, hotel_id) \
             VALUES ($1, $2, $2, $3) RETURNING {ROOM_COLUMNS}"
        ))
        .bind(name)
        .bind(capacity)
        .bind(hotel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create room", e))
    }

    async fn exists(&self, room_id: RoomId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to probe room", e))
    }
}

#[async_trait]
impl CapacityLedger for RoomRepository {
    async fn find_room(&self, room_id: RoomId) -> AppResult<Room> {
        self.find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))
    }

    async fn reserve_slot(&self, room_id: RoomId) -> AppResult<i32> {
        let remaining = sqlx::query_scalar::<_, i32>(
            "UPDATE rooms SET capacity = capacity - 1, updated_at = NOW() \
             WHERE id = $1 AND capacity > 0 RETURNING capacity",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve slot", e))?;

        match remaining {
            Some(remaining) => {
                debug!(room_id = %room_id, remaining, "Slot reserved");
                Ok(remaining)
            }
            None if self.exists(room_id).await? => Err(AppError::full_room(format!(
                "Room {room_id} is at full capacity"
            ))),
            None => Err(AppError::not_found(format!("Room {room_id} not found"))),
        }
    }

    async fn release_slot(&self, room_id: RoomId) -> AppResult<i32> {
        let remaining = sqlx::query_scalar::<_, i32>(
            "UPDATE rooms SET capacity = capacity + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING capacity",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release slot", e))?
        .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;

        debug!(room_id = %room_id, remaining, "Slot released");
        Ok(remaining)
    }
}

#[async_trait]
impl OccupancyQuery for RoomRepository {
    async fn list_occupancy(&self) -> AppResult<Vec<RoomOccupancy>> {
        sqlx::query_as::<_, RoomOccupancy>(
            "SELECT r.id AS room_id, r.name, r.capacity, r.initial_capacity, \
                    COUNT(res.id) AS reservations \
             FROM rooms r \
             LEFT JOIN reservations res ON res.room_id = r.id \
             GROUP BY r.id \
             ORDER BY r.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list occupancy", e))
    }
}
