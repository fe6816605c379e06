//! Room occupancy listing.

use std::process::ExitCode;

use serde::Serialize;
use sqlx::PgPool;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use booking_core::error::AppError;
use booking_core::types::RoomId;
use booking_database::repositories::RoomRepository;
use booking_domain::model::RoomOccupancy;
use booking_domain::ports::OccupancyQuery;

/// Occupancy display row
#[derive(Debug, Serialize, Tabled)]
pub struct OccupancyRow {
    /// Room ID
    pub room: RoomId,
    /// Room name
    pub name: String,
    /// Free slots
    pub capacity: i32,
    /// Total slots
    pub initial_capacity: i32,
    /// Reservation rows
    pub reservations: i64,
    /// Counter drift
    pub drift: i64,
}

impl From<&RoomOccupancy> for OccupancyRow {
    fn from(o: &RoomOccupancy) -> Self {
        Self {
            room: o.room_id,
            name: o.name.clone(),
            capacity: o.capacity,
            initial_capacity: o.initial_capacity,
            reservations: o.reservations,
            drift: o.drift(),
        }
    }
}

/// Execute `rooms`
pub async fn execute(pool: &PgPool, format: OutputFormat) -> Result<ExitCode, AppError> {
    let occupancy = RoomRepository::new(pool.clone()).list_occupancy().await?;
    let rows: Vec<OccupancyRow> = occupancy.iter().map(OccupancyRow::from).collect();

    output::print_list(&rows, format)?;
    Ok(ExitCode::SUCCESS)
}
