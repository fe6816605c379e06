//! Reservation commands: create, show, modify.

use std::process::ExitCode;

use clap::Args;
use serde::Serialize;
use sqlx::PgPool;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use booking_core::error::AppError;
use booking_core::types::{ReservationId, RoomId, UserId};
use booking_domain::model::Reservation;

/// Arguments for `create`
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Booking user ID
    #[arg(long)]
    pub user: UserId,
    /// Room to book
    #[arg(long)]
    pub room: RoomId,
}

/// Arguments for `show`
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// User whose reservation to show
    #[arg(long)]
    pub user: UserId,
}

/// Arguments for `modify`
#[derive(Debug, Args)]
pub struct ModifyArgs {
    /// Acting user ID
    #[arg(long)]
    pub user: UserId,
    /// Reservation to move
    #[arg(long)]
    pub reservation: ReservationId,
    /// Destination room
    #[arg(long)]
    pub room: RoomId,
}

/// Reservation display row
#[derive(Debug, Serialize, Tabled)]
struct ReservationRow {
    /// Reservation ID
    id: ReservationId,
    /// Owner
    user: UserId,
    /// Room
    room: RoomId,
    /// Last change
    updated: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            user: r.user_id,
            room: r.room_id,
            updated: r.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Room snapshot row for `show`
#[derive(Debug, Serialize, Tabled)]
struct BookedRoomRow {
    /// Reservation ID
    reservation: ReservationId,
    /// Room ID
    room: RoomId,
    /// Room name
    name: String,
    /// Free slots
    capacity: i32,
    /// Total slots
    initial_capacity: i32,
}

/// Execute `create`
pub async fn create(
    args: &CreateArgs,
    pool: &PgPool,
    format: OutputFormat,
) -> Result<ExitCode, AppError> {
    let reservation = super::allocator(pool)
        .create_reservation(args.user, args.room)
        .await?;

    output::print_item(&ReservationRow::from(&reservation), format)?;
    Ok(ExitCode::SUCCESS)
}

/// Execute `show`
pub async fn show(args: &ShowArgs, pool: &PgPool, format: OutputFormat) -> Result<ExitCode, AppError> {
    let booked = super::allocator(pool)
        .get_reservation_for_user(args.user)
        .await?;

    let row = BookedRoomRow {
        reservation: booked.id,
        room: booked.room.id,
        name: booked.room.name,
        capacity: booked.room.capacity,
        initial_capacity: booked.room.initial_capacity,
    };
    output::print_item(&row, format)?;
    Ok(ExitCode::SUCCESS)
}

/// Execute `modify`
pub async fn modify(
    args: &ModifyArgs,
    pool: &PgPool,
    format: OutputFormat,
) -> Result<ExitCode, AppError> {
    let reservation = super::allocator(pool)
        .modify_reservation(args.user, args.reservation, args.room)
        .await?;

    output::print_item(&ReservationRow::from(&reservation), format)?;
    Ok(ExitCode::SUCCESS)
}
