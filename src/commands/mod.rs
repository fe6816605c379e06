//! CLI command definitions and dispatch.

pub mod audit;
pub mod migrate;
pub mod reservation;
pub mod rooms;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use crate::output::OutputFormat;
use booking_core::config::AppConfig;
use booking_core::error::AppError;
use booking_database::DatabasePool;
use booking_database::repositories::{
    EnrollmentRepository, ReservationRepository, RoomRepository, TicketRepository,
};
use booking_service::{BookingAllocator, EligibilityChecker};

/// Lodging booking administration
#[derive(Debug, Parser)]
#[command(name = "booking", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run embedded database migrations
    Migrate,
    /// Book a room slot for a user
    Create(reservation::CreateArgs),
    /// Show a user's reservation
    Show(reservation::ShowArgs),
    /// Move a user's reservation to another room
    Modify(reservation::ModifyArgs),
    /// List room occupancy
    Rooms,
    /// Compare room capacity with reservations
    Audit,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<ExitCode, AppError> {
        let db = DatabasePool::connect(&config.database).await?;
        let pool = db.pool().clone();

        let result = match &self.command {
            Commands::Migrate => migrate::execute(&db).await,
            Commands::Create(args) => reservation::create(args, &pool, self.format).await,
            Commands::Show(args) => reservation::show(args, &pool, self.format).await,
            Commands::Modify(args) => reservation::modify(args, &pool, self.format).await,
            Commands::Rooms => rooms::execute(&pool, self.format).await,
            Commands::Audit => audit::execute(&pool, self.format).await,
        };

        db.close().await;
        result
    }
}

/// Helper: wire the allocator against PostgreSQL repositories
pub fn allocator(pool: &PgPool) -> BookingAllocator {
    let enrollments = Arc::new(EnrollmentRepository::new(pool.clone()));
    let tickets = Arc::new(TicketRepository::new(pool.clone()));

    BookingAllocator::new(
        EligibilityChecker::new(enrollments, tickets),
        Arc::new(RoomRepository::new(pool.clone())),
        Arc::new(ReservationRepository::new(pool.clone())),
    )
}
