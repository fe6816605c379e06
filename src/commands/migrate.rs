//! Database migration command.

use std::process::ExitCode;

use crate::output;
use booking_core::error::AppError;
use booking_database::DatabasePool;

/// Check connectivity, then apply all pending migrations
pub async fn execute(db: &DatabasePool) -> Result<ExitCode, AppError> {
    db.health_check().await?;
    booking_database::migration::run_migrations(db.pool()).await?;
    output::print_success("All migrations applied successfully.");
    Ok(ExitCode::SUCCESS)
}
