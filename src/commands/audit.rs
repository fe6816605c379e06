//! Ledger audit command.

use std::process::ExitCode;
use std::sync::Arc;

use sqlx::PgPool;

use super::rooms::OccupancyRow;
use crate::output::{self, OutputFormat};
use booking_core::error::AppError;
use booking_database::repositories::RoomRepository;
use booking_service::LedgerAuditor;

/// Execute `audit`. Exits with status 2 when any room drifted.
pub async fn execute(pool: &PgPool, format: OutputFormat) -> Result<ExitCode, AppError> {
    let auditor = LedgerAuditor::new(Arc::new(RoomRepository::new(pool.clone())));
    let report = auditor.audit().await?;

    match format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Table => {
            if report.is_clean() {
                output::print_success(&format!(
                    "All {} rooms match their reservations.",
                    report.rooms.len()
                ));
            } else {
                let rows: Vec<OccupancyRow> =
                    report.drifted.iter().map(OccupancyRow::from).collect();
                output::print_list(&rows, format)?;
                output::print_warning(&format!(
                    "{} of {} rooms drifted",
                    report.drifted.len(),
                    report.rooms.len()
                ));
            }
        }
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
