//! Ticket repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::types::{EnrollmentId, TicketId, TicketTypeId};
use booking_domain::model::{Ticket, TicketStatus, TicketType, TicketWithType};
use booking_domain::ports::TicketLookup;

/// Flat row produced by joining `tickets` with `ticket_types`.
#[derive(Debug, FromRow)]
struct TicketWithTypeRow {
    id: TicketId,
    ticket_type_id: TicketTypeId,
    enrollment_id: EnrollmentId,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    type_name: String,
    type_price: i32,
    type_is_remote: bool,
    type_includes_hotel: bool,
    type_created_at: DateTime<Utc>,
    type_updated_at: DateTime<Utc>,
}

impl From<TicketWithTypeRow> for TicketWithType {
    fn from(row: TicketWithTypeRow) -> Self {
        Self {
            ticket: Ticket {
                id: row.id,
                ticket_type_id: row.ticket_type_id,
                enrollment_id: row.enrollment_id,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            ticket_type: TicketType {
                id: row.ticket_type_id,
                name: row.type_name,
                price: row.type_price,
                is_remote: row.type_is_remote,
                includes_hotel: row.type_includes_hotel,
                created_at: row.type_created_at,
                updated_at: row.type_updated_at,
            },
        }
    }
}

/// Read-only repository for tickets.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketLookup for TicketRepository {
    async fn find_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AppResult<Option<TicketWithType>> {
        let row = sqlx::query_as::<_, TicketWithTypeRow>(
            "SELECT t.id, t.ticket_type_id, t.enrollment_id, t.status, t.created_at, t.updated_at, \
                    tt.name AS type_name, tt.price AS type_price, tt.is_remote AS type_is_remote, \
                    tt.includes_hotel AS type_includes_hotel, tt.created_at AS type_created_at, \
                    tt.updated_at AS type_updated_at \
             FROM tickets t \
             JOIN ticket_types tt ON tt.id = t.ticket_type_id \
             WHERE t.enrollment_id = $1",
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))?;

        Ok(row.map(TicketWithType::from))
    }
}
