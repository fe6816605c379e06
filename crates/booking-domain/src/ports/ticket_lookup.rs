//! Read-only ticket lookup port.

use async_trait::async_trait;

use booking_core::result::AppResult;
use booking_core::types::EnrollmentId;

use crate::model::TicketWithType;

/// Lookup of the ticket issued against an enrollment.
#[async_trait]
pub trait TicketLookup: Send + Sync {
    /// Find the ticket, with its type, for an enrollment.
    async fn find_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AppResult<Option<TicketWithType>>;
}
