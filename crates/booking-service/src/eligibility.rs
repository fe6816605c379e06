//! Ticket-based eligibility for room bookings.

use std::sync::Arc;

use tracing::debug;

use booking_core::error::AppError;
use booking_core::types::UserId;
use booking_domain::ports::{EnrollmentLookup, TicketLookup};

/// Decides whether a user holds a paid, in-person, hotel-inclusive ticket.
///
/// Read-only: never mutates enrollments or tickets.
#[derive(Clone)]
pub struct EligibilityChecker {
    /// Enrollment lookup.
    enrollments: Arc<dyn EnrollmentLookup>,
    /// Ticket lookup.
    tickets: Arc<dyn TicketLookup>,
}

impl std::fmt::Debug for EligibilityChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EligibilityChecker").finish()
    }
}

impl EligibilityChecker {
    /// Creates a new eligibility checker.
    pub fn new(enrollments: Arc<dyn EnrollmentLookup>, tickets: Arc<dyn TicketLookup>) -> Self {
        Self {
            enrollments,
            tickets,
        }
    }

    /// Checks that the user may book a room.
    ///
    /// Fails with `NotFound` when the user has no enrollment or the
    /// enrollment has no ticket, and with `PaymentRequired` when the ticket
    /// is unpaid, remote, or excludes lodging. The three ticket conditions
    /// form one gate and share one error kind.
    pub async fn check_eligibility(&self, user_id: UserId) -> Result<(), AppError> {
        let enrollment = self
            .enrollments
            .find_with_address_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No enrollment found for user {user_id}")))?;

        let ticket = self
            .tickets
            .find_by_enrollment(enrollment.id())
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "No ticket found for enrollment {}",
                    enrollment.id()
                ))
            })?;

        let paid = ticket.ticket.status.is_paid();
        let lodging = ticket.ticket_type.grants_lodging();

        if !paid || !lodging {
            debug!(
                user_id = %user_id,
                status = %ticket.ticket.status,
                is_remote = ticket.ticket_type.is_remote,
                includes_hotel = ticket.ticket_type.includes_hotel,
                "User is not eligible for lodging"
            );
            let reason = if !paid {
                "ticket has not been paid"
            } else {
                "ticket type does not include in-person lodging"
            };
            return Err(AppError::payment_required(format!(
                "User {user_id} cannot book a room: {reason}"
            )));
        }

        Ok(())
    }
}
