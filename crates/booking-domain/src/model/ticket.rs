//! Ticket and ticket type entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use booking_core::error::AppError;
use booking_core::types::{EnrollmentId, TicketId, TicketTypeId};

/// Payment status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    /// Issued but not yet paid.
    Reserved,
    /// Payment confirmed.
    Paid,
}

impl TicketStatus {
    /// Check if the ticket has been paid for.
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RESERVED" => Ok(Self::Reserved),
            "PAID" => Ok(Self::Paid),
            _ => Err(AppError::validation(format!(
                "Invalid ticket status: '{s}'. Expected one of: RESERVED, PAID"
            ))),
        }
    }
}

/// Catalog entry describing what a ticket grants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Ticket type ID.
    pub id: TicketTypeId,
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price: i32,
    /// Online-only attendance.
    pub is_remote: bool,
    /// Lodging is part of the package.
    pub includes_hotel: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TicketType {
    /// Whether holders of this type may book a room.
    pub fn grants_lodging(&self) -> bool {
        self.includes_hotel && !self.is_remote
    }
}

/// A ticket issued against an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket ID.
    pub id: TicketId,
    /// Type of the ticket.
    pub ticket_type_id: TicketTypeId,
    /// Enrollment the ticket belongs to.
    pub enrollment_id: EnrollmentId,
    /// Payment status.
    pub status: TicketStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A ticket with its embedded type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketWithType {
    /// The ticket row.
    #[serde(flatten)]
    pub ticket: Ticket,
    /// The ticket's type.
    #[serde(rename = "TicketType")]
    pub ticket_type: TicketType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_type(is_remote: bool, includes_hotel: bool) -> TicketType {
        TicketType {
            id: TicketTypeId(1),
            name: "Full pass".to_string(),
            price: 60000,
            is_remote,
            includes_hotel,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_in_person_hotel_types_grant_lodging() {
        assert!(ticket_type(false, true).grants_lodging());
        assert!(!ticket_type(false, false).grants_lodging());
        assert!(!ticket_type(true, true).grants_lodging());
        assert!(!ticket_type(true, false).grants_lodging());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("paid".parse::<TicketStatus>().unwrap(), TicketStatus::Paid);
        assert_eq!(
            "RESERVED".parse::<TicketStatus>().unwrap(),
            TicketStatus::Reserved
        );
        assert!("refunded".parse::<TicketStatus>().is_err());
        assert!(TicketStatus::Paid.is_paid());
        assert!(!TicketStatus::Reserved.is_paid());
    }
}
