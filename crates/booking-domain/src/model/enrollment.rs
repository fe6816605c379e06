//! Enrollment and address entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use booking_core::types::{EnrollmentId, UserId};

/// A user's enrollment in the event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrollment ID.
    pub id: EnrollmentId,
    /// Full name of the attendee.
    pub name: String,
    /// National taxpayer number.
    pub cpf: String,
    /// Date of birth.
    pub birthday: DateTime<Utc>,
    /// Contact phone number.
    pub phone: String,
    /// Owning user.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Postal address attached to an enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address row ID.
    pub id: i32,
    /// Postal code.
    pub cep: String,
    /// Street name.
    pub street: String,
    /// City.
    pub city: String,
    /// State abbreviation.
    pub state: String,
    /// Street number.
    pub number: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Apartment, floor, etc.
    pub address_detail: Option<String>,
    /// Owning enrollment.
    pub enrollment_id: EnrollmentId,
}

/// An enrollment together with its address, if one was registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentWithAddress {
    /// The enrollment row.
    #[serde(flatten)]
    pub enrollment: Enrollment,
    /// The enrollment's address.
    #[serde(rename = "Address")]
    pub address: Option<Address>,
}

impl EnrollmentWithAddress {
    /// The enrollment ID.
    pub fn id(&self) -> EnrollmentId {
        self.enrollment.id
    }
}
