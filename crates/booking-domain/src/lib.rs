//! # booking-domain
//!
//! Entity models and the port traits that persistence adapters implement.
//! Every struct in [`model`] represents a database row or a value object
//! and derives `Debug`, `Clone`, `Serialize` and `Deserialize`; row types
//! additionally derive `sqlx::FromRow`.

pub mod model;
pub mod ports;

pub use model::*;
pub use ports::{CapacityLedger, EnrollmentLookup, OccupancyQuery, ReservationStore, TicketLookup};
