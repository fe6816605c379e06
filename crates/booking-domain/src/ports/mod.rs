//! Port traits implemented by persistence adapters and consumed by the
//! booking services.

mod capacity_ledger;
mod enrollment_lookup;
mod occupancy_query;
mod reservation_store;
mod ticket_lookup;

pub use capacity_ledger::CapacityLedger;
pub use enrollment_lookup::EnrollmentLookup;
pub use occupancy_query::OccupancyQuery;
pub use reservation_store::ReservationStore;
pub use ticket_lookup::TicketLookup;
