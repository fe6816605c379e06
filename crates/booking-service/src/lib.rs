//! # booking-service
//!
//! Booking allocation services. Each service orchestrates the ports from
//! `booking-domain` to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod allocator;
pub mod audit;
pub mod eligibility;

#[cfg(test)]
pub(crate) mod testing;

pub use allocator::BookingAllocator;
pub use audit::{AuditReport, LedgerAuditor};
pub use eligibility::EligibilityChecker;
