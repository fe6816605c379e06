//! # booking-ledger
//!
//! In-process [`CapacityLedger`](booking_domain::ports::CapacityLedger)
//! for single-node deployments and tests. Multi-node deployments use the
//! PostgreSQL-backed `RoomRepository` from `booking-database` instead.

pub mod memory;

pub use memory::MemoryCapacityLedger;
