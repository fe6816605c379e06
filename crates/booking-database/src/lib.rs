//! # booking-database
//!
//! PostgreSQL connection management, embedded migrations, and the
//! repositories implementing the booking ports.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
