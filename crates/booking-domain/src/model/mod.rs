//! Domain entity models.

pub mod enrollment;
pub mod occupancy;
pub mod reservation;
pub mod room;
pub mod ticket;

pub use enrollment::{Address, Enrollment, EnrollmentWithAddress};
pub use occupancy::RoomOccupancy;
pub use reservation::{Reservation, ReservationWithRoom};
pub use room::{Hotel, Room};
pub use ticket::{Ticket, TicketStatus, TicketType, TicketWithType};
