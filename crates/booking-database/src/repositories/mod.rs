//! Repository implementations for the booking ports.

pub mod enrollment;
pub mod reservation;
pub mod room;
pub mod ticket;

pub use enrollment::EnrollmentRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use ticket::TicketRepository;
