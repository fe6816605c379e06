//! In-memory doubles for the booking ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Barrier;

use booking_core::error::AppError;
use booking_core::result::AppResult;
use booking_core::types::{
    EnrollmentId, HotelId, ReservationId, RoomId, TicketId, TicketTypeId, UserId,
};
use booking_domain::model::{
    Enrollment, EnrollmentWithAddress, Reservation, Room, RoomOccupancy, Ticket, TicketStatus,
    TicketType, TicketWithType,
};
use booking_domain::ports::{
    CapacityLedger, EnrollmentLookup, OccupancyQuery, ReservationStore, TicketLookup,
};
use booking_ledger::MemoryCapacityLedger;

/// Enrollments and tickets keyed the way the lookups query them.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    enrollments: HashMap<UserId, EnrollmentWithAddress>,
    tickets: HashMap<EnrollmentId, TicketWithType>,
}

impl FakeDirectory {
    /// Registers an enrollment without a ticket.
    pub fn with_enrollment(mut self, user_id: UserId) -> Self {
        let enrollment = EnrollmentWithAddress {
            enrollment: Enrollment {
                id: EnrollmentId(user_id.get() + 100),
                name: format!("Attendee {user_id}"),
                cpf: "00000000000".to_string(),
                birthday: Utc::now(),
                phone: "5511999999999".to_string(),
                user_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            address: None,
        };
        self.enrollments.insert(user_id, enrollment);
        self
    }

    /// Registers an enrollment with a ticket of the given shape.
    pub fn with_ticket(
        self,
        user_id: UserId,
        status: TicketStatus,
        is_remote: bool,
        includes_hotel: bool,
    ) -> Self {
        let mut directory = self.with_enrollment(user_id);
        let enrollment_id = directory.enrollments[&user_id].id();
        let ticket = TicketWithType {
            ticket: Ticket {
                id: TicketId(enrollment_id.get()),
                ticket_type_id: TicketTypeId(1),
                enrollment_id,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            ticket_type: TicketType {
                id: TicketTypeId(1),
                name: "Pass".to_string(),
                price: 25000,
                is_remote,
                includes_hotel,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        };
        directory.tickets.insert(enrollment_id, ticket);
        directory
    }

    /// Registers a user holding a paid, in-person, hotel-inclusive ticket.
    pub fn with_eligible(self, user_id: UserId) -> Self {
        self.with_ticket(user_id, TicketStatus::Paid, false, true)
    }
}

#[async_trait]
impl EnrollmentLookup for FakeDirectory {
    async fn find_with_address_by_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<EnrollmentWithAddress>> {
        Ok(self.enrollments.get(&user_id).cloned())
    }
}

#[async_trait]
impl TicketLookup for FakeDirectory {
    async fn find_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AppResult<Option<TicketWithType>> {
        Ok(self.tickets.get(&enrollment_id).cloned())
    }
}

/// Reservation store enforcing one reservation per user, with switchable
/// write failures.
#[derive(Debug, Default)]
pub struct MemoryReservationStore {
    rows: Mutex<Vec<Reservation>>,
    next_id: AtomicI32,
    fail_writes: AtomicBool,
}

impl MemoryReservationStore {
    /// Makes every subsequent create/update fail with a database error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Copies the stored rows.
    pub fn rows(&self) -> Vec<Reservation> {
        self.rows.lock().unwrap().clone()
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset by peer"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn create(&self, user_id: UserId, room_id: RoomId) -> AppResult<Reservation> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.user_id == user_id) {
            return Err(AppError::conflict(format!(
                "User {user_id} already holds a reservation"
            )));
        }
        let reservation = Reservation {
            id: ReservationId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            user_id,
            room_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        rows.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Reservation>> {
        Ok(self.rows().into_iter().find(|r| r.user_id == user_id))
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self.rows().into_iter().find(|r| r.id == id))
    }

    async fn update_room(
        &self,
        id: ReservationId,
        expected_room: RoomId,
        room_id: RoomId,
    ) -> AppResult<Reservation> {
        self.check_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
        if row.room_id != expected_room {
            return Err(AppError::conflict(format!(
                "Reservation {id} no longer occupies room {expected_room}"
            )));
        }
        row.room_id = room_id;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

/// Store whose `find_by_id` waits until `parties` callers have arrived,
/// so concurrent modifies all read the same reservation state.
#[derive(Debug)]
pub struct LockstepStore {
    inner: Arc<MemoryReservationStore>,
    barrier: Barrier,
}

impl LockstepStore {
    /// Wraps a store.
    pub fn new(inner: Arc<MemoryReservationStore>, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl ReservationStore for LockstepStore {
    async fn create(&self, user_id: UserId, room_id: RoomId) -> AppResult<Reservation> {
        self.inner.create(user_id, room_id).await
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Reservation>> {
        self.inner.find_by_user(user_id).await
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let found = self.inner.find_by_id(id).await;
        self.barrier.wait().await;
        found
    }

    async fn update_room(
        &self,
        id: ReservationId,
        expected_room: RoomId,
        room_id: RoomId,
    ) -> AppResult<Reservation> {
        self.inner.update_room(id, expected_room, room_id).await
    }
}

/// Ledger wrapper that can be told to fail releases.
#[derive(Debug, Default)]
pub struct FlakyLedger {
    inner: MemoryCapacityLedger,
    fail_releases: AtomicBool,
}

impl FlakyLedger {
    /// Wraps a ledger.
    pub fn new(inner: MemoryCapacityLedger) -> Self {
        Self {
            inner,
            fail_releases: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent release fail.
    pub fn fail_releases(&self) {
        self.fail_releases.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CapacityLedger for FlakyLedger {
    async fn find_room(&self, room_id: RoomId) -> AppResult<Room> {
        self.inner.find_room(room_id).await
    }

    async fn reserve_slot(&self, room_id: RoomId) -> AppResult<i32> {
        self.inner.reserve_slot(room_id).await
    }

    async fn release_slot(&self, room_id: RoomId) -> AppResult<i32> {
        if self.fail_releases.load(Ordering::SeqCst) {
            return Err(AppError::database("statement timeout"));
        }
        self.inner.release_slot(room_id).await
    }
}

/// Occupancy assembled from a memory ledger and a memory store.
#[derive(Debug)]
pub struct MemoryOccupancy {
    pub ledger: MemoryCapacityLedger,
    pub store: Arc<MemoryReservationStore>,
}

#[async_trait]
impl OccupancyQuery for MemoryOccupancy {
    async fn list_occupancy(&self) -> AppResult<Vec<RoomOccupancy>> {
        let reservations = self.store.rows();
        Ok(self
            .ledger
            .rooms()
            .await
            .into_iter()
            .map(|room| RoomOccupancy {
                room_id: room.id,
                reservations: reservations.iter().filter(|r| r.room_id == room.id).count() as i64,
                name: room.name,
                capacity: room.capacity,
                initial_capacity: room.initial_capacity,
            })
            .collect())
    }
}

/// A room with all slots free.
pub fn room(id: i32, capacity: i32) -> Room {
    Room {
        id: RoomId(id),
        name: format!("{id:03}"),
        capacity,
        initial_capacity: capacity,
        hotel_id: HotelId(1),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
