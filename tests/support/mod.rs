//! Shared helpers for PostgreSQL integration tests.
//!
//! Tests run against the database named by `BOOKING_TEST_DATABASE_URL`
//! and skip when it is unset. Each test seeds its own users and rooms
//! instead of truncating, so tests can share one database concurrently.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use sqlx::PgPool;

use booking_core::config::DatabaseConfig;
use booking_core::types::{RoomId, UserId};
use booking_database::DatabasePool;
use booking_database::repositories::{
    EnrollmentRepository, ReservationRepository, RoomRepository, TicketRepository,
};
use booking_domain::model::TicketStatus;
use booking_service::{BookingAllocator, EligibilityChecker};

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Connect and migrate, or `None` when no test database is configured.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("BOOKING_TEST_DATABASE_URL") else {
        eprintln!("BOOKING_TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let config = DatabaseConfig {
        url,
        max_connections: 16,
        min_connections: 1,
        connect_timeout_seconds: 5,
        idle_timeout_seconds: 60,
    };
    let pool = DatabasePool::connect(&config)
        .await
        .expect("Failed to connect to test database")
        .into_pool();

    booking_database::migration::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Allocator wired to PostgreSQL repositories.
pub fn allocator(pool: &PgPool) -> BookingAllocator {
    let enrollments = Arc::new(EnrollmentRepository::new(pool.clone()));
    let tickets = Arc::new(TicketRepository::new(pool.clone()));
    BookingAllocator::new(
        EligibilityChecker::new(enrollments, tickets),
        Arc::new(RoomRepository::new(pool.clone())),
        Arc::new(ReservationRepository::new(pool.clone())),
    )
}

fn unique(prefix: &str) -> String {
    format!(
        "{prefix}-{}-{}",
        Utc::now().timestamp_micros(),
        SEQ.fetch_add(1, Ordering::SeqCst)
    )
}

/// Insert a user with an enrollment but no ticket.
pub async fn seed_enrolled_user(pool: &PgPool) -> (UserId, i32) {
    let user_id: i32 = sqlx::query_scalar("INSERT INTO users (email) VALUES ($1) RETURNING id")
        .bind(format!("{}@example.test", unique("user")))
        .fetch_one(pool)
        .await
        .expect("insert user");

    let enrollment_id: i32 = sqlx::query_scalar(
        "INSERT INTO enrollments (name, cpf, birthday, phone, user_id) \
         VALUES ($1, '00000000000', NOW(), '5511999999999', $2) RETURNING id",
    )
    .bind(unique("attendee"))
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("insert enrollment");

    (UserId(user_id), enrollment_id)
}

/// Insert a user holding a ticket of the given shape.
pub async fn seed_user(
    pool: &PgPool,
    status: TicketStatus,
    is_remote: bool,
    includes_hotel: bool,
) -> UserId {
    let (user_id, enrollment_id) = seed_enrolled_user(pool).await;

    let ticket_type_id: i32 = sqlx::query_scalar(
        "INSERT INTO ticket_types (name, price, is_remote, includes_hotel) \
         VALUES ($1, 25000, $2, $3) RETURNING id",
    )
    .bind(unique("pass"))
    .bind(is_remote)
    .bind(includes_hotel)
    .fetch_one(pool)
    .await
    .expect("insert ticket type");

    sqlx::query("INSERT INTO tickets (ticket_type_id, enrollment_id, status) VALUES ($1, $2, $3)")
        .bind(ticket_type_id)
        .bind(enrollment_id)
        .bind(status)
        .execute(pool)
        .await
        .expect("insert ticket");

    user_id
}

/// Insert a user who may book a room.
pub async fn seed_eligible_user(pool: &PgPool) -> UserId {
    seed_user(pool, TicketStatus::Paid, false, true).await
}

/// Insert a hotel with one room of the given capacity.
pub async fn seed_room(pool: &PgPool, capacity: i32) -> RoomId {
    let hotel_id: i32 = sqlx::query_scalar(
        "INSERT INTO hotels (name, image) VALUES ($1, 'https://example.test/hotel.png') RETURNING id",
    )
    .bind(unique("hotel"))
    .fetch_one(pool)
    .await
    .expect("insert hotel");

    RoomRepository::new(pool.clone())
        .create(booking_core::types::HotelId(hotel_id), &unique("room"), capacity)
        .await
        .expect("insert room")
        .id
}

/// Live capacity of a room.
pub async fn capacity(pool: &PgPool, room_id: RoomId) -> i32 {
    RoomRepository::new(pool.clone())
        .find_by_id(room_id)
        .await
        .expect("find room")
        .expect("room exists")
        .capacity
}
