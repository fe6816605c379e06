//! In-memory capacity ledger using one Tokio mutex per room.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use booking_core::error::AppError;
use booking_core::result::AppResult;
use booking_core::types::RoomId;
use booking_domain::model::Room;
use booking_domain::ports::CapacityLedger;

/// In-memory capacity ledger.
///
/// Each room lives behind its own mutex, so reserve/release on one room
/// are serialized while different rooms never contend. The map shard lock
/// is only held long enough to clone the room handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryCapacityLedger {
    rooms: Arc<DashMap<RoomId, Arc<Mutex<Room>>>>,
}

impl MemoryCapacityLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger holding the given rooms.
    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let ledger = Self::new();
        for room in rooms {
            ledger.insert_room(room);
        }
        ledger
    }

    /// Registers a room, replacing any room with the same ID.
    pub fn insert_room(&self, room: Room) {
        info!(room_id = %room.id, capacity = room.capacity, "Room registered in ledger");
        self.rooms.insert(room.id, Arc::new(Mutex::new(room)));
    }

    /// Returns a copy of every room, ordered by ID.
    pub async fn rooms(&self) -> Vec<Room> {
        let handles: Vec<Arc<Mutex<Room>>> =
            self.rooms.iter().map(|entry| Arc::clone(entry.value())).collect();

        let mut rooms = Vec::with_capacity(handles.len());
        for handle in handles {
            rooms.push(handle.lock().await.clone());
        }
        rooms.sort_by_key(|room| room.id);
        rooms
    }

    fn handle(&self, room_id: RoomId) -> AppResult<Arc<Mutex<Room>>> {
        self.rooms
            .get(&room_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))
    }
}

#[async_trait]
impl CapacityLedger for MemoryCapacityLedger {
    async fn find_room(&self, room_id: RoomId) -> AppResult<Room> {
        let handle = self.handle(room_id)?;
        let room = handle.lock().await;
        Ok(room.clone())
    }

    async fn reserve_slot(&self, room_id: RoomId) -> AppResult<i32> {
        let handle = self.handle(room_id)?;
        let mut room = handle.lock().await;

        if room.capacity < 1 {
            debug!(room_id = %room_id, "Reservation denied, room is full");
            return Err(AppError::full_room(format!(
                "Room {room_id} is at full capacity"
            )));
        }

        room.capacity -= 1;
        debug!(room_id = %room_id, remaining = room.capacity, "Slot reserved");
        Ok(room.capacity)
    }

    async fn release_slot(&self, room_id: RoomId) -> AppResult<i32> {
        let handle = self.handle(room_id)?;
        let mut room = handle.lock().await;

        room.capacity += 1;
        if room.capacity > room.initial_capacity {
            warn!(
                room_id = %room_id,
                capacity = room.capacity,
                initial_capacity = room.initial_capacity,
                "Released a slot that was never reserved"
            );
        } else {
            debug!(room_id = %room_id, remaining = room.capacity, "Slot released");
        }
        Ok(room.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::error::ErrorKind;
    use booking_core::types::HotelId;
    use chrono::Utc;

    fn room(id: i32, capacity: i32) -> Room {
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

    #[tokio::test]
    async fn test_reserve_decrements_until_full() {
        let ledger = MemoryCapacityLedger::with_rooms([room(1, 2)]);

        assert_eq!(ledger.reserve_slot(RoomId(1)).await.unwrap(), 1);
        assert_eq!(ledger.reserve_slot(RoomId(1)).await.unwrap(), 0);

        let err = ledger.reserve_slot(RoomId(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::FullRoom);
        assert_eq!(ledger.find_room(RoomId(1)).await.unwrap().capacity, 0);
    }

    #[tokio::test]
    async fn test_release_increments() {
        let ledger = MemoryCapacityLedger::with_rooms([room(1, 1)]);
        ledger.reserve_slot(RoomId(1)).await.unwrap();

        assert_eq!(ledger.release_slot(RoomId(1)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_release_is_a_pure_counter() {
        let ledger = MemoryCapacityLedger::with_rooms([room(1, 1)]);

        assert_eq!(ledger.release_slot(RoomId(1)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        let ledger = MemoryCapacityLedger::new();

        for err in [
            ledger.find_room(RoomId(9)).await.unwrap_err(),
            ledger.reserve_slot(RoomId(9)).await.unwrap_err(),
            ledger.release_slot(RoomId(9)).await.unwrap_err(),
        ] {
            assert_eq!(err.kind, ErrorKind::NotFound);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reservations_on_last_slot() {
        for _ in 0..50 {
            let ledger = MemoryCapacityLedger::with_rooms([room(1, 1)]);

            let a = tokio::spawn({
                let ledger = ledger.clone();
                async move { ledger.reserve_slot(RoomId(1)).await }
            });
            let b = tokio::spawn({
                let ledger = ledger.clone();
                async move { ledger.reserve_slot(RoomId(1)).await }
            });

            let results = [a.await.unwrap(), b.await.unwrap()];
            let granted = results.iter().filter(|r| r.is_ok()).count();
            let full = results
                .iter()
                .filter(|r| matches!(r, Err(e) if e.kind == ErrorKind::FullRoom))
                .count();

            assert_eq!(granted, 1);
            assert_eq!(full, 1);
            assert_eq!(ledger.find_room(RoomId(1)).await.unwrap().capacity, 0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_counter_never_goes_negative_under_contention() {
        let ledger = MemoryCapacityLedger::with_rooms([room(1, 10), room(2, 3)]);

        let attempts = (0..64).map(|i| {
            let ledger = ledger.clone();
            let room_id = RoomId(1 + i % 2);
            tokio::spawn(async move { ledger.reserve_slot(room_id).await })
        });
        let results = futures::future::join_all(attempts).await;
        let granted = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();

        assert_eq!(granted, 13);
        for room in ledger.rooms().await {
            assert_eq!(room.capacity, 0);
        }
    }
}
