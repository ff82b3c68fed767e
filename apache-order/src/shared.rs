use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::Traveler;
use crate::registry::{BookingOutcome, BookingRegistry};

/// Cloneable handle for driving one registry from several threads.
///
/// Booking and cancellation each touch the seat map and the traveler table in
/// several steps; the lock is held across all of them so no caller can observe
/// a reserved seat without its record.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<BookingRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: BookingRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn book_with_traveler(&self, token: &str, traveler: Traveler) -> BookingOutcome {
        self.inner.lock().book_with_traveler(token, traveler)
    }

    pub fn cancel_with_traveler(&self, token: &str) -> BookingOutcome {
        self.inner.lock().cancel_with_traveler(token)
    }

    /// Run a read-only query under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&BookingRegistry) -> T) -> T {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_catalog::{CabinLayout, SeatMap};
    use std::thread;

    #[test]
    fn test_concurrent_bookings_for_one_seat() {
        let shared = SharedRegistry::new(BookingRegistry::new(SeatMap::from_layout(
            &CabinLayout::default(),
        )));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.book_with_traveler("4A", Traveler::new(format!("P{i}"), "Guest", "Traveler"))
                })
            })
            .collect();

        let booked = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|outcome| matches!(outcome, BookingOutcome::Booked(_)))
            .count();

        assert_eq!(booked, 1);
        assert_eq!(shared.read(|registry| registry.booking_count()), 1);
    }
}
