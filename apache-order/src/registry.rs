use apache_catalog::{CabinLayout, SeatIdError, SeatMap, SeatOutcome, SeatStatus};
use apache_shared::BookingReference;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::models::{Traveler, TravelerRecord};
use crate::reference::ReferenceGenerator;

/// Result of a registry operation, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked(BookingReference),
    /// `traveler` is the removed record, `None` if the table had no entry.
    Canceled {
        reference: BookingReference,
        traveler: Option<TravelerRecord>,
    },
    InvalidSeat(SeatIdError),
    Unavailable,
    AlreadyFree,
    NotBookable,
}

impl From<SeatOutcome> for BookingOutcome {
    fn from(outcome: SeatOutcome) -> Self {
        match outcome {
            SeatOutcome::Booked(reference) => BookingOutcome::Booked(reference),
            SeatOutcome::Canceled(reference) => BookingOutcome::Canceled {
                reference,
                traveler: None,
            },
            SeatOutcome::InvalidSeat(err) => BookingOutcome::InvalidSeat(err),
            SeatOutcome::Unavailable => BookingOutcome::Unavailable,
            SeatOutcome::AlreadyFree => BookingOutcome::AlreadyFree,
            SeatOutcome::NotBookable => BookingOutcome::NotBookable,
        }
    }
}

/// Owns the seat map and the traveler table, and keeps them in step:
/// every reserved seat has exactly one traveler record under the same
/// reference, and every record points at a seat reserved under it.
pub struct BookingRegistry {
    seat_map: SeatMap,
    travelers: HashMap<BookingReference, TravelerRecord>,
    references: ReferenceGenerator,
}

impl BookingRegistry {
    pub fn new(seat_map: SeatMap) -> Self {
        Self::with_generator(seat_map, ReferenceGenerator::new())
    }

    pub fn with_seed(seat_map: SeatMap, seed: u64) -> Self {
        Self::with_generator(seat_map, ReferenceGenerator::with_seed(seed))
    }

    pub fn from_layout(layout: &CabinLayout) -> Self {
        Self::new(SeatMap::from_layout(layout))
    }

    fn with_generator(seat_map: SeatMap, references: ReferenceGenerator) -> Self {
        Self {
            seat_map,
            travelers: HashMap::new(),
            references,
        }
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    /// Issue a fresh reference. It stays reserved for the rest of the session.
    pub fn generate_reference(&mut self) -> BookingReference {
        self.references.generate()
    }

    pub fn is_available(&self, token: &str) -> bool {
        self.seat_map.is_available(token)
    }

    /// Reserve a seat and record who holds it.
    ///
    /// Anything that is not a free seat, including a malformed token, is
    /// reported as [`BookingOutcome::Unavailable`] without consuming a reference.
    pub fn book_with_traveler(&mut self, token: &str, traveler: Traveler) -> BookingOutcome {
        if !self.seat_map.is_available(token) {
            debug!(seat = token, "Seat not available for booking");
            return BookingOutcome::Unavailable;
        }
        let Ok(seat) = self.seat_map.parse_seat(token) else {
            return BookingOutcome::Unavailable;
        };

        let reference = self.references.generate();
        match self.seat_map.book(token, reference) {
            SeatOutcome::Booked(reference) => {
                let record = TravelerRecord::new(reference.clone(), seat, traveler);
                info!(
                    seat = %seat,
                    reference = %reference,
                    passport = %record.passport_number,
                    "Seat booked"
                );
                if self.travelers.insert(reference.clone(), record).is_some() {
                    warn!(reference = %reference, "Replaced an existing traveler record");
                }
                BookingOutcome::Booked(reference)
            }
            refused => {
                warn!(seat = %seat, outcome = ?refused, "Seat map refused an available seat");
                refused.into()
            }
        }
    }

    /// Release a seat and drop the traveler record that held it.
    pub fn cancel_with_traveler(&mut self, token: &str) -> BookingOutcome {
        let seat = match self.seat_map.parse_seat(token) {
            Ok(seat) => seat,
            Err(err) => return BookingOutcome::InvalidSeat(err),
        };
        let holder = match self.seat_map.status(&seat) {
            Some(SeatStatus::Reserved(reference)) => Some(reference.clone()),
            _ => None,
        };

        match self.seat_map.cancel(token) {
            SeatOutcome::Canceled(reference) => {
                debug_assert_eq!(holder.as_ref(), Some(&reference));
                let traveler = self.travelers.remove(&reference);
                match &traveler {
                    Some(_) => info!(seat = %seat, reference = %reference, "Booking canceled"),
                    None => warn!(
                        seat = %seat,
                        reference = %reference,
                        "Canceled a reservation with no traveler record"
                    ),
                }
                BookingOutcome::Canceled {
                    reference,
                    traveler,
                }
            }
            other => other.into(),
        }
    }

    pub fn recommend_first_free(&self) -> Option<String> {
        self.seat_map
            .recommend_first_free()
            .map(|seat| seat.to_string())
    }

    pub fn render_layout(&self) -> Vec<String> {
        self.seat_map.render_layout()
    }

    pub fn traveler(&self, reference: &BookingReference) -> Option<&TravelerRecord> {
        self.travelers.get(reference)
    }

    /// Record of whoever holds the seat named by `token`, if anyone.
    pub fn traveler_at(&self, token: &str) -> Option<&TravelerRecord> {
        let seat = self.seat_map.parse_seat(token).ok()?;
        match self.seat_map.status(&seat)? {
            SeatStatus::Reserved(reference) => self.travelers.get(reference),
            _ => None,
        }
    }

    /// Live bookings in seat order.
    pub fn bookings(&self) -> Vec<&TravelerRecord> {
        self.seat_map
            .seats()
            .filter_map(|(_, status)| match status {
                SeatStatus::Reserved(reference) => self.travelers.get(reference),
                _ => None,
            })
            .collect()
    }

    pub fn booking_count(&self) -> usize {
        self.travelers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_catalog::SeatId;

    fn registry() -> BookingRegistry {
        BookingRegistry::with_seed(SeatMap::from_layout(&CabinLayout::default()), 1)
    }

    fn ada() -> Traveler {
        Traveler::new("X123", "Ada", "Lovelace")
    }

    /// Every reserved cell has one record under its reference and vice versa.
    fn assert_consistent(registry: &BookingRegistry) {
        let reserved: Vec<(SeatId, BookingReference)> = registry
            .seat_map()
            .seats()
            .filter_map(|(seat, status)| match status {
                SeatStatus::Reserved(reference) => Some((seat, reference.clone())),
                _ => None,
            })
            .collect();

        assert_eq!(reserved.len(), registry.booking_count());
        for (seat, reference) in reserved {
            let record = registry.traveler(&reference).expect("record for reserved seat");
            assert_eq!(record.seat(), seat);
        }
    }

    #[test]
    fn test_book_and_cancel_with_traveler() {
        let mut registry = registry();

        let reference = match registry.book_with_traveler("12B", ada()) {
            BookingOutcome::Booked(reference) => reference,
            other => panic!("expected booking, got {other:?}"),
        };

        let record = registry.traveler(&reference).unwrap();
        assert_eq!(record.seat_row, 12);
        assert_eq!(record.seat_column, 'B');
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
        assert_eq!(record.passport_number.expose(), "X123");
        assert_eq!(
            registry.seat_map().status(&SeatId::new(12, 'B')),
            Some(&SeatStatus::Reserved(reference.clone()))
        );
        assert_consistent(&registry);

        match registry.cancel_with_traveler("12b") {
            BookingOutcome::Canceled { reference: canceled, traveler } => {
                assert_eq!(canceled, reference);
                assert_eq!(traveler.unwrap().last_name, "Lovelace");
            }
            other => panic!("expected cancellation, got {other:?}"),
        }

        assert_eq!(registry.booking_count(), 0);
        assert_eq!(
            registry.seat_map().status(&SeatId::new(12, 'B')),
            Some(&SeatStatus::Free)
        );
        assert_consistent(&registry);
    }

    #[test]
    fn test_double_booking_is_unavailable() {
        let mut registry = registry();

        assert!(matches!(
            registry.book_with_traveler("5C", ada()),
            BookingOutcome::Booked(_)
        ));
        let issued = registry.references.issued_count();

        assert_eq!(
            registry.book_with_traveler("5C", Traveler::new("Y456", "Alan", "Turing")),
            BookingOutcome::Unavailable
        );
        assert_eq!(registry.booking_count(), 1);
        assert_eq!(registry.traveler_at("5C").unwrap().first_name, "Ada");
        // No reference drawn for a refused booking.
        assert_eq!(registry.references.issued_count(), issued);
    }

    #[test]
    fn test_unbookable_tokens_are_unavailable() {
        let mut registry = registry();

        for token in ["B12", "81A", "12G", "77D", ""] {
            assert_eq!(
                registry.book_with_traveler(token, ada()),
                BookingOutcome::Unavailable,
                "{token}"
            );
        }
        assert_eq!(registry.booking_count(), 0);
        assert_eq!(registry.references.issued_count(), 0);
    }

    #[test]
    fn test_cancel_outcomes_pass_through() {
        let mut registry = registry();

        assert_eq!(registry.cancel_with_traveler("3A"), BookingOutcome::AlreadyFree);
        assert_eq!(registry.cancel_with_traveler("80F"), BookingOutcome::NotBookable);
        assert!(matches!(
            registry.cancel_with_traveler("A3"),
            BookingOutcome::InvalidSeat(SeatIdError::Malformed(_))
        ));
        assert!(matches!(
            registry.cancel_with_traveler("3Z"),
            BookingOutcome::InvalidSeat(SeatIdError::UnknownColumn { .. })
        ));
        assert_eq!(registry.booking_count(), 0);
    }

    #[test]
    fn test_storage_survives_booking_attempts() {
        let mut registry = registry();

        for _ in 0..3 {
            registry.book_with_traveler("79E", ada());
            registry.cancel_with_traveler("79E");
        }
        assert_eq!(
            registry.seat_map().status(&SeatId::new(79, 'E')),
            Some(&SeatStatus::Storage)
        );
    }

    #[test]
    fn test_references_are_not_recycled() {
        let mut registry = registry();

        let first = match registry.book_with_traveler("1A", ada()) {
            BookingOutcome::Booked(reference) => reference,
            other => panic!("expected booking, got {other:?}"),
        };
        registry.cancel_with_traveler("1A");

        let second = match registry.book_with_traveler("1A", ada()) {
            BookingOutcome::Booked(reference) => reference,
            other => panic!("expected booking, got {other:?}"),
        };
        assert_ne!(first, second);
        assert!(registry.references.is_issued(&first));
    }

    #[test]
    fn test_bookings_are_listed_in_seat_order() {
        let mut registry = registry();
        for token in ["20A", "3F", "3B", "1C"] {
            registry.book_with_traveler(token, ada());
        }

        let seats: Vec<String> = registry
            .bookings()
            .iter()
            .map(|record| record.seat().to_string())
            .collect();
        assert_eq!(seats, vec!["1C", "3B", "3F", "20A"]);
        assert_consistent(&registry);
    }

    #[test]
    fn test_recommendation_follows_bookings() {
        let mut registry = registry();
        assert_eq!(registry.recommend_first_free().as_deref(), Some("1A"));

        registry.book_with_traveler("1A", ada());
        assert_eq!(registry.recommend_first_free().as_deref(), Some("1B"));
        assert!(registry.is_available("1B"));
    }

    #[test]
    fn test_traveler_at() {
        let mut registry = registry();
        registry.book_with_traveler("9D", ada());

        assert_eq!(registry.traveler_at("9d").unwrap().last_name, "Lovelace");
        assert!(registry.traveler_at("9E").is_none());
        assert!(registry.traveler_at("nonsense").is_none());
    }

    #[test]
    fn test_generate_reference_marks_in_use() {
        let mut registry = registry();
        let references: std::collections::HashSet<_> =
            (0..50).map(|_| registry.generate_reference()).collect();

        assert_eq!(references.len(), 50);
        assert!(references.iter().all(|r| registry.references.is_issued(r)));
    }
}
