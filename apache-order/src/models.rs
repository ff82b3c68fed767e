use apache_catalog::SeatId;
use apache_shared::{BookingReference, Masked};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity data collected from the traveler at booking time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    pub passport_number: Masked<String>,
    pub first_name: String,
    pub last_name: String,
}

impl Traveler {
    pub fn new(
        passport_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            passport_number: Masked(passport_number.into()),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A traveler bound to a reserved seat. Lives exactly as long as the reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelerRecord {
    pub reference: BookingReference,
    pub passport_number: Masked<String>,
    pub first_name: String,
    pub last_name: String,
    pub seat_row: u32,
    pub seat_column: char,
    pub booked_at: DateTime<Utc>,
}

impl TravelerRecord {
    pub fn new(reference: BookingReference, seat: SeatId, traveler: Traveler) -> Self {
        Self {
            reference,
            passport_number: traveler.passport_number,
            first_name: traveler.first_name,
            last_name: traveler.last_name,
            seat_row: seat.row,
            seat_column: seat.column,
            booked_at: Utc::now(),
        }
    }

    pub fn seat(&self) -> SeatId {
        SeatId::new(self.seat_row, self.seat_column)
    }
}
