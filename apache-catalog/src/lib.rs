pub mod layout;
pub mod seat;
pub mod seat_map;

pub use layout::{CabinLayout, LayoutError, StorageZone};
pub use seat::{SeatId, SeatIdError};
pub use seat_map::{Occupancy, SeatMap, SeatOutcome, SeatStatus};
