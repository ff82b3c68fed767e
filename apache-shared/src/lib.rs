pub mod models;
pub mod pii;

pub use models::reference::BookingReference;
pub use pii::Masked;
