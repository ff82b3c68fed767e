pub mod models;
pub mod reference;
pub mod registry;
pub mod shared;

pub use models::{Traveler, TravelerRecord};
pub use reference::ReferenceGenerator;
pub use registry::{BookingOutcome, BookingRegistry};
pub use shared::SharedRegistry;
