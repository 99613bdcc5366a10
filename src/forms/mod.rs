pub mod claim;
pub mod fields;
pub mod itinerary;

pub use claim::ClaimForm;
pub use fields::{FieldErrors, FormData};
pub use itinerary::ItineraryForm;
