pub mod category;
pub mod claim;
pub mod itinerary;
pub mod listing;

pub use category::Category;
pub use claim::{Claim, ClaimRequest};
pub use itinerary::{Itinerary, NewItinerary};
pub use listing::{Coordinates, Listing, ListingId};
