pub mod business;
pub mod claim;
pub mod directory;
pub mod itineraries;

pub use business::business_page;
pub use claim::{claim_page, claim_submitted_page};
pub use directory::directory_page;
pub use itineraries::itineraries_page;
