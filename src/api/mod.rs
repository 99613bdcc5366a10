pub mod api_error;
pub mod http;

pub use api_error::ApiError;
pub use http::HttpDirectoryApi;

use crate::domain::{Category, Claim, ClaimRequest, Itinerary, Listing, ListingId, NewItinerary};
use crate::filters::FilterPredicate;

/// The REST directory API, as consumed by the web app.
///
/// Shared by every server worker, hence `Send + Sync`.
pub trait DirectoryApi: Send + Sync {
    fn list_businesses(&self, filters: &FilterPredicate) -> Result<Vec<Listing>, ApiError>;
    fn get_business(&self, id: ListingId) -> Result<Listing, ApiError>;
    fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    fn list_itineraries(&self) -> Result<Vec<Itinerary>, ApiError>;
    fn create_itinerary(&self, itinerary: &NewItinerary) -> Result<Itinerary, ApiError>;
    fn delete_itinerary(&self, id: i64) -> Result<(), ApiError>;
    fn create_claim(&self, claim: &ClaimRequest) -> Result<Claim, ApiError>;
}
