pub mod predicate;
pub mod store;

pub use predicate::FilterPredicate;
pub use store::{FilterStore, History, SubscriptionId};
