pub mod listing;

pub use listing::{Category, Condition, Listing, ListingStatus, LISTING_SELECT};
