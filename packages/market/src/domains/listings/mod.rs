//! Listings domain - vendor products and services under admin moderation
//!
//! Responsibilities:
//! - Repository access (fetch, create, update, delete, view counting)
//! - Browse and admin-queue filtering of fetched collections
//! - Moderation transitions

pub mod actions;
pub mod data;
pub mod filter;
pub mod models;
pub mod moderation;

pub use actions::{
    create_listing, delete_listing, fetch_listings, fetch_vendor_listings, find_listing,
    increment_views, update_listing,
};
pub use data::{ListingPatch, ListingQuery, NewListingInput};
pub use filter::{
    filter_listings, pending_count, BrowseSections, ListingFilter, ModerationQueueFilter,
    StatusFilter,
};
pub use models::{Category, Condition, Listing, ListingStatus};
pub use moderation::{
    moderate_listing, patch_local, ModerationDecision, ModerationError, Transition,
};
