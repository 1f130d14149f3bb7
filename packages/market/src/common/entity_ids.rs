//! Typed ID definitions for the marketplace entities.

pub use super::id::Id;

/// Marker type for user profiles (clients, vendors, admins).
pub struct User;

/// Marker type for product listings.
pub struct Listing;

/// Marker type for orders.
pub struct Order;

pub type UserId = Id<User>;

pub type ListingId = Id<Listing>;

pub type OrderId = Id<Order>;
