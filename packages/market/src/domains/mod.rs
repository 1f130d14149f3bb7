pub mod auth;
pub mod listings;
pub mod orders;
pub mod users;
