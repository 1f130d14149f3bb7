//! Users domain - marketplace profiles (clients, vendors, admins)

pub mod actions;
pub mod filter;
pub mod models;

pub use actions::{list_users, set_verified};
pub use filter::{count_by_role, RoleFilter, UserFilter};
pub use models::{NewUser, Role, User};
