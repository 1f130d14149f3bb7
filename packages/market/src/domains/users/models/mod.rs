pub mod user;

pub use user::{NewUser, Role, User, DEFAULT_LOCATION, DEFAULT_NAME};
