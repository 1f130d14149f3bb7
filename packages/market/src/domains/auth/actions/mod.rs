//! Auth domain actions - business logic functions
//!
//! Each action talks to the identity provider and the profile store through
//! `MarketDeps` and records the outcome in the `AppContext`.

mod resolve_profile;
mod sign_in;
mod sign_up;

pub use resolve_profile::{fallback_profile, install_profile, refresh_profile, resolve_profile};
pub use sign_in::{sign_in, sign_out};
pub use sign_up::sign_up;
