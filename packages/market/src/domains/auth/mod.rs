//! Auth domain - email/password accounts and their marketplace profiles
//!
//! Responsibilities:
//! - Sign-up with profile creation (degrading to a temporary profile)
//! - Sign-in / sign-out
//! - Resolving an identity to a profile, with fallbacks
//! - Following session changes into the `AppContext`

pub mod actions;
pub mod models;
pub mod session_watch;

pub use actions::{install_profile, resolve_profile, sign_in, sign_out, sign_up};
pub use models::{AuthIdentity, ProfileMetadata, SignUpOutcome, SignUpProfile};
pub use session_watch::{watch_session, SessionWatch};
