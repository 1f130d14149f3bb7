pub mod builder;
pub mod capability;
pub mod errors;

pub use builder::{Actor, CapabilityCheck};
pub use capability::Capability;
pub use errors::AuthError;
