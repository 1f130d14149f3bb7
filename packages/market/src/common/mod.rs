// Common types and utilities shared across the application

pub mod app_context;
pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod utils;

pub use app_context::{AppContext, SessionState};
pub use auth::{Actor, AuthError, Capability};
pub use entity_ids::*;
pub use errors::{MarketError, MarketResult, StoreError, ValidationError};
pub use id::Id;
