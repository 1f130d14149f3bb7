//! Orders are part of the backend schema but no flow creates or advances them.

pub mod models;

pub use models::{Order, OrderStatus};
