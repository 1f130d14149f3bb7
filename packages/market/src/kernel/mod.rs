// Kernel: infrastructure seams shared by every domain.
//
// Traits describe the remote services; `supabase` implements them over the
// REST client and `test_dependencies` implements them in memory.

pub mod auth_events;
pub mod deps;
pub mod supabase;
pub mod test_dependencies;
pub mod traits;

pub use auth_events::{AuthEvent, AuthEventHub, Subscription};
pub use deps::MarketDeps;
pub use traits::*;
