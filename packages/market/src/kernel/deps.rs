//! Marketplace dependencies (using traits for testability)
//!
//! Central container handed to every domain action. Production wires the
//! Supabase adapters; tests wire the in-memory mocks.

use std::sync::Arc;

use supabase_client::SupabaseClient;

use super::supabase::{SupabaseAuth, SupabaseStore};
use super::{BaseAuthProvider, BaseListingStore, BaseUserStore};

#[derive(Clone)]
pub struct MarketDeps {
    pub listings: Arc<dyn BaseListingStore>,
    pub users: Arc<dyn BaseUserStore>,
    pub auth: Arc<dyn BaseAuthProvider>,
}

impl MarketDeps {
    pub fn new(
        listings: Arc<dyn BaseListingStore>,
        users: Arc<dyn BaseUserStore>,
        auth: Arc<dyn BaseAuthProvider>,
    ) -> Self {
        Self {
            listings,
            users,
            auth,
        }
    }

    /// All services backed by one Supabase project. The client is shared, so
    /// table requests run as whoever signed in through `auth`.
    pub fn supabase(client: SupabaseClient) -> Self {
        let store = Arc::new(SupabaseStore::new(client.clone()));
        Self {
            listings: store.clone(),
            users: store,
            auth: Arc::new(SupabaseAuth::new(client)),
        }
    }
}
