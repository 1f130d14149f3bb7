// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Rules such as "new listings start pending" live in the domain actions that use them.
//
// Naming convention: Base* for trait names (e.g., BaseListingStore)

use async_trait::async_trait;

use super::auth_events::AuthEventHub;
use crate::common::{ListingId, MarketError, StoreError, UserId};
use crate::domains::auth::models::{AuthIdentity, ProfileMetadata};
use crate::domains::listings::data::{ListingPatch, ListingQuery, NewListing};
use crate::domains::listings::models::{Listing, ListingStatus};
use crate::domains::users::models::{NewUser, User};

// =============================================================================
// Listing Store Trait (remote `products` table)
// =============================================================================

#[async_trait]
pub trait BaseListingStore: Send + Sync {
    /// Listings matching `query`, newest first, vendor profile embedded.
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError>;

    async fn find(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;

    async fn insert(&self, row: &NewListing) -> Result<Listing, StoreError>;

    async fn update(&self, id: ListingId, patch: &ListingPatch) -> Result<Listing, StoreError>;

    async fn set_status(&self, id: ListingId, status: ListingStatus)
        -> Result<Listing, StoreError>;

    async fn delete(&self, id: ListingId) -> Result<(), StoreError>;

    /// Atomic server-side `views + 1`.
    async fn increment_views(&self, id: ListingId) -> Result<(), StoreError>;
}

// =============================================================================
// User Store Trait (remote `users` table)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn insert(&self, row: &NewUser) -> Result<User, StoreError>;

    /// All profiles, newest first.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn set_verified(&self, id: UserId, verified: bool) -> Result<User, StoreError>;
}

// =============================================================================
// Auth Provider Trait (remote email/password identity service)
// =============================================================================

#[async_trait]
pub trait BaseAuthProvider: Send + Sync {
    /// Register an identity. Does not publish an auth event: the caller still
    /// has to create the profile row before the session is usable.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &ProfileMetadata,
    ) -> Result<AuthIdentity, MarketError>;

    /// Publishes [`super::AuthEvent::SignedIn`] on success.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity, MarketError>;

    /// Publishes [`super::AuthEvent::SignedOut`] on success.
    async fn sign_out(&self) -> Result<(), MarketError>;

    /// Identity behind the current session, if any.
    async fn current_identity(&self) -> Result<Option<AuthIdentity>, MarketError>;

    /// Session-change notifications.
    fn events(&self) -> &AuthEventHub;
}
