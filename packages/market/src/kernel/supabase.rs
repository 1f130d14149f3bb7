//! Supabase-backed implementations of the kernel traits.
//!
//! This is the only place a [`SupabaseError`] is seen: every failure is
//! classified into a [`StoreError`] (or [`MarketError::Identity`]) here.

use async_trait::async_trait;
use serde_json::json;
use supabase_client::{AuthUser, SupabaseClient, SupabaseError};

use super::auth_events::{AuthEvent, AuthEventHub};
use super::traits::{BaseAuthProvider, BaseListingStore, BaseUserStore};
use crate::common::{ListingId, MarketError, StoreError, UserId};
use crate::domains::auth::models::{AuthIdentity, ProfileMetadata};
use crate::domains::listings::data::{ListingPatch, ListingQuery, NewListing, StatusPatch};
use crate::domains::listings::models::{Listing, ListingStatus, LISTING_SELECT};
use crate::domains::users::models::{NewUser, User};

pub const LISTINGS_TABLE: &str = "products";
pub const USERS_TABLE: &str = "users";
pub const INCREMENT_VIEWS_RPC: &str = "increment_product_views";

/// Map a client failure on `table` to the store's error kinds.
pub fn classify(table: &str, err: SupabaseError) -> StoreError {
    if err.is_relation_missing() {
        return StoreError::TableMissing {
            table: table.to_string(),
        };
    }
    if err.is_unique_violation() {
        return StoreError::Conflict;
    }
    match (&err, err.status()) {
        (SupabaseError::NoRows, _) => StoreError::NotFound,
        (_, Some(401 | 403)) => StoreError::Unauthorized,
        _ => StoreError::remote(err.to_string()),
    }
}

fn identity_error(err: SupabaseError) -> MarketError {
    match err {
        SupabaseError::Api { message, .. } => MarketError::Identity(message),
        other => MarketError::Store(StoreError::remote(other.to_string())),
    }
}

impl From<&AuthUser> for AuthIdentity {
    fn from(user: &AuthUser) -> Self {
        let metadata: ProfileMetadata =
            serde_json::from_value(user.user_metadata.clone()).unwrap_or_default();
        AuthIdentity {
            id: UserId::from_uuid(user.id),
            email: user.email.clone(),
            metadata,
        }
    }
}

// =============================================================================
// Tables
// =============================================================================

#[derive(Clone)]
pub struct SupabaseStore {
    client: SupabaseClient,
}

impl SupabaseStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseListingStore for SupabaseStore {
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        let mut request = self.client.table(LISTINGS_TABLE).select(LISTING_SELECT);
        if let Some(category) = query.category {
            request = request.eq("category", category);
        }
        if let Some(condition) = query.condition {
            request = request.eq("condition", condition);
        }
        if let Some(min) = query.min_price {
            request = request.gte("price", min);
        }
        if let Some(max) = query.max_price {
            request = request.lte("price", max);
        }
        if let Some(location) = query.location_filter() {
            request = request.eq("location", location);
        }
        if let Some(status) = query.status {
            request = request.eq("status", status);
        }
        if let Some(vendor_id) = query.vendor_id {
            request = request.eq("vendor_id", vendor_id);
        }

        request
            .order("created_at", false)
            .fetch()
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }

    async fn find(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        self.client
            .table(LISTINGS_TABLE)
            .select(LISTING_SELECT)
            .eq("id", id)
            .maybe_single()
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }

    async fn insert(&self, row: &NewListing) -> Result<Listing, StoreError> {
        self.client
            .table(LISTINGS_TABLE)
            .select(LISTING_SELECT)
            .insert(row)
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }

    async fn update(&self, id: ListingId, patch: &ListingPatch) -> Result<Listing, StoreError> {
        self.client
            .table(LISTINGS_TABLE)
            .select(LISTING_SELECT)
            .eq("id", id)
            .update(patch)
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }

    async fn set_status(
        &self,
        id: ListingId,
        status: ListingStatus,
    ) -> Result<Listing, StoreError> {
        self.client
            .table(LISTINGS_TABLE)
            .select(LISTING_SELECT)
            .eq("id", id)
            .update(&StatusPatch { status })
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }

    async fn delete(&self, id: ListingId) -> Result<(), StoreError> {
        self.client
            .table(LISTINGS_TABLE)
            .eq("id", id)
            .delete()
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }

    async fn increment_views(&self, id: ListingId) -> Result<(), StoreError> {
        self.client
            .rpc(INCREMENT_VIEWS_RPC, &json!({ "product_id": id }))
            .await
            .map_err(|e| classify(LISTINGS_TABLE, e))
    }
}

#[async_trait]
impl BaseUserStore for SupabaseStore {
    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.client
            .table(USERS_TABLE)
            .select("*")
            .eq("id", id)
            .maybe_single()
            .await
            .map_err(|e| classify(USERS_TABLE, e))
    }

    async fn insert(&self, row: &NewUser) -> Result<User, StoreError> {
        self.client
            .table(USERS_TABLE)
            .select("*")
            .insert(row)
            .await
            .map_err(|e| classify(USERS_TABLE, e))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.client
            .table(USERS_TABLE)
            .select("*")
            .order("created_at", false)
            .fetch()
            .await
            .map_err(|e| classify(USERS_TABLE, e))
    }

    async fn set_verified(&self, id: UserId, verified: bool) -> Result<User, StoreError> {
        self.client
            .table(USERS_TABLE)
            .select("*")
            .eq("id", id)
            .update(&json!({ "verified": verified }))
            .await
            .map_err(|e| classify(USERS_TABLE, e))
    }
}

// =============================================================================
// Auth
// =============================================================================

pub struct SupabaseAuth {
    client: SupabaseClient,
    events: AuthEventHub,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client,
            events: AuthEventHub::new(),
        }
    }
}

#[async_trait]
impl BaseAuthProvider for SupabaseAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &ProfileMetadata,
    ) -> Result<AuthIdentity, MarketError> {
        let data = serde_json::to_value(metadata)
            .map_err(|e| MarketError::Store(StoreError::remote(e.to_string())))?;
        let resp = self
            .client
            .auth()
            .sign_up(email, password, &data)
            .await
            .map_err(identity_error)?;
        Ok(AuthIdentity::from(resp.user()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity, MarketError> {
        let session = self
            .client
            .auth()
            .sign_in_with_password(email, password)
            .await
            .map_err(identity_error)?;
        let identity = AuthIdentity::from(&session.user);
        self.events.publish(AuthEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), MarketError> {
        self.client.auth().sign_out().await.map_err(identity_error)?;
        self.events.publish(AuthEvent::SignedOut);
        Ok(())
    }

    async fn current_identity(&self) -> Result<Option<AuthIdentity>, MarketError> {
        if self.client.access_token().is_none() {
            return Ok(None);
        }
        match self.client.auth().get_user().await {
            Ok(user) => Ok(Some(AuthIdentity::from(&user))),
            // Expired or revoked token: there is no session.
            Err(e) if e.status() == Some(401) => {
                self.client.set_access_token(None);
                Ok(None)
            }
            Err(e) => Err(identity_error(e)),
        }
    }

    fn events(&self) -> &AuthEventHub {
        &self.events
    }
}
