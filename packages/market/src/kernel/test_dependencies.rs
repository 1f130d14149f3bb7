// TestDependencies - in-memory mock implementations for testing
//
// Provides mock stores and an auth provider that can be injected into
// MarketDeps. Every call is recorded; failures are injected per operation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::auth_events::{AuthEvent, AuthEventHub};
use super::{BaseAuthProvider, BaseListingStore, BaseUserStore, MarketDeps};
use crate::common::{ListingId, MarketError, StoreError, UserId};
use crate::domains::auth::models::{AuthIdentity, ProfileMetadata};
use crate::domains::listings::data::{ListingPatch, ListingQuery, NewListing};
use crate::domains::listings::models::{Listing, ListingStatus};
use crate::domains::users::models::{NewUser, User};

type Failures = Arc<Mutex<HashMap<&'static str, StoreError>>>;

fn injected(failures: &Failures, op: &'static str) -> Result<(), StoreError> {
    match failures.lock().unwrap().get(op) {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}

// =============================================================================
// Mock Listing Store
// =============================================================================

/// A recorded call on [`MockListingStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListingCall {
    Fetch(ListingQuery),
    Find(ListingId),
    Insert(NewListing),
    Update(ListingId, ListingPatch),
    SetStatus(ListingId, ListingStatus),
    Delete(ListingId),
    IncrementViews(ListingId),
}

#[derive(Clone, Default)]
pub struct MockListingStore {
    rows: Arc<Mutex<Vec<Listing>>>,
    calls: Arc<Mutex<Vec<ListingCall>>>,
    failures: Failures,
}

impl MockListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(self, listings: Vec<Listing>) -> Self {
        self.rows.lock().unwrap().extend(listings);
        self
    }

    /// Make every later call to `op` ("fetch", "find", "insert", "update",
    /// "set_status", "delete", "increment_views") fail with `err`.
    pub fn fail_on(self, op: &'static str, err: StoreError) -> Self {
        self.failures.lock().unwrap().insert(op, err);
        self
    }

    pub fn calls(&self) -> Vec<ListingCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of calls that write to the store.
    pub fn write_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !matches!(c, ListingCall::Fetch(_) | ListingCall::Find(_)))
            .count()
    }

    pub fn rows(&self) -> Vec<Listing> {
        self.rows.lock().unwrap().clone()
    }

    fn record(&self, call: ListingCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn modify(
        &self,
        id: ListingId,
        change: impl FnOnce(&mut Listing),
    ) -> Result<Listing, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound)?;
        change(row);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

#[async_trait]
impl BaseListingStore for MockListingStore {
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        self.record(ListingCall::Fetch(query.clone()));
        injected(&self.failures, "fetch")?;

        let mut found: Vec<Listing> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| query.matches(l))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        self.record(ListingCall::Find(id));
        injected(&self.failures, "find")?;
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn insert(&self, row: &NewListing) -> Result<Listing, StoreError> {
        self.record(ListingCall::Insert(row.clone()));
        injected(&self.failures, "insert")?;

        let now = Utc::now();
        let listing = Listing {
            id: ListingId::new(),
            title: row.title.clone(),
            description: row.description.clone(),
            price: row.price,
            images: row.images.clone(),
            category: row.category,
            condition: row.condition,
            status: row.status,
            vendor_id: row.vendor_id,
            vendor: None,
            location: row.location.clone(),
            views: 0,
            featured: false,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(listing.clone());
        Ok(listing)
    }

    async fn update(&self, id: ListingId, patch: &ListingPatch) -> Result<Listing, StoreError> {
        self.record(ListingCall::Update(id, patch.clone()));
        injected(&self.failures, "update")?;
        self.modify(id, |l| patch.apply_to(l))
    }

    async fn set_status(
        &self,
        id: ListingId,
        status: ListingStatus,
    ) -> Result<Listing, StoreError> {
        self.record(ListingCall::SetStatus(id, status));
        injected(&self.failures, "set_status")?;
        self.modify(id, |l| l.status = status)
    }

    async fn delete(&self, id: ListingId) -> Result<(), StoreError> {
        self.record(ListingCall::Delete(id));
        injected(&self.failures, "delete")?;
        self.rows.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }

    async fn increment_views(&self, id: ListingId) -> Result<(), StoreError> {
        self.record(ListingCall::IncrementViews(id));
        injected(&self.failures, "increment_views")?;
        self.modify(id, |l| l.views += 1).map(|_| ())
    }
}

// =============================================================================
// Mock User Store
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UserCall {
    Find(UserId),
    Insert(NewUser),
    List,
    SetVerified(UserId, bool),
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    rows: Arc<Mutex<Vec<User>>>,
    calls: Arc<Mutex<Vec<UserCall>>>,
    failures: Failures,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.rows.lock().unwrap().extend(users);
        self
    }

    /// Make every later call to `op` ("find", "insert", "list",
    /// "set_verified") fail with `err`.
    pub fn fail_on(self, op: &'static str, err: StoreError) -> Self {
        self.failures.lock().unwrap().insert(op, err);
        self
    }

    /// Simulate a backend where the `users` table was never created.
    pub fn without_table(self) -> Self {
        let missing = StoreError::TableMissing {
            table: "users".to_string(),
        };
        for op in ["find", "insert", "list", "set_verified"] {
            self.failures.lock().unwrap().insert(op, missing.clone());
        }
        self
    }

    pub fn calls(&self) -> Vec<UserCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inserted(&self) -> Vec<NewUser> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                UserCall::Insert(row) => Some(row.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn rows(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }

    fn record(&self, call: UserCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BaseUserStore for MockUserStore {
    async fn find(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.record(UserCall::Find(id));
        injected(&self.failures, "find")?;
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, row: &NewUser) -> Result<User, StoreError> {
        self.record(UserCall::Insert(row.clone()));
        injected(&self.failures, "insert")?;

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.id == row.id) {
            return Err(StoreError::Conflict);
        }
        let user = row.clone().into_unpersisted();
        rows.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.record(UserCall::List);
        injected(&self.failures, "list")?;

        let mut users = self.rows.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn set_verified(&self, id: UserId, verified: bool) -> Result<User, StoreError> {
        self.record(UserCall::SetVerified(id, verified));
        injected(&self.failures, "set_verified")?;

        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        user.verified = verified;
        Ok(user.clone())
    }
}

// =============================================================================
// Mock Auth Provider
// =============================================================================

#[derive(Clone, Default)]
pub struct MockAuthProvider {
    accounts: Arc<Mutex<HashMap<String, (String, AuthIdentity)>>>,
    current: Arc<Mutex<Option<AuthIdentity>>>,
    current_failure: Arc<Mutex<Option<String>>>,
    events: AuthEventHub,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing account.
    pub fn with_account(self, email: &str, password: &str, identity: AuthIdentity) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), identity));
        self
    }

    /// Start with a restored session.
    pub fn with_session(self, identity: AuthIdentity) -> Self {
        *self.current.lock().unwrap() = Some(identity);
        self
    }

    /// Make `current_identity` fail, as when the provider is unreachable.
    pub fn failing_session_lookup(self, message: &str) -> Self {
        *self.current_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn current(&self) -> Option<AuthIdentity> {
        self.current.lock().unwrap().clone()
    }

    /// Simulate the provider rotating the session token.
    pub fn refresh_token(&self) {
        if let Some(identity) = self.current() {
            self.events.publish(AuthEvent::TokenRefreshed(identity));
        }
    }
}

#[async_trait]
impl BaseAuthProvider for MockAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &ProfileMetadata,
    ) -> Result<AuthIdentity, MarketError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(MarketError::Identity("User already registered".to_string()));
        }
        let identity = AuthIdentity {
            id: UserId::new(),
            email: Some(email.to_string()),
            metadata: metadata.clone(),
        };
        accounts.insert(
            email.to_string(),
            (password.to_string(), identity.clone()),
        );
        *self.current.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity, MarketError> {
        let identity = match self.accounts.lock().unwrap().get(email) {
            Some((expected, identity)) if expected == password => identity.clone(),
            _ => {
                return Err(MarketError::Identity(
                    "Invalid login credentials".to_string(),
                ))
            }
        };
        *self.current.lock().unwrap() = Some(identity.clone());
        self.events.publish(AuthEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), MarketError> {
        *self.current.lock().unwrap() = None;
        self.events.publish(AuthEvent::SignedOut);
        Ok(())
    }

    async fn current_identity(&self) -> Result<Option<AuthIdentity>, MarketError> {
        if let Some(message) = self.current_failure.lock().unwrap().clone() {
            return Err(MarketError::Store(StoreError::remote(message)));
        }
        Ok(self.current())
    }

    fn events(&self) -> &AuthEventHub {
        &self.events
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// Handles to the mocks behind a [`MarketDeps`], for assertions.
#[derive(Clone, Default)]
pub struct TestDependencies {
    pub listings: MockListingStore,
    pub users: MockUserStore,
    pub auth: MockAuthProvider,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(mut self, listings: MockListingStore) -> Self {
        self.listings = listings;
        self
    }

    pub fn with_users(mut self, users: MockUserStore) -> Self {
        self.users = users;
        self
    }

    pub fn with_auth(mut self, auth: MockAuthProvider) -> Self {
        self.auth = auth;
        self
    }

    pub fn deps(&self) -> MarketDeps {
        MarketDeps::new(
            Arc::new(self.listings.clone()),
            Arc::new(self.users.clone()),
            Arc::new(self.auth.clone()),
        )
    }
}
