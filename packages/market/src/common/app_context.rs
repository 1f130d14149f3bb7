//! Application context shared by every view.
//!
//! Holds the one piece of lifecycle-scoped state: the signed-in user and
//! whether it is still being resolved. Built once at start-up and handed to
//! views by reference (clones share the same state).

use std::sync::Arc;

use tokio::sync::{watch, Mutex, MutexGuard};

use super::auth::AuthError;
use crate::domains::users::models::{Role, User};

/// Snapshot of the session as seen by views.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    state: Arc<watch::Sender<SessionState>>,
    resolving: Arc<Mutex<()>>,
}

impl AppContext {
    /// Fresh context: nobody signed in, still loading.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self {
            state: Arc::new(tx),
            resolving: Arc::new(Mutex::new(())),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    /// Returns false for signed-out visitors.
    pub fn is_admin(&self) -> bool {
        self.state
            .borrow()
            .user
            .as_ref()
            .map(|u| u.role == Role::Admin)
            .unwrap_or(false)
    }

    /// The signed-in user, or `AuthenticationRequired`.
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.state
            .borrow()
            .user
            .clone()
            .ok_or(AuthError::AuthenticationRequired)
    }

    /// Install a resolved user and end loading.
    pub fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|state| {
            state.user = user;
            state.loading = false;
        });
    }

    /// Sign-out: forget the user.
    pub fn clear(&self) {
        self.set_user(None);
    }

    pub fn finish_loading(&self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
    }

    /// Held while a profile is resolved into this context; at most one
    /// resolution runs per context at a time.
    pub async fn lock_resolution(&self) -> MutexGuard<'_, ()> {
        self.resolving.lock().await
    }

    /// Change notifications for views that re-render on session changes.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
