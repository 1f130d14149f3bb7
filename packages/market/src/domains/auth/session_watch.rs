//! Keeps an [`AppContext`] in step with the identity provider's session.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::actions::{install_profile, refresh_profile};
use crate::common::AppContext;
use crate::kernel::{AuthEvent, MarketDeps};

/// Live subscription to session changes. Dropping it (or calling
/// [`SessionWatch::unsubscribe`]) stops further context updates.
pub struct SessionWatch {
    task: Option<JoinHandle<()>>,
}

impl SessionWatch {
    /// Resolve the current session into `ctx`, then follow auth events.
    ///
    /// Returns once the initial session is settled, so `ctx` is no longer
    /// loading.
    pub async fn start(deps: MarketDeps, ctx: AppContext) -> Self {
        // Subscribe first so nothing published during bootstrap is lost.
        let mut events = deps.auth.events().subscribe();

        bootstrap(&deps, &ctx).await;

        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                match event {
                    AuthEvent::SignedIn(identity) => {
                        debug!(user_id = %identity.id, "Signed in");
                        install_profile(&deps, &ctx, &identity).await;
                    }
                    AuthEvent::TokenRefreshed(identity) => {
                        debug!(user_id = %identity.id, "Session refreshed");
                        refresh_profile(&deps, &ctx, &identity).await;
                    }
                    AuthEvent::SignedOut => ctx.clear(),
                }
            }
        });

        Self { task: Some(task) }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SessionWatch {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn bootstrap(deps: &MarketDeps, ctx: &AppContext) {
    match deps.auth.current_identity().await {
        Ok(Some(identity)) => {
            install_profile(deps, ctx, &identity).await;
        }
        Ok(None) => ctx.finish_loading(),
        Err(e) => {
            warn!(error = %e, "Could not restore session");
            ctx.finish_loading();
        }
    }
}

/// Start following session changes into `ctx`. See [`SessionWatch::start`].
pub async fn watch_session(deps: MarketDeps, ctx: AppContext) -> SessionWatch {
    SessionWatch::start(deps, ctx).await
}
