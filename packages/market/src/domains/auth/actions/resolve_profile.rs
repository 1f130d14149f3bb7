//! Map an authenticated identity to its marketplace profile.

use tracing::{debug, error, info, warn};

use crate::common::AppContext;
use crate::domains::auth::models::AuthIdentity;
use crate::domains::users::models::{NewUser, Role, User, DEFAULT_LOCATION, DEFAULT_NAME};
use crate::kernel::MarketDeps;

/// Unpersisted client profile built from the identity alone.
///
/// Name comes from sign-up metadata, then the email's local part, then
/// [`DEFAULT_NAME`].
pub fn fallback_profile(identity: &AuthIdentity) -> User {
    let name = identity
        .metadata
        .name
        .as_deref()
        .or_else(|| identity.email_local_part())
        .unwrap_or(DEFAULT_NAME);
    let mut user = User::synthesized(
        identity.id,
        name,
        identity.email.as_deref().unwrap_or_default(),
        Role::Client,
    );
    user.phone = identity.metadata.phone.clone().unwrap_or_default();
    user
}

/// Row created for an identity that has no profile yet.
fn default_profile(identity: &AuthIdentity) -> NewUser {
    let meta = &identity.metadata;
    // Metadata is user-supplied; it never grants admin.
    let role = match meta.role {
        Some(Role::Vendor) => Role::Vendor,
        _ => Role::Client,
    };
    NewUser {
        id: identity.id,
        name: meta.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string()),
        email: identity.email.clone().unwrap_or_default(),
        phone: meta.phone.clone().unwrap_or_default(),
        role,
        location: meta
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        verified: false,
    }
}

/// Load the profile for `identity`, creating it when missing.
///
/// - existing row: returned as is
/// - no row: a default profile is inserted from the sign-up metadata; if
///   another caller created it first, that row is read back
/// - `users` table missing: an unpersisted [`fallback_profile`]
/// - any other failure: `None`, the session carries no user
pub async fn resolve_profile(deps: &MarketDeps, identity: &AuthIdentity) -> Option<User> {
    match deps.users.find(identity.id).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            info!(user_id = %identity.id, "No profile yet, creating default profile");
            match deps.users.insert(&default_profile(identity)).await {
                Ok(user) => Some(user),
                Err(e) if e.is_conflict() => {
                    debug!(user_id = %identity.id, "Profile created concurrently, reading it back");
                    match deps.users.find(identity.id).await {
                        Ok(user) => user,
                        Err(e) => {
                            error!(user_id = %identity.id, error = %e, "Failed to load profile");
                            None
                        }
                    }
                }
                Err(e) if e.is_table_missing() => {
                    warn!(user_id = %identity.id, "Users table missing, using temporary profile");
                    Some(fallback_profile(identity))
                }
                Err(e) => {
                    error!(user_id = %identity.id, error = %e, "Failed to create default profile");
                    None
                }
            }
        }
        Err(e) if e.is_table_missing() => {
            warn!(user_id = %identity.id, "Users table missing, using temporary profile");
            Some(fallback_profile(identity))
        }
        Err(e) => {
            error!(user_id = %identity.id, error = %e, "Failed to load profile");
            None
        }
    }
}

/// Resolve `identity` into `ctx` unless `ctx` already holds its profile.
///
/// Sign-in and the session watcher both land here for the same sign-in
/// event; the context's resolution lock makes the second caller reuse the
/// first one's result.
pub async fn install_profile(
    deps: &MarketDeps,
    ctx: &AppContext,
    identity: &AuthIdentity,
) -> Option<User> {
    let _guard = ctx.lock_resolution().await;
    if let Some(user) = ctx.current_user().filter(|u| u.id == identity.id) {
        ctx.finish_loading();
        return Some(user);
    }
    let user = resolve_profile(deps, identity).await;
    ctx.set_user(user.clone());
    user
}

/// Re-read the profile for `identity` into `ctx`, even if already present.
pub async fn refresh_profile(
    deps: &MarketDeps,
    ctx: &AppContext,
    identity: &AuthIdentity,
) -> Option<User> {
    let _guard = ctx.lock_resolution().await;
    let user = resolve_profile(deps, identity).await;
    ctx.set_user(user.clone());
    user
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;
    use crate::domains::auth::models::ProfileMetadata;

    fn identity(metadata: ProfileMetadata) -> AuthIdentity {
        AuthIdentity {
            id: UserId::new(),
            email: Some("kadiatou@example.com".to_string()),
            metadata,
        }
    }

    #[test]
    fn fallback_prefers_metadata_name() {
        let user = fallback_profile(&identity(ProfileMetadata {
            name: Some("Kadiatou Bah".to_string()),
            role: Some(Role::Vendor),
            ..Default::default()
        }));
        assert_eq!(user.name, "Kadiatou Bah");
        assert_eq!(user.role, Role::Client);
        assert_eq!(user.location, DEFAULT_LOCATION);
        assert!(!user.verified);
    }

    #[test]
    fn fallback_uses_email_then_default_name() {
        let user = fallback_profile(&identity(ProfileMetadata::default()));
        assert_eq!(user.name, "kadiatou");

        let mut anonymous = identity(ProfileMetadata::default());
        anonymous.email = None;
        let user = fallback_profile(&anonymous);
        assert_eq!(user.name, DEFAULT_NAME);
        assert_eq!(user.email, "");
    }

    #[test]
    fn default_profile_never_grants_admin() {
        let row = default_profile(&identity(ProfileMetadata {
            role: Some(Role::Admin),
            ..Default::default()
        }));
        assert_eq!(row.role, Role::Client);
        assert_eq!(row.name, DEFAULT_NAME);
        assert_eq!(row.location, DEFAULT_LOCATION);
    }

    #[test]
    fn default_profile_keeps_vendor_metadata() {
        let row = default_profile(&identity(ProfileMetadata {
            name: Some("Alpha".to_string()),
            location: Some("Boké".to_string()),
            role: Some(Role::Vendor),
            ..Default::default()
        }));
        assert_eq!(row.role, Role::Vendor);
        assert_eq!(row.location, "Boké");
    }
}
