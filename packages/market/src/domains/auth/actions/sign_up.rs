//! Sign-up action

use tracing::{info, warn};

use crate::common::{AppContext, MarketResult};
use crate::domains::auth::models::{SignUpOutcome, SignUpProfile};
use crate::domains::users::models::NewUser;
use crate::kernel::MarketDeps;

use super::fallback_profile;

/// Register an account, then write its profile row.
///
/// The identity and the profile are two separate remote writes. When the
/// second one fails the account still exists: the session gets an
/// unpersisted client profile and the outcome reports `persisted: false`.
pub async fn sign_up(
    deps: &MarketDeps,
    ctx: &AppContext,
    email: &str,
    password: &str,
    profile: &SignUpProfile,
) -> MarketResult<SignUpOutcome> {
    profile.validate()?;

    let identity = deps
        .auth
        .sign_up(email.trim(), password, &profile.metadata())
        .await?;
    info!(user_id = %identity.id, role = %profile.role, "Account registered");

    let row = NewUser {
        id: identity.id,
        name: profile.name.trim().to_string(),
        email: email.trim().to_string(),
        phone: profile.phone.trim().to_string(),
        role: profile.role,
        location: profile.location.trim().to_string(),
        verified: false,
    };

    let outcome = match deps.users.insert(&row).await {
        Ok(user) => SignUpOutcome {
            user,
            persisted: true,
        },
        Err(e) => {
            warn!(user_id = %identity.id, error = %e, "Profile insert failed, continuing with temporary profile");
            SignUpOutcome {
                user: fallback_profile(&identity),
                persisted: false,
            }
        }
    };

    ctx.set_user(Some(outcome.user.clone()));
    Ok(outcome)
}
