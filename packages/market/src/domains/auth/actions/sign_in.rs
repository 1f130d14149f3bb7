//! Sign-in and sign-out actions

use tracing::info;

use crate::common::{AppContext, MarketResult};
use crate::domains::users::models::User;
use crate::kernel::MarketDeps;

use super::install_profile;

/// Authenticate with email and password and load the profile.
///
/// Returns `None` when the identity is valid but no profile could be
/// resolved; the context then holds no user. A running [`SessionWatch`]
/// sees the same sign-in; whichever gets there first resolves the profile.
///
/// [`SessionWatch`]: crate::domains::auth::SessionWatch
pub async fn sign_in(
    deps: &MarketDeps,
    ctx: &AppContext,
    email: &str,
    password: &str,
) -> MarketResult<Option<User>> {
    let identity = deps.auth.sign_in(email.trim(), password).await?;
    info!(user_id = %identity.id, "Signed in");

    Ok(install_profile(deps, ctx, &identity).await)
}

pub async fn sign_out(deps: &MarketDeps, ctx: &AppContext) -> MarketResult<()> {
    deps.auth.sign_out().await?;
    ctx.clear();
    info!("Signed out");
    Ok(())
}
