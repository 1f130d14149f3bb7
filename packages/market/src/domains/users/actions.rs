//! Admin actions on user profiles.

use tracing::{debug, info};

use super::models::User;
use crate::common::{Actor, Capability, MarketResult, UserId};
use crate::kernel::MarketDeps;

/// Every profile, newest first. Admin only.
pub async fn list_users(deps: &MarketDeps, actor: &User) -> MarketResult<Vec<User>> {
    Actor::new(actor).can(Capability::ManageUsers).check()?;
    debug!(admin_id = %actor.id, "Listing users");
    Ok(deps.users.list().await?)
}

/// Mark a vendor as verified (or withdraw it). Admin only.
pub async fn set_verified(
    deps: &MarketDeps,
    actor: &User,
    user_id: UserId,
    verified: bool,
) -> MarketResult<User> {
    Actor::new(actor).can(Capability::ManageUsers).check()?;

    let user = deps.users.set_verified(user_id, verified).await?;
    info!(user_id = %user_id, admin_id = %actor.id, verified, "User verification changed");
    Ok(user)
}
