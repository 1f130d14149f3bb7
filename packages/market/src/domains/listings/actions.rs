//! Listing repository access: reads and vendor mutations.

use tracing::{debug, error, info, warn};

use super::data::{ListingPatch, ListingQuery, NewListing, NewListingInput};
use super::models::Listing;
use crate::common::{
    Actor, AppContext, Capability, ListingId, MarketError, MarketResult,
    ValidationError,
};
use crate::domains::users::models::User;
use crate::kernel::MarketDeps;

/// Listings matching `query`, newest first.
pub async fn fetch_listings(deps: &MarketDeps, query: &ListingQuery) -> MarketResult<Vec<Listing>> {
    debug!(?query, "Fetching listings");
    deps.listings.fetch(query).await.map_err(|e| {
        error!(error = %e, "Failed to fetch listings");
        MarketError::from(e)
    })
}

/// Every listing of the signed-in vendor, whatever its status.
pub async fn fetch_vendor_listings(
    deps: &MarketDeps,
    ctx: &AppContext,
) -> MarketResult<Vec<Listing>> {
    let user = ctx.require_user()?;
    fetch_listings(deps, &ListingQuery::new().vendor(user.id)).await
}

pub async fn find_listing(deps: &MarketDeps, id: ListingId) -> MarketResult<Option<Listing>> {
    debug!(listing_id = %id, "Fetching listing");
    Ok(deps.listings.find(id).await?)
}

/// Submit a new listing for moderation.
///
/// The form is validated before anything else, so an incomplete form never
/// reaches the store. The listing starts `pending` and belongs to the
/// signed-in user.
pub async fn create_listing(
    deps: &MarketDeps,
    ctx: &AppContext,
    input: &NewListingInput,
) -> MarketResult<Listing> {
    let draft = input.validate()?;
    let user = ctx.require_user()?;

    let row = NewListing::from_draft(draft, user.id);
    let listing = deps.listings.insert(&row).await?;
    info!(
        listing_id = %listing.id,
        vendor_id = %user.id,
        category = %listing.category,
        "Listing submitted for moderation"
    );
    Ok(listing)
}

/// Edit a listing's content. Owner or admin only; status is untouched.
pub async fn update_listing(
    deps: &MarketDeps,
    actor: &User,
    listing: &Listing,
    patch: &ListingPatch,
) -> MarketResult<Listing> {
    Actor::new(actor)
        .can(Capability::ManageListing {
            owner: listing.vendor_id,
        })
        .check()?;
    patch.validate()?;
    if patch.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "patch",
            value: "no fields to update".to_string(),
        }
        .into());
    }

    let updated = deps.listings.update(listing.id, patch).await?;
    info!(listing_id = %listing.id, actor_id = %actor.id, "Listing updated");
    Ok(updated)
}

/// Owner or admin only.
pub async fn delete_listing(deps: &MarketDeps, actor: &User, listing: &Listing) -> MarketResult<()> {
    Actor::new(actor)
        .can(Capability::ManageListing {
            owner: listing.vendor_id,
        })
        .check()?;

    deps.listings.delete(listing.id).await?;
    info!(listing_id = %listing.id, actor_id = %actor.id, "Listing deleted");
    Ok(())
}

/// Count one detail view. Failures are logged and otherwise ignored.
pub async fn increment_views(deps: &MarketDeps, id: ListingId) {
    if let Err(e) = deps.listings.increment_views(id).await {
        warn!(listing_id = %id, error = %e, "Failed to increment views");
    }
}
