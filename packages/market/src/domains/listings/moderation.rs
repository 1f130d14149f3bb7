//! Admin approval and rejection of listings.
//!
//! Status moves `pending → approved` or `pending → rejected` and nowhere
//! else. Repeating the decision already in effect is a no-op; reversing a
//! decision is refused.

use thiserror::Error;
use tracing::info;

use super::models::{Listing, ListingStatus};
use crate::common::{Actor, Capability, MarketResult};
use crate::domains::users::models::User;
use crate::kernel::MarketDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    Approve,
    Reject,
}

impl ModerationDecision {
    pub fn target(&self) -> ListingStatus {
        match self {
            ModerationDecision::Approve => ListingStatus::Approved,
            ModerationDecision::Reject => ListingStatus::Rejected,
        }
    }
}

impl std::fmt::Display for ModerationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationDecision::Approve => write!(f, "approve"),
            ModerationDecision::Reject => write!(f, "reject"),
        }
    }
}

/// Outcome of applying a decision to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed(ListingStatus),
    Unchanged,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModerationError {
    #[error("Listing is already {current}; it cannot become {requested}")]
    Terminal {
        current: ListingStatus,
        requested: ListingStatus,
    },
}

impl ListingStatus {
    pub fn apply(self, decision: ModerationDecision) -> Result<Transition, ModerationError> {
        let target = decision.target();
        match self {
            ListingStatus::Pending => Ok(Transition::Changed(target)),
            current if current == target => Ok(Transition::Unchanged),
            current => Err(ModerationError::Terminal {
                current,
                requested: target,
            }),
        }
    }
}

/// Apply an admin decision to `listing`.
///
/// Issues one status update when the status changes and none when the
/// decision is already in effect. Returns the listing as it now stands.
/// Concurrent decisions by two admins are last-write-wins.
pub async fn moderate_listing(
    deps: &MarketDeps,
    actor: &User,
    listing: &Listing,
    decision: ModerationDecision,
) -> MarketResult<Listing> {
    Actor::new(actor).can(Capability::ModerateListings).check()?;

    match listing.status.apply(decision)? {
        Transition::Unchanged => {
            info!(listing_id = %listing.id, status = %listing.status, "Moderation decision already in effect");
            Ok(listing.clone())
        }
        Transition::Changed(status) => {
            let updated = deps.listings.set_status(listing.id, status).await?;
            info!(
                listing_id = %listing.id,
                admin_id = %actor.id,
                %decision,
                "Listing moderated"
            );
            Ok(updated)
        }
    }
}

/// Replace the entry with the same id as `updated`, if present.
pub fn patch_local(listings: &mut [Listing], updated: &Listing) -> bool {
    match listings.iter_mut().find(|l| l.id == updated.id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ListingId, UserId};
    use crate::common::{AuthError, MarketError};
    use crate::domains::listings::models::{Category, Condition};
    use crate::domains::users::models::Role;
    use crate::kernel::test_dependencies::TestDependencies;
    use chrono::Utc;

    fn listing(status: ListingStatus) -> Listing {
        let now = Utc::now();
        Listing {
            id: ListingId::new(),
            title: "Moto Yamaha".to_string(),
            description: "Bon état".to_string(),
            price: 9_500_000.0,
            images: Vec::new(),
            category: Category::Vehicles,
            condition: Condition::Used,
            status,
            vendor_id: UserId::new(),
            vendor: None,
            location: "Conakry".to_string(),
            views: 0,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_moves_to_decision() {
        assert_eq!(
            ListingStatus::Pending.apply(ModerationDecision::Approve),
            Ok(Transition::Changed(ListingStatus::Approved))
        );
        assert_eq!(
            ListingStatus::Pending.apply(ModerationDecision::Reject),
            Ok(Transition::Changed(ListingStatus::Rejected))
        );
    }

    #[test]
    fn same_decision_is_noop() {
        assert_eq!(
            ListingStatus::Approved.apply(ModerationDecision::Approve),
            Ok(Transition::Unchanged)
        );
        assert_eq!(
            ListingStatus::Rejected.apply(ModerationDecision::Reject),
            Ok(Transition::Unchanged)
        );
    }

    #[test]
    fn reversing_a_decision_is_refused() {
        assert_eq!(
            ListingStatus::Rejected.apply(ModerationDecision::Approve),
            Err(ModerationError::Terminal {
                current: ListingStatus::Rejected,
                requested: ListingStatus::Approved,
            })
        );
        assert!(ListingStatus::Approved
            .apply(ModerationDecision::Reject)
            .is_err());
    }

    #[test]
    fn patch_local_replaces_matching_entry() {
        let mut items = vec![listing(ListingStatus::Pending), listing(ListingStatus::Pending)];
        let mut updated = items[1].clone();
        updated.status = ListingStatus::Approved;

        assert!(patch_local(&mut items, &updated));
        assert_eq!(items[0].status, ListingStatus::Pending);
        assert_eq!(items[1].status, ListingStatus::Approved);

        let stranger = listing(ListingStatus::Approved);
        assert!(!patch_local(&mut items, &stranger));
    }

    #[test]
    fn non_admin_decision_issues_no_store_call() {
        let mocks = TestDependencies::new();
        let deps = mocks.deps();
        let pending = listing(ListingStatus::Pending);
        let vendor = User::synthesized(pending.vendor_id, "Vendeur", "v@example.com", Role::Vendor);

        let result = tokio_test::block_on(moderate_listing(
            &deps,
            &vendor,
            &pending,
            ModerationDecision::Approve,
        ));

        assert!(matches!(
            result,
            Err(MarketError::Auth(AuthError::AdminRequired))
        ));
        assert_eq!(mocks.listings.call_count(), 0);
    }
}
