//! Admin user management.

mod common;

use crate::common::{admin, client, vendor, TestHarness};
use market_core::common::{AuthError, MarketError};
use market_core::domains::users::actions::{list_users, set_verified};
use market_core::domains::users::filter::{RoleFilter, UserFilter};
use market_core::domains::users::models::Role;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_lists_and_filters_users(ctx: &mut TestHarness) {
    ctx.seed_users(vec![vendor("Binta Camara"), client("Moussa Kaba"), vendor("Alpha Barry")]);

    let users = list_users(&ctx.deps, &admin()).await.unwrap();
    assert_eq!(users.len(), 3);

    let vendors = UserFilter {
        role: RoleFilter::Only(Role::Vendor),
        ..Default::default()
    };
    assert_eq!(vendors.apply(&users).len(), 2);

    let search = UserFilter {
        search_term: "barry".to_string(),
        ..Default::default()
    };
    assert_eq!(search.apply(&users)[0].name, "Alpha Barry");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn non_admin_cannot_list_users(ctx: &mut TestHarness) {
    let err = list_users(&ctx.deps, &vendor("Curious")).await.unwrap_err();

    assert!(matches!(err, MarketError::Auth(AuthError::AdminRequired)));
    assert!(ctx.mocks.users.calls().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_verifies_vendor(ctx: &mut TestHarness) {
    let seller = vendor("Hawa Cissé");
    ctx.seed_users(vec![seller.clone()]);

    let updated = set_verified(&ctx.deps, &admin(), seller.id, true).await.unwrap();

    assert!(updated.verified);
    assert!(ctx.mocks.users.rows()[0].verified);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn vendor_cannot_verify_themselves(ctx: &mut TestHarness) {
    let seller = vendor("Hawa Cissé");
    ctx.seed_users(vec![seller.clone()]);

    let err = set_verified(&ctx.deps, &seller, seller.id, true).await.unwrap_err();

    assert!(matches!(err, MarketError::Auth(AuthError::AdminRequired)));
    assert!(!ctx.mocks.users.rows()[0].verified);
}
