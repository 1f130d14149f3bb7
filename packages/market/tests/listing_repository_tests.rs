//! Listing fetch and vendor mutations against the mock store.

mod common;

use crate::common::{admin, aged, listing, listing_form, owned_by, vendor, TestHarness};
use market_core::common::{AuthError, ListingId, MarketError, StoreError, ValidationError};
use market_core::domains::listings::actions::{
    create_listing, delete_listing, fetch_listings, fetch_vendor_listings, find_listing,
    increment_views, update_listing,
};
use market_core::domains::listings::data::{ListingPatch, ListingQuery};
use market_core::domains::listings::models::{Category, ListingStatus};
use market_core::kernel::test_dependencies::{ListingCall, MockListingStore, TestDependencies};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn create_without_location_never_reaches_store(ctx: &mut TestHarness) {
    ctx.sign_in_as(&vendor("Oumar Sylla"));
    let mut form = listing_form();
    form.location = "   ".to_string();

    let err = create_listing(&ctx.deps, &ctx.ctx, &form).await.unwrap_err();

    assert!(matches!(
        err,
        MarketError::Validation(ValidationError::MissingField("location"))
    ));
    assert_eq!(err.user_message(), "Veuillez remplir tous les champs obligatoires");
    assert_eq!(ctx.mocks.listings.call_count(), 0);
    assert!(ctx.mocks.listings.rows().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_requires_signed_in_user(ctx: &mut TestHarness) {
    let err = create_listing(&ctx.deps, &ctx.ctx, &listing_form())
        .await
        .unwrap_err();

    assert!(matches!(err, MarketError::Auth(AuthError::AuthenticationRequired)));
    assert_eq!(ctx.mocks.listings.call_count(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn created_listing_is_pending_and_owned(ctx: &mut TestHarness) {
    let seller = vendor("Oumar Sylla");
    ctx.sign_in_as(&seller);

    let created = create_listing(&ctx.deps, &ctx.ctx, &listing_form())
        .await
        .unwrap();

    assert_eq!(created.status, ListingStatus::Pending);
    assert_eq!(created.vendor_id, seller.id);
    assert_eq!(created.price, 2_500_000.0);
    assert_eq!(created.views, 0);
    match &ctx.mocks.listings.calls()[..] {
        [ListingCall::Insert(row)] => assert_eq!(row.status, ListingStatus::Pending),
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn fetch_is_newest_first_and_filtered(ctx: &mut TestHarness) {
    ctx.seed_listings(vec![
        aged(listing("old", ListingStatus::Approved, Category::Services, 1.0, "Conakry"), 60),
        aged(listing("new", ListingStatus::Approved, Category::Services, 1.0, "Conakry"), 1),
        aged(listing("hidden", ListingStatus::Pending, Category::Services, 1.0, "Conakry"), 5),
    ]);

    let found = fetch_listings(&ctx.deps, &ListingQuery::new().status(ListingStatus::Approved))
        .await
        .unwrap();

    let titles: Vec<_> = found.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "old"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn vendor_sees_all_own_listings(ctx: &mut TestHarness) {
    let seller = vendor("Fanta Condé");
    ctx.seed_listings(vec![
        owned_by(listing("mine pending", ListingStatus::Pending, Category::Clothing, 1.0, "Conakry"), &seller),
        owned_by(listing("mine rejected", ListingStatus::Rejected, Category::Clothing, 1.0, "Conakry"), &seller),
        listing("someone else", ListingStatus::Approved, Category::Clothing, 1.0, "Conakry"),
    ]);
    ctx.sign_in_as(&seller);

    let mine = fetch_vendor_listings(&ctx.deps, &ctx.ctx).await.unwrap();

    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|l| l.vendor_id == seller.id));
}

#[tokio::test]
async fn remote_failure_keeps_its_kind() {
    let mocks = TestDependencies::new()
        .with_listings(MockListingStore::new().fail_on("fetch", StoreError::Unauthorized));
    let harness = TestHarness::with_mocks(mocks);

    let err = fetch_listings(&harness.deps, &ListingQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, MarketError::Store(StoreError::Unauthorized)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn owner_updates_content_but_not_status(ctx: &mut TestHarness) {
    let seller = vendor("Ibrahima Touré");
    let item = owned_by(
        listing("Chaise", ListingStatus::Approved, Category::Furniture, 100_000.0, "Conakry"),
        &seller,
    );
    ctx.seed_listings(vec![item.clone()]);

    let patch = ListingPatch {
        price: Some(90_000.0),
        ..Default::default()
    };
    let updated = update_listing(&ctx.deps, &seller, &item, &patch).await.unwrap();

    assert_eq!(updated.price, 90_000.0);
    assert_eq!(updated.status, ListingStatus::Approved);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn other_vendor_cannot_update_or_delete(ctx: &mut TestHarness) {
    let item = owned_by(
        listing("Chaise", ListingStatus::Approved, Category::Furniture, 100_000.0, "Conakry"),
        &vendor("Owner"),
    );
    ctx.seed_listings(vec![item.clone()]);
    let intruder = vendor("Intruder");

    let patch = ListingPatch {
        title: Some("Volée".to_string()),
        ..Default::default()
    };
    let err = update_listing(&ctx.deps, &intruder, &item, &patch).await.unwrap_err();
    assert!(matches!(err, MarketError::Auth(AuthError::PermissionDenied(_))));

    let err = delete_listing(&ctx.deps, &intruder, &item).await.unwrap_err();
    assert!(matches!(err, MarketError::Auth(AuthError::PermissionDenied(_))));

    assert_eq!(ctx.mocks.listings.call_count(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_deletes_any_listing(ctx: &mut TestHarness) {
    let item = listing("Spam", ListingStatus::Pending, Category::Services, 1.0, "Conakry");
    ctx.seed_listings(vec![item.clone()]);

    delete_listing(&ctx.deps, &admin(), &item).await.unwrap();

    assert!(ctx.mocks.listings.rows().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_patch_is_rejected(ctx: &mut TestHarness) {
    let seller = vendor("Owner");
    let item = owned_by(
        listing("Chaise", ListingStatus::Approved, Category::Furniture, 100_000.0, "Conakry"),
        &seller,
    );

    let err = update_listing(&ctx.deps, &seller, &item, &ListingPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MarketError::Validation(_)));
    assert_eq!(ctx.mocks.listings.call_count(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn views_increment(ctx: &mut TestHarness) {
    let item = listing("Montre", ListingStatus::Approved, Category::Electronics, 1.0, "Conakry");
    ctx.seed_listings(vec![item.clone()]);

    increment_views(&ctx.deps, item.id).await;
    increment_views(&ctx.deps, item.id).await;

    assert_eq!(ctx.mocks.listings.rows()[0].views, 2);
}

#[tokio::test]
async fn view_increment_failure_is_swallowed() {
    let mocks = TestDependencies::new().with_listings(
        MockListingStore::new().fail_on("increment_views", StoreError::remote("timeout")),
    );
    let harness = TestHarness::with_mocks(mocks);
    let item = listing("Montre", ListingStatus::Approved, Category::Electronics, 1.0, "Conakry");

    // Returns unit; nothing to surface.
    increment_views(&harness.deps, item.id).await;

    assert_eq!(harness.mocks.listings.call_count(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn find_returns_seeded_listing_or_none(ctx: &mut TestHarness) {
    let phone = listing("Téléphone", ListingStatus::Approved, Category::Electronics, 1.0, "Kindia");
    let id = phone.id;
    ctx.seed_listings(vec![phone]);

    let found = find_listing(&ctx.deps, id).await.unwrap();
    assert_eq!(found.map(|l| l.title), Some("Téléphone".to_string()));

    let missing = find_listing(&ctx.deps, ListingId::new()).await.unwrap();
    assert!(missing.is_none());
    assert_eq!(ctx.mocks.listings.call_count(), 2);
}
