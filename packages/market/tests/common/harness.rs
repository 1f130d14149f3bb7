//! Test harness over the in-memory kernel mocks.

use market_core::common::AppContext;
use market_core::domains::listings::models::Listing;
use market_core::domains::users::models::User;
use market_core::kernel::test_dependencies::TestDependencies;
use market_core::kernel::MarketDeps;
use test_context::AsyncTestContext;

/// Mocks, the deps wired over them, and a fresh session context.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let listings = fetch_listings(&ctx.deps, &ListingQuery::new()).await;
/// }
/// ```
pub struct TestHarness {
    pub mocks: TestDependencies,
    pub deps: MarketDeps,
    pub ctx: AppContext,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_mocks(TestDependencies::new())
    }

    pub fn with_mocks(mocks: TestDependencies) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let deps = mocks.deps();
        Self {
            mocks,
            deps,
            ctx: AppContext::new(),
        }
    }

    /// Put `user` in the session, as if sign-in had completed.
    pub fn sign_in_as(&self, user: &User) {
        self.ctx.set_user(Some(user.clone()));
    }

    pub fn seed_listings(&self, listings: Vec<Listing>) {
        let _ = self.mocks.listings.clone().with_listings(listings);
    }

    pub fn seed_users(&self, users: Vec<User>) {
        let _ = self.mocks.users.clone().with_users(users);
    }
}
