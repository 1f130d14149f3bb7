//! Listing and user fixtures.

use chrono::{Duration, Utc};
use market_core::common::{ListingId, UserId};
use market_core::domains::auth::models::{AuthIdentity, ProfileMetadata};
use market_core::domains::listings::data::NewListingInput;
use market_core::domains::listings::models::{Category, Condition, Listing, ListingStatus};
use market_core::domains::users::models::{Role, User};

pub fn vendor(name: &str) -> User {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    User::synthesized(UserId::new(), name, &email, Role::Vendor)
}

pub fn client(name: &str) -> User {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    User::synthesized(UserId::new(), name, &email, Role::Client)
}

pub fn admin() -> User {
    User::synthesized(UserId::new(), "Admin", "admin@guineemarket.gn", Role::Admin)
}

/// A listing owned by a fresh vendor, created now.
pub fn listing(
    title: &str,
    status: ListingStatus,
    category: Category,
    price: f64,
    location: &str,
) -> Listing {
    let now = Utc::now();
    Listing {
        id: ListingId::new(),
        title: title.to_string(),
        description: format!("{} à vendre", title),
        price,
        images: Vec::new(),
        category,
        condition: Condition::Used,
        status,
        vendor_id: UserId::new(),
        vendor: None,
        location: location.to_string(),
        views: 0,
        featured: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn owned_by(mut listing: Listing, owner: &User) -> Listing {
    listing.vendor_id = owner.id;
    listing.vendor = Some(owner.clone());
    listing
}

pub fn aged(mut listing: Listing, minutes: i64) -> Listing {
    listing.created_at = Utc::now() - Duration::minutes(minutes);
    listing.updated_at = listing.created_at;
    listing
}

/// Complete "add listing" form.
pub fn listing_form() -> NewListingInput {
    NewListingInput {
        title: "Réfrigérateur Samsung".to_string(),
        description: "Double porte, très bon état".to_string(),
        price: "2 500 000".to_string(),
        images: vec!["https://cdn.example.com/frigo.jpg".to_string()],
        category: Some(Category::Electronics),
        condition: Some(Condition::Used),
        location: "Conakry".to_string(),
    }
}

pub fn identity(email: &str, metadata: ProfileMetadata) -> AuthIdentity {
    AuthIdentity {
        id: UserId::new(),
        email: Some(email.to_string()),
        metadata,
    }
}
