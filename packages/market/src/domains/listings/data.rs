//! Inputs and query parameters for listing operations.

use serde::Serialize;

use super::models::{Category, Condition, Listing, ListingStatus};
use crate::common::{UserId, ValidationError};

/// Optional parameters of a remote listing fetch. Results always come back
/// newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    pub status: Option<ListingStatus>,
    pub vendor_id: Option<UserId>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn vendor(mut self, vendor_id: UserId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// The location to filter on; a blank location means any.
    pub fn location_filter(&self) -> Option<&str> {
        self.location.as_deref().filter(|loc| !loc.trim().is_empty())
    }

    /// Whether a row satisfies the query, mirroring the remote filters.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.category.map_or(true, |c| listing.category == c)
            && self.condition.map_or(true, |c| listing.condition == c)
            && self.min_price.map_or(true, |min| listing.price >= min)
            && self.max_price.map_or(true, |max| listing.price <= max)
            && self
                .location_filter()
                .map_or(true, |loc| listing.location == loc)
            && self.status.map_or(true, |s| listing.status == s)
            && self.vendor_id.map_or(true, |v| listing.vendor_id == v)
    }
}

/// Raw values from the "add listing" form.
#[derive(Debug, Clone, Default)]
pub struct NewListingInput {
    pub title: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub location: String,
}

/// Form values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub category: Category,
    pub condition: Condition,
    pub location: String,
}

impl NewListingInput {
    /// Check required fields and the price. Runs before any remote call.
    pub fn validate(&self) -> Result<ListingDraft, ValidationError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let price = parse_price(required("price", &self.price)?)?;
        let category = self
            .category
            .ok_or(ValidationError::MissingField("category"))?;
        let location = required("location", &self.location)?;

        let images = self
            .images
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ListingDraft {
            title: title.to_string(),
            description: description.to_string(),
            price,
            images,
            category,
            condition: self.condition.unwrap_or(Condition::New),
            location: location.to_string(),
        })
    }
}

/// Row inserted into `products`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub category: Category,
    pub condition: Condition,
    pub location: String,
    pub status: ListingStatus,
    pub vendor_id: UserId,
}

impl NewListing {
    /// Every new listing starts in moderation.
    pub fn from_draft(draft: ListingDraft, vendor_id: UserId) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            price: draft.price,
            images: draft.images,
            category: draft.category,
            condition: draft.condition,
            location: draft.location,
            status: ListingStatus::Pending,
            vendor_id,
        }
    }
}

/// Partial edit of a listing's content. Status is not editable here; it only
/// changes through moderation.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ListingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            check_price(price)?;
        }
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ValidationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Apply to a local copy (optimistic view update).
    pub fn apply_to(&self, listing: &mut Listing) {
        if let Some(title) = &self.title {
            listing.title = title.clone();
        }
        if let Some(description) = &self.description {
            listing.description = description.clone();
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(images) = &self.images {
            listing.images = images.clone();
        }
        if let Some(category) = self.category {
            listing.category = category;
        }
        if let Some(condition) = self.condition {
            listing.condition = condition;
        }
        if let Some(location) = &self.location {
            listing.location = location.clone();
        }
    }
}

/// Payload of a moderation update.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusPatch {
    pub status: ListingStatus,
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{202F}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let price: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::InvalidPrice(raw.to_string()))?;
    check_price(price)?;
    Ok(price)
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> NewListingInput {
        NewListingInput {
            title: "Toyota Corolla 2012".to_string(),
            description: "Climatisée, 120 000 km".to_string(),
            price: "45 000 000".to_string(),
            images: vec![" https://cdn.example.com/a.jpg ".to_string(), "".to_string()],
            category: Some(Category::Vehicles),
            condition: Some(Condition::Used),
            location: "Conakry".to_string(),
        }
    }

    #[test]
    fn blank_query_location_is_ignored() {
        let mut query = ListingQuery::new();
        query.location = Some(" ".to_string());
        assert_eq!(query.location_filter(), None);

        query.location = Some("Kankan".to_string());
        assert_eq!(query.location_filter(), Some("Kankan"));
    }

    #[test]
    fn complete_input_validates() {
        let draft = complete_input().validate().unwrap();
        assert_eq!(draft.price, 45_000_000.0);
        assert_eq!(draft.images, vec!["https://cdn.example.com/a.jpg".to_string()]);
        assert_eq!(draft.condition, Condition::Used);
    }

    #[test]
    fn missing_location_is_reported() {
        let input = NewListingInput {
            location: "   ".to_string(),
            ..complete_input()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField("location"))
        );
    }

    #[test]
    fn missing_category_is_reported() {
        let input = NewListingInput {
            category: None,
            ..complete_input()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField("category"))
        );
    }

    #[test]
    fn negative_or_garbage_price_is_invalid() {
        for raw in ["-5", "abc", "NaN"] {
            let input = NewListingInput {
                price: raw.to_string(),
                ..complete_input()
            };
            assert!(matches!(
                input.validate(),
                Err(ValidationError::InvalidPrice(_))
            ));
        }
    }

    #[test]
    fn condition_defaults_to_new() {
        let input = NewListingInput {
            condition: None,
            ..complete_input()
        };
        assert_eq!(input.validate().unwrap().condition, Condition::New);
    }

    #[test]
    fn new_listing_starts_pending() {
        let vendor = UserId::new();
        let row = NewListing::from_draft(complete_input().validate().unwrap(), vendor);
        assert_eq!(row.status, ListingStatus::Pending);
        assert_eq!(row.vendor_id, vendor);
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ListingPatch {
            price: Some(700000.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"price": 700000.0})
        );
        assert!(!patch.is_empty());
        assert!(ListingPatch::default().is_empty());
    }

    #[test]
    fn patch_rejects_blank_title() {
        let patch = ListingPatch {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::MissingField("title")));
    }
}
