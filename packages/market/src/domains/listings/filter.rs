//! In-memory narrowing of a fetched listing collection for display.
//!
//! The browse view only ever shows approved listings; the admin queue shows
//! every status and searches vendor names too. Both preserve input order
//! (callers pass listings newest first, as fetched).

use super::models::{Category, Condition, Listing, ListingStatus};

/// Browse-view filter. Unset fields (and an empty search term or location)
/// match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub search_term: String,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        if !listing.is_public() {
            return false;
        }

        if !self.search_term.is_empty() {
            let needle = self.search_term.to_lowercase();
            if !contains_folded(&listing.title, &needle)
                && !contains_folded(&listing.description, &needle)
            {
                return false;
            }
        }

        if self.category.is_some_and(|c| listing.category != c) {
            return false;
        }
        if self.condition.is_some_and(|c| listing.condition != c) {
            return false;
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        if self.location().is_some_and(|loc| listing.location != loc) {
            return false;
        }

        true
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|loc| !loc.trim().is_empty())
    }
}

/// Approved listings satisfying every predicate of `filter`, in input order.
pub fn filter_listings<'a>(listings: &'a [Listing], filter: &ListingFilter) -> Vec<&'a Listing> {
    listings.iter().filter(|l| filter.matches(l)).collect()
}

/// Browse results split into the featured strip and everything else.
#[derive(Debug, Default, PartialEq)]
pub struct BrowseSections<'a> {
    pub featured: Vec<&'a Listing>,
    pub others: Vec<&'a Listing>,
}

impl<'a> BrowseSections<'a> {
    pub fn build(listings: &'a [Listing], filter: &ListingFilter) -> Self {
        let (featured, others): (Vec<&Listing>, Vec<&Listing>) = filter_listings(listings, filter)
            .into_iter()
            .partition(|l| l.featured);
        Self { featured, others }
    }

    pub fn len(&self) -> usize {
        self.featured.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Admin moderation queue
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ListingStatus),
    /// The queue opens on what needs attention.
    #[default]
    PendingOnly,
}

impl StatusFilter {
    fn accepts(&self, status: ListingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
            StatusFilter::PendingOnly => status == ListingStatus::Pending,
        }
    }
}

/// Moderation-queue filter: search over title or vendor name, plus a status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModerationQueueFilter {
    pub search_term: String,
    pub status: StatusFilter,
}

impl ModerationQueueFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        let needle = self.search_term.to_lowercase();
        let matches_search = contains_folded(&listing.title, &needle)
            || listing
                .vendor_name()
                .is_some_and(|name| contains_folded(name, &needle));

        matches_search && self.status.accepts(listing.status)
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Badge count for the moderation queue.
pub fn pending_count(listings: &[Listing]) -> usize {
    listings
        .iter()
        .filter(|l| l.status == ListingStatus::Pending)
        .count()
}

/// `needle` must already be lowercase.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
