use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{ListingId, UserId};
use crate::domains::users::models::User;

/// Columns requested when fetching listings: the row plus its vendor profile.
pub const LISTING_SELECT: &str = "*, vendor:users!products_vendor_id_fkey(*)";

/// Listing - a product or service offered by a vendor (`products` table)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: ListingId,

    // Content
    pub title: String,
    pub description: String,
    /// Amount in Guinean francs, never negative.
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,

    pub category: Category,
    pub condition: Condition,
    pub status: ListingStatus,

    // Ownership
    pub vendor_id: UserId,
    /// Embedded vendor profile, present when fetched with [`LISTING_SELECT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<User>,

    pub location: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub featured: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor.as_ref().map(|v| v.name.as_str())
    }

    pub fn is_public(&self) -> bool {
        self.status == ListingStatus::Approved
    }
}

// =============================================================================
// Enums for type-safe columns
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Vehicles,
    Furniture,
    Services,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Électronique",
            Category::Clothing => "Vêtements",
            Category::Vehicles => "Véhicules",
            Category::Furniture => "Meubles",
            Category::Services => "Services",
        }
    }

    pub fn variants() -> &'static [Category] {
        &[
            Category::Electronics,
            Category::Clothing,
            Category::Vehicles,
            Category::Furniture,
            Category::Services,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Electronics => write!(f, "electronics"),
            Category::Clothing => write!(f, "clothing"),
            Category::Vehicles => write!(f, "vehicles"),
            Category::Furniture => write!(f, "furniture"),
            Category::Services => write!(f, "services"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "vehicles" => Ok(Category::Vehicles),
            "furniture" => Ok(Category::Furniture),
            "services" => Ok(Category::Services),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "Neuf",
            Condition::Used => "Occasion",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::New => write!(f, "new"),
            Condition::Used => write!(f, "used"),
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            _ => Err(anyhow::anyhow!("Invalid condition: {}", s)),
        }
    }
}

/// Moderation status. Listings are created `Pending`; only an admin moves them on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "En attente",
            ListingStatus::Approved => "Approuvé",
            ListingStatus::Rejected => "Refusé",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ListingStatus::Pending)
    }

    pub fn variants() -> &'static [ListingStatus] {
        &[
            ListingStatus::Pending,
            ListingStatus::Approved,
            ListingStatus::Rejected,
        ]
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Approved => write!(f, "approved"),
            ListingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ListingStatus::Pending),
            "approved" => Ok(ListingStatus::Approved),
            "rejected" => Ok(ListingStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}
