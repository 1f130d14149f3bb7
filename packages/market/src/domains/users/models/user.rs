use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::UserId;

/// Location assumed for profiles created without one.
pub const DEFAULT_LOCATION: &str = "Conakry";

/// Name assumed for profiles created without one.
pub const DEFAULT_NAME: &str = "Utilisateur";

/// Profile row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub location: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Unpersisted profile for when the `users` table cannot be reached.
    pub fn synthesized(id: UserId, name: &str, email: &str, role: Role) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: String::new(),
            role,
            avatar: None,
            location: DEFAULT_LOCATION.to_string(),
            verified: false,
            created_at: Utc::now(),
        }
    }
}

/// Row sent when creating a profile. Role and verification default server-side
/// when omitted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub location: String,
    pub verified: bool,
}

impl NewUser {
    /// Synthesized stand-in when this row could not be stored.
    pub fn into_unpersisted(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            avatar: None,
            location: self.location,
            verified: self.verified,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Client,
    Vendor,
    Admin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Vendor => "Vendeur",
            Role::Admin => "Administrateur",
        }
    }

    pub fn variants() -> &'static [Role] {
        &[Role::Client, Role::Vendor, Role::Admin]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Vendor => write!(f, "vendor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client" => Ok(Role::Client),
            "vendor" => Ok(Role::Vendor),
            "admin" => Ok(Role::Admin),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}
