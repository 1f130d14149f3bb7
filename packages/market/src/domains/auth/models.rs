use serde::{Deserialize, Serialize};

use crate::common::{UserId, ValidationError};
use crate::domains::users::models::Role;

/// Who the identity provider says is signed in. Distinct from the
/// marketplace profile, which may not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthIdentity {
    pub id: UserId,
    pub email: Option<String>,
    pub metadata: ProfileMetadata,
}

impl AuthIdentity {
    /// Part of the email before `@`.
    pub fn email_local_part(&self) -> Option<&str> {
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
    }
}

/// Profile fields stored with the identity at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Registration form.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpProfile {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub role: Role,
}

impl SignUpProfile {
    /// Only clients and vendors can register themselves.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::MissingField("location"));
        }
        if self.role == Role::Admin {
            return Err(ValidationError::InvalidValue {
                field: "role",
                value: self.role.to_string(),
            });
        }
        Ok(())
    }

    pub fn metadata(&self) -> ProfileMetadata {
        ProfileMetadata {
            name: Some(self.name.trim().to_string()),
            phone: Some(self.phone.trim().to_string()).filter(|p| !p.is_empty()),
            location: Some(self.location.trim().to_string()),
            role: Some(self.role),
        }
    }
}

/// Result of registration. `persisted` is false when the profile row could
/// not be written and `user` was synthesized from the identity.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: crate::domains::users::models::User,
    pub persisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role) -> SignUpProfile {
        SignUpProfile {
            name: " Fatoumata ".to_string(),
            phone: "".to_string(),
            location: "Kankan".to_string(),
            role,
        }
    }

    #[test]
    fn admin_cannot_self_register() {
        assert!(matches!(
            profile(Role::Admin).validate(),
            Err(ValidationError::InvalidValue { field: "role", .. })
        ));
        assert!(profile(Role::Vendor).validate().is_ok());
        assert!(profile(Role::Client).validate().is_ok());
    }

    #[test]
    fn name_is_required() {
        let mut p = profile(Role::Client);
        p.name = "   ".to_string();
        assert_eq!(p.validate(), Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn metadata_trims_and_drops_empty_phone() {
        let meta = profile(Role::Vendor).metadata();
        assert_eq!(meta.name.as_deref(), Some("Fatoumata"));
        assert_eq!(meta.phone, None);
        assert_eq!(meta.role, Some(Role::Vendor));

        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["role"], "vendor");
    }

    #[test]
    fn email_local_part() {
        let identity = AuthIdentity {
            id: UserId::new(),
            email: Some("ibrahima.sow@example.com".to_string()),
            metadata: ProfileMetadata::default(),
        };
        assert_eq!(identity.email_local_part(), Some("ibrahima.sow"));

        let anonymous = AuthIdentity {
            email: None,
            ..identity
        };
        assert_eq!(anonymous.email_local_part(), None);
    }
}
