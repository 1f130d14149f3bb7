use super::{AuthError, Capability};
use crate::domains::users::models::{Role, User};

/// Entry point for authorization checks
///
/// Usage:
/// ```rust,ignore
/// Actor::new(&user)
///     .can(Capability::ModerateListings)
///     .check()?;
/// ```
pub struct Actor<'a> {
    user: &'a User,
}

impl<'a> Actor<'a> {
    pub fn new(user: &'a User) -> Self {
        Self { user }
    }

    /// Actor from an optional session user; `None` fails with `AuthenticationRequired`.
    pub fn from_session(user: Option<&'a User>) -> Result<Self, AuthError> {
        user.map(Self::new).ok_or(AuthError::AuthenticationRequired)
    }

    pub fn can(self, capability: Capability) -> CapabilityCheck<'a> {
        CapabilityCheck {
            user: self.user,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityCheck<'a> {
    user: &'a User,
    capability: Capability,
}

impl CapabilityCheck<'_> {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        let is_admin = self.user.role == Role::Admin;

        if self.capability.requires_admin() {
            return if is_admin {
                Ok(())
            } else {
                Err(AuthError::AdminRequired)
            };
        }

        match self.capability {
            Capability::ManageListing { owner } if owner == self.user.id || is_admin => Ok(()),
            Capability::ManageListing { .. } => Err(AuthError::PermissionDenied(
                "listing belongs to another vendor".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
