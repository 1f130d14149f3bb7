use crate::common::UserId;

/// What an actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Approve or reject pending listings
    ModerateListings,

    /// List user accounts and toggle verification
    ManageUsers,

    /// Edit or delete a listing owned by `owner`
    ManageListing { owner: UserId },
}

impl Capability {
    pub fn requires_admin(&self) -> bool {
        match self {
            Capability::ModerateListings | Capability::ManageUsers => true,
            Capability::ManageListing { .. } => false,
        }
    }
}
