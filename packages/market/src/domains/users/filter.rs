//! Admin user-list filtering.

use super::models::{Role, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

/// Search term (name or email, case-insensitive) plus role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub search_term: String,
    pub role: RoleFilter,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let RoleFilter::Only(role) = self.role {
            if user.role != role {
                return false;
            }
        }
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Head counts per role, for the admin dashboard.
pub fn count_by_role(users: &[User], role: Role) -> usize {
    users.iter().filter(|u| u.role == role).count()
}
