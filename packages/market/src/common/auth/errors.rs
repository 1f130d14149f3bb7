use thiserror::Error;

/// Authorization errors for marketplace actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}
