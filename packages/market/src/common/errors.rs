//! Error kinds surfaced by marketplace operations.
//!
//! Remote failures are classified once, where the backend client is adapted
//! (`kernel::supabase`), so callers match on [`StoreError`] variants instead of
//! inspecting message text.

use thiserror::Error;

use super::auth::AuthError;
use crate::domains::listings::moderation::ModerationError;

pub type MarketResult<T> = std::result::Result<T, MarketError>;

/// Failure of a single remote data-store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing table has not been created on the backend.
    #[error("Table `{table}` does not exist")]
    TableMissing { table: String },

    #[error("Record not found")]
    NotFound,

    #[error("Not authorized by the data store")]
    Unauthorized,

    /// A row with the same key already exists.
    #[error("Conflicting record already exists")]
    Conflict,

    #[error("Remote call failed: {message}")]
    Remote { message: String },
}

impl StoreError {
    pub fn remote(message: impl Into<String>) -> Self {
        StoreError::Remote {
            message: message.into(),
        }
    }

    pub fn is_table_missing(&self) -> bool {
        matches!(self, StoreError::TableMissing { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict)
    }
}

/// Input rejected before any remote call is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum MarketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Moderation(#[from] ModerationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The identity provider refused the request (bad credentials, duplicate email...).
    #[error("Authentication failed: {0}")]
    Identity(String),
}

impl MarketError {
    /// The message shown to the end user; every failure ends the current operation.
    pub fn user_message(&self) -> String {
        match self {
            MarketError::Validation(ValidationError::MissingField(_)) => {
                "Veuillez remplir tous les champs obligatoires".to_string()
            }
            MarketError::Auth(AuthError::AuthenticationRequired) => {
                "Veuillez vous connecter pour continuer".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_has_blocking_user_message() {
        let err = MarketError::from(ValidationError::MissingField("location"));
        assert_eq!(err.to_string(), "Missing required field: location");
        assert_eq!(
            err.user_message(),
            "Veuillez remplir tous les champs obligatoires"
        );
    }

    #[test]
    fn store_errors_keep_their_kind() {
        let err = MarketError::from(StoreError::TableMissing {
            table: "users".to_string(),
        });
        assert!(matches!(err, MarketError::Store(ref e) if e.is_table_missing()));
        assert_eq!(err.user_message(), "Table `users` does not exist");
    }
}
