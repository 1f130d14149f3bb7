use thiserror::Error;

use crate::types::ErrorBody;

pub type Result<T> = std::result::Result<T, SupabaseError>;

/// Codes meaning the queried relation does not exist (Postgres and PostgREST flavours).
const RELATION_MISSING_CODES: &[&str] = &["42P01", "PGRST106", "PGRST205"];

/// Postgres `unique_violation`.
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// PostgREST code for "JSON object requested, multiple (or no) rows returned".
const SINGULAR_RESULT_CODE: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No rows returned")]
    NoRows,
}

impl SupabaseError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            SupabaseError::Api { status, .. } => Some(*status),
            SupabaseError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Machine-readable error code reported by the backend, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            SupabaseError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_relation_missing(&self) -> bool {
        self.code()
            .map(|code| RELATION_MISSING_CODES.contains(&code))
            .unwrap_or(false)
    }

    /// Insert rejected because the key already exists.
    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(UNIQUE_VIOLATION_CODE) || self.status() == Some(409)
    }

    pub(crate) async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Self::from_body(status, &body)
    }

    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
            return SupabaseError::Api {
                status,
                code: None,
                message: body.to_string(),
            };
        };

        let code = parsed.code();
        if code.as_deref() == Some(SINGULAR_RESULT_CODE) {
            return SupabaseError::NoRows;
        }

        SupabaseError::Api {
            status,
            code,
            message: parsed.message().unwrap_or(body).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_postgrest_error_body() {
        let err = SupabaseError::from_body(
            404,
            r#"{"code":"42P01","details":null,"hint":null,"message":"relation \"public.users\" does not exist"}"#,
        );

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.code(), Some("42P01"));
        assert!(err.is_relation_missing());
        assert!(err.to_string().contains("public.users"));
    }

    #[test]
    fn parses_gotrue_error_body() {
        let err = SupabaseError::from_body(
            400,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );

        assert_eq!(err.code(), Some("invalid_credentials"));
        assert!(!err.is_relation_missing());
        assert_eq!(err.to_string(), "API error (400): Invalid login credentials");
    }

    #[test]
    fn singular_result_code_maps_to_no_rows() {
        let err = SupabaseError::from_body(
            406,
            r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned"}"#,
        );
        assert!(matches!(err, SupabaseError::NoRows));
    }

    #[test]
    fn duplicate_key_is_a_unique_violation() {
        let err = SupabaseError::from_body(
            409,
            r#"{"code":"23505","details":"Key (id)=(1) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"users_pkey\""}"#,
        );
        assert!(err.is_unique_violation());
        assert!(!err.is_relation_missing());
    }

    #[test]
    fn unparseable_body_is_kept_verbatim() {
        let err = SupabaseError::from_body(502, "Bad Gateway");
        assert!(matches!(
            err,
            SupabaseError::Api { status: 502, code: None, ref message } if message == "Bad Gateway"
        ));
    }
}
