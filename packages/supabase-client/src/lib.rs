//! Pure Supabase REST API client.
//!
//! A minimal client for a hosted Supabase project: PostgREST table queries,
//! remote procedure calls and email/password authentication. It knows nothing
//! about the application's tables.
//!
//! # Example
//!
//! ```rust,ignore
//! use supabase_client::SupabaseClient;
//!
//! let client = SupabaseClient::new("https://xyz.supabase.co", "anon-key");
//! client.auth().sign_in_with_password("me@example.com", "secret").await?;
//!
//! let rows: Vec<serde_json::Value> = client
//!     .table("products")
//!     .select("*")
//!     .eq("status", "approved")
//!     .fetch()
//!     .await?;
//! ```

pub mod auth;
pub mod error;
pub mod query;
pub mod types;

pub use auth::AuthApi;
pub use error::{Result, SupabaseError};
pub use query::{Operator, QueryBuilder};
pub use types::{AuthUser, Session, SignUpResponse};

use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder};
use serde::Serialize;

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            http: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Start a request against a table or view.
    pub fn table(&self, name: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, name)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Call a database function, discarding its result.
    pub async fn rpc<A: Serialize + ?Sized>(&self, function: &str, args: &A) -> Result<()> {
        tracing::debug!(function, "Calling remote procedure");
        let url = self.rest_url(&format!("rpc/{}", function));
        let req = self.request(Method::POST, &url).json(args);
        self.execute(req).await?;
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        match self.access_token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_access_token(&self, token: Option<String>) {
        match self.access_token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.url, path)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }

    /// Every request carries the project key; the bearer is the user's token when signed in.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self.access_token().unwrap_or_else(|| self.api_key.clone());
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    /// Send and return the body of a successful response.
    pub(crate) async fn execute(&self, req: RequestBuilder) -> Result<String> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let err = SupabaseError::from_response(resp).await;
            tracing::warn!(status = status.as_u16(), error = %err, "Supabase request failed");
            return Err(err);
        }
        Ok(resp.text().await?)
    }
}
