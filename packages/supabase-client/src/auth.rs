use reqwest::Method;

use crate::error::{Result, SupabaseError};
use crate::types::{AuthUser, PasswordCredentials, Session, SignUpRequest, SignUpResponse};
use crate::SupabaseClient;

/// Email/password endpoints of the auth service.
///
/// Successful sign-in (and auto-confirmed sign-up) installs the session's
/// access token on the owning client so later table requests run as that user.
pub struct AuthApi<'a> {
    client: &'a SupabaseClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a SupabaseClient) -> Self {
        Self { client }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &serde_json::Value,
    ) -> Result<SignUpResponse> {
        tracing::info!(email, "Signing up");
        let body = SignUpRequest {
            email,
            password,
            data: metadata,
        };
        let req = self
            .client
            .request(Method::POST, &self.client.auth_url("signup"))
            .json(&body);
        let text = self.client.execute(req).await?;
        let resp: SignUpResponse = serde_json::from_str(&text)?;

        if let Some(session) = resp.session() {
            self.client
                .set_access_token(Some(session.access_token.clone()));
        }
        Ok(resp)
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        tracing::info!(email, "Signing in with password");
        let req = self
            .client
            .request(Method::POST, &self.client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password });
        let text = self.client.execute(req).await?;
        let session: Session = serde_json::from_str(&text)?;

        self.client
            .set_access_token(Some(session.access_token.clone()));
        Ok(session)
    }

    /// Revoke the current session. A client without a session is already signed out.
    pub async fn sign_out(&self) -> Result<()> {
        if self.client.access_token().is_none() {
            return Ok(());
        }
        let req = self
            .client
            .request(Method::POST, &self.client.auth_url("logout"));
        self.client.execute(req).await?;
        self.client.set_access_token(None);
        Ok(())
    }

    /// The identity behind the client's current access token.
    pub async fn get_user(&self) -> Result<AuthUser> {
        if self.client.access_token().is_none() {
            return Err(SupabaseError::Api {
                status: 401,
                code: Some("no_session".to_string()),
                message: "No active session".to_string(),
            });
        }
        let req = self.client.request(Method::GET, &self.client.auth_url("user"));
        let text = self.client.execute(req).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
