//! Sign-in, sign-out and the cached profile.

use reqwest::Method;
use tracing::info;

use docrepo_core::result::AppResult;
use docrepo_core::traits::store::USER_DATA_KEY;
use docrepo_entity::auth::{AuthResponse, SignInRequest};
use docrepo_entity::user::UserRecord;

use crate::client::ApiClient;

impl ApiClient {
    /// `POST /user/signin`.
    ///
    /// On success the token is persisted and attached to every later
    /// request, and the returned profile becomes the last-known user.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let body = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.send_json(Method::POST, "/user/signin", &body).await?;
        self.set_token(&response.token).await?;
        self.store_profile(&response.user).await?;
        info!(email, role = %response.user.role, "Signed in");
        Ok(response)
    }

    /// Forget the token and the cached profile. Purely local.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.clear_token().await?;
        self.store().remove(USER_DATA_KEY).await?;
        info!("Signed out");
        Ok(())
    }

    /// Last-known profile saved by sign-in or a profile update.
    pub async fn stored_profile(&self) -> AppResult<Option<UserRecord>> {
        match self.store().get(USER_DATA_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replace the last-known profile.
    pub async fn store_profile(&self, user: &UserRecord) -> AppResult<()> {
        let raw = serde_json::to_string(user)?;
        self.store().set(USER_DATA_KEY, &raw).await
    }
}
