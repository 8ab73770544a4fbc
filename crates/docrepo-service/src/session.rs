//! Signed-in user state.

use tracing::info;

use docrepo_client::ApiClient;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_entity::user::UserRecord;

/// The signed-in user and the client acting for them.
///
/// Created by [`restore`](Self::restore) from the session store, so a
/// token and profile saved by an earlier process are picked up.
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
    user: Option<UserRecord>,
}

impl Session {
    /// Restore the last-known profile. Without a token there is no user,
    /// whatever the store holds.
    pub async fn restore(client: ApiClient) -> AppResult<Self> {
        let user = if client.is_authenticated().await {
            client.stored_profile().await?
        } else {
            None
        };
        Ok(Self { client, user })
    }

    /// The client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Last-known profile.
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    /// The profile, or an authentication error when signed out.
    pub fn require_user(&self) -> AppResult<&UserRecord> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::authentication("Not signed in; run `docrepo auth signin`"))
    }

    /// Whether the signed-in user is an admin.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserRecord::is_admin)
    }

    /// Sign in and keep the returned profile.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AppResult<&UserRecord> {
        let response = self.client.sign_in(email.trim(), password).await?;
        info!(email = %response.user.email, "Signed in");
        Ok(self.user.insert(response.user))
    }

    /// Forget the token and profile.
    pub async fn sign_out(&mut self) -> AppResult<()> {
        self.client.sign_out().await?;
        self.user = None;
        info!("Signed out");
        Ok(())
    }

    /// Change the display name and refresh the stored profile.
    pub async fn update_profile(&mut self, fullname: &str) -> AppResult<&UserRecord> {
        let fullname = fullname.trim();
        if fullname.is_empty() {
            return Err(AppError::validation("Full name cannot be empty"));
        }
        let email = self.require_user()?.email.clone();
        let user = self.client.update_user(&email, fullname).await?;
        Ok(self.user.insert(user))
    }

    /// Fetch the profile from the server and store it.
    pub async fn reload_profile(&mut self) -> AppResult<&UserRecord> {
        let email = self.require_user()?.email.clone();
        let user = self.client.user_details(&email).await?;
        self.client.store_profile(&user).await?;
        Ok(self.user.insert(user))
    }

    /// Change the password of the signed-in user.
    pub async fn change_password(&self, current: &str, new: &str) -> AppResult<()> {
        if new.is_empty() {
            return Err(AppError::validation("New password cannot be empty"));
        }
        let email = &self.require_user()?.email;
        self.client.change_password(email, current, new).await?;
        info!(email = %email, "Password changed");
        Ok(())
    }
}
