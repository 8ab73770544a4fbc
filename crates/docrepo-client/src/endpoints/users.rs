//! Profile and usage-tracking endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use docrepo_core::result::AppResult;
use docrepo_entity::auth::{MessageResponse, UserResponse};
use docrepo_entity::user::UserRecord;

use crate::client::ApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserBody<'a> {
    email: &'a str,
    fullname: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordBody<'a> {
    email: &'a str,
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentViewedBody<'a> {
    user_email: &'a str,
    document_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTimeBody<'a> {
    user_email: &'a str,
    time_spent: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecentDocumentBody<'a> {
    user_email: &'a str,
    document: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentDocumentsResponse {
    #[serde(default)]
    recent_documents: Vec<String>,
}

impl ApiClient {
    /// `GET /user/userDetails?userEmail=`.
    pub async fn user_details(&self, email: &str) -> AppResult<UserRecord> {
        let response: UserResponse = self
            .get_with_query("/user/userDetails", &[("userEmail", email)])
            .await?;
        Ok(response.user)
    }

    /// `PUT /user/user`; also refreshes the cached profile.
    pub async fn update_user(&self, email: &str, fullname: &str) -> AppResult<UserRecord> {
        let response: UserResponse = self
            .send_json(Method::PUT, "/user/user", &UpdateUserBody { email, fullname })
            .await?;
        self.store_profile(&response.user).await?;
        Ok(response.user)
    }

    /// `PUT /user/changePassword`.
    pub async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<MessageResponse> {
        let body = ChangePasswordBody {
            email,
            current_password,
            new_password,
        };
        self.send_json(Method::PUT, "/user/changePassword", &body)
            .await
    }

    /// `POST /user/documentViewed`.
    pub async fn document_viewed(&self, user_email: &str, document_id: &str) -> AppResult<()> {
        let _: MessageResponse = self
            .send_json(
                Method::POST,
                "/user/documentViewed",
                &DocumentViewedBody {
                    user_email,
                    document_id,
                },
            )
            .await?;
        Ok(())
    }

    /// `POST /user/updateTime`.
    pub async fn update_time(&self, user_email: &str, time_spent: u64) -> AppResult<()> {
        let _: MessageResponse = self
            .send_json(
                Method::POST,
                "/user/updateTime",
                &UpdateTimeBody {
                    user_email,
                    time_spent,
                },
            )
            .await?;
        Ok(())
    }

    /// `GET /user/recent-documents?userEmail=`.
    pub async fn recent_documents(&self, user_email: &str) -> AppResult<Vec<String>> {
        let response: RecentDocumentsResponse = self
            .get_with_query("/user/recent-documents", &[("userEmail", user_email)])
            .await?;
        Ok(response.recent_documents)
    }

    /// `POST /user/recent-documents`.
    pub async fn add_recent_document(&self, user_email: &str, document: &str) -> AppResult<Vec<String>> {
        let response: RecentDocumentsResponse = self
            .send_json(
                Method::POST,
                "/user/recent-documents",
                &RecentDocumentBody {
                    user_email,
                    document,
                },
            )
            .await?;
        Ok(response.recent_documents)
    }
}
