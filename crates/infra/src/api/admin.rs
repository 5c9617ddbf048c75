//! Admin user management endpoints

use std::sync::Arc;

use courseportal_domain::{RegisterRequest, RegisterResponse, UserInfo};
use reqwest::{Method, StatusCode};
use tracing::instrument;

use super::client::{ApiClient, RequestBody, RequestOptions};
use super::errors::ApiError;
use super::multipart::text_form;

pub struct AdminUserApi {
    client: Arc<ApiClient>,
}

impl AdminUserApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All users; this route answers without an envelope
    pub async fn list(&self) -> Result<Vec<UserInfo>, ApiError> {
        self.client
            .request(Method::GET, "/admin/users", RequestBody::Empty, RequestOptions::raw())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: i64) -> Result<UserInfo, ApiError> {
        self.client.get(&format!("/admin/user/{user_id}")).await
    }

    /// Create an account as multipart form data
    ///
    /// The form repeats the password as `confirmPassword`, which the
    /// backend checks.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        request.validate()?;

        let mut fields = vec![
            ("username", request.username.trim().to_string()),
            ("email", request.email.trim().to_string()),
            ("password", request.password.clone()),
            ("confirmPassword", request.password.clone()),
        ];
        if let Some(fullname) = &request.fullname {
            fields.push(("fullname", fullname.clone()));
        }
        if let Some(phone) = &request.phone {
            fields.push(("phone", phone.clone()));
        }

        self.client
            .request(
                Method::POST,
                "/admin/users",
                RequestBody::Multipart(text_form(fields)),
                RequestOptions::new().accept_status(StatusCode::CREATED.as_u16()),
            )
            .await
    }
}
