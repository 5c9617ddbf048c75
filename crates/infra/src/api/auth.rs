//! Authentication endpoints
//!
//! Login, the "who am I" lookup, explicit token refresh, logout,
//! registration and profile edits. Session writes go through
//! [`ApiClient::set_session`] so the store only ever sees whole sessions.

use std::sync::Arc;

use courseportal_domain::constants::{
    CURRENT_USER_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, REFRESH_ENDPOINT, REGISTER_ENDPOINT,
};
use courseportal_domain::{ProfileUpdate, RegisterRequest, RegisterResponse, Session, TokenPair, UserInfo};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::client::{ApiClient, RequestBody, RequestOptions};
use super::errors::ApiError;
use super::multipart::{attach_file, text_form};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenBody<'a> {
    access_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// Authentication operations
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair
    ///
    /// Does not store anything; see [`AuthApi::sign_in`].
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for blank fields (no request is sent);
    /// [`ApiError::Server`] for rejected credentials.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(ApiError::Validation("username and password are required".to_string()));
        }

        self.client.post(LOGIN_ENDPOINT, &LoginRequest { username, password }).await
    }

    /// Fetch the profile that belongs to `access_token`
    #[instrument(skip_all)]
    pub async fn current_user(&self, access_token: &str) -> Result<UserInfo, ApiError> {
        self.client
            .request(
                Method::POST,
                CURRENT_USER_ENDPOINT,
                RequestBody::json(&AccessTokenBody { access_token })?,
                RequestOptions::raw(),
            )
            .await
    }

    /// Log in, store the tokens, then cache the user profile
    ///
    /// # Errors
    ///
    /// If the profile lookup fails the tokens stay stored and the lookup
    /// error is returned.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let tokens = self.login(username, password).await?;
        let access_token = tokens.access_token.clone();
        let mut session = self.client.set_session(tokens, None).await?;

        let user = self.current_user(&access_token).await?;
        self.client.update_cached_user(user.clone()).await?;

        info!(user_id = user.id, role = user.role.as_deref().unwrap_or("unknown"), "signed in");
        session.user = Some(user);
        Ok(session)
    }

    /// Renew the access token with the stored refresh token
    ///
    /// The refresh token and cached user are kept.
    ///
    /// # Errors
    ///
    /// [`ApiError::AuthExpired`] without a request when nobody is signed in.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Session, ApiError> {
        let Some(current) = self.client.current_session().await? else {
            return Err(ApiError::AuthExpired {
                status_code: StatusCode::UNAUTHORIZED.as_u16(),
                message: "not signed in".to_string(),
            });
        };

        let refreshed: RefreshResponse = self
            .client
            .post(REFRESH_ENDPOINT, &RefreshBody { refresh_token: &current.refresh_token })
            .await?;

        let tokens = TokenPair::new(refreshed.access_token, current.refresh_token);
        let session = self.client.set_session(tokens, current.user).await?;
        info!("access token refreshed");
        Ok(session)
    }

    /// Sign out on the server, then locally
    ///
    /// The local session is cleared even when the server call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        if let Some(session) = self.client.current_session().await? {
            let body = RequestBody::json(&AccessTokenBody { access_token: &session.access_token })?;
            let result: Result<Value, ApiError> = self
                .client
                .request(Method::POST, LOGOUT_ENDPOINT, body, RequestOptions::raw())
                .await;
            if let Err(err) = result {
                warn!(error = %err, "server-side logout failed; clearing local session anyway");
            }
        }

        self.client.sign_out().await
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        request.validate()?;

        self.client
            .request(
                Method::POST,
                REGISTER_ENDPOINT,
                RequestBody::json(request)?,
                RequestOptions::new().accept_status(StatusCode::CREATED.as_u16()),
            )
            .await
    }

    /// Submit a profile edit and refresh the cached user
    #[instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserInfo, ApiError> {
        let mut form = text_form(update.text_fields());
        if let Some(avatar) = &update.avatar {
            form = attach_file(form, "avatar", avatar)?;
        }

        let user: UserInfo = self
            .client
            .request(
                Method::PATCH,
                CURRENT_USER_ENDPOINT,
                RequestBody::Multipart(form),
                RequestOptions::raw(),
            )
            .await?;

        self.client.update_cached_user(user.clone()).await?;
        Ok(user)
    }
}
