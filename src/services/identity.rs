//! Client for the external identity service (`/api/auth/*`).

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::auth::{
    AckResponse, AuthResponse, CurrentUserResponse, ForgotPasswordRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest,
};

/// Failure to obtain a usable answer from the identity service.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed identity response: {0}")]
    Malformed(#[source] reqwest::Error),

    #[error("invalid identity url: {0}")]
    InvalidUrl(String),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    base_url: String,
}

impl IdentityClient {
    /// Build a client whose every request is bounded by the configured timeout.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.identity_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client setup failed: {e}")))?;
        Ok(Self {
            http,
            base_url: config.identity_api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode the JSON body regardless of status; the identity service
    /// reports failures as `{ ok: false, message }` on non-2xx responses too.
    async fn decode<T: DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, IdentityError> {
        let response = response.map_err(IdentityError::Transport)?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                IdentityError::Malformed(e)
            } else {
                IdentityError::Transport(e)
            }
        })
    }

    /// GET /api/auth/user
    pub async fn current_user(&self, token: &str) -> Result<CurrentUserResponse, IdentityError> {
        let response = self
            .http
            .get(self.url("/api/auth/user"))
            .bearer_auth(token)
            .send()
            .await;
        Self::decode(response).await
    }

    /// POST /api/auth/login
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthResponse, IdentityError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(body)
            .send()
            .await;
        Self::decode(response).await
    }

    /// POST /api/auth/register
    pub async fn register(&self, body: &RegisterRequest) -> Result<AuthResponse, IdentityError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(body)
            .send()
            .await;
        Self::decode(response).await
    }

    /// POST /api/auth/forgot-password
    pub async fn forgot_password(
        &self,
        body: &ForgotPasswordRequest,
    ) -> Result<AckResponse, IdentityError> {
        let response = self
            .http
            .post(self.url("/api/auth/forgot-password"))
            .json(body)
            .send()
            .await;
        Self::decode(response).await
    }

    /// PUT /api/auth/reset-password?token=
    pub async fn reset_password(
        &self,
        token: &str,
        body: &ResetPasswordRequest,
    ) -> Result<AckResponse, IdentityError> {
        let mut url = reqwest::Url::parse(&self.url("/api/auth/reset-password"))
            .map_err(|e| IdentityError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("token", token);
        let response = self.http.put(url).json(body).send().await;
        Self::decode(response).await
    }
}
