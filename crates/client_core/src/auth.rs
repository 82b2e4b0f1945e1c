//! Credential exchange against the auth endpoints. Token refresh scheduling
//! lives in the application shell; this client only performs the calls.

use reqwest::Client;
use shared::protocol::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RefreshResponse,
};
use tracing::info;

use crate::{normalize_base_url, ok_or_api_error, GatewayError, SessionTokens};

#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, GatewayError> {
        let response = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let body: LoginResponse = ok_or_api_error(response).await?.json().await?;
        info!("auth: login succeeded");
        Ok(SessionTokens {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
        })
    }

    /// Exchanges the refresh token for a fresh access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(format!("{}/api/auth/refresh", self.base_url))
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await?;
        let body: RefreshResponse = ok_or_api_error(response).await?.json().await?;
        Ok(body.access_token)
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(format!("{}/api/auth/logout", self.base_url))
            .json(&LogoutRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await?;
        ok_or_api_error(response).await?;
        info!("auth: logged out");
        Ok(())
    }
}
