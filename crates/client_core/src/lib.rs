use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{OrderId, OrderStatus},
    error::{ApiException, GENERIC_ERROR_MESSAGE},
    protocol::{DriverProfile, Order, OrdersEnvelope, UpdateOrderStatusRequest},
};
use thiserror::Error;
use tracing::info;
use url::Url;

pub mod auth;
pub mod order_list;

pub use order_list::{
    page_slice, EditorState, OrderListModel, StatusUpdate, HOME_PAGE_SIZE, ORDER_PAGE_SIZE,
};

/// Synchronous accessor for the current bearer credential. Refresh cadence
/// belongs to the surrounding shell, never to the gateway client.
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// Fixed token, for tests and one-shot tools.
pub struct StaticToken(pub String);

impl AccessTokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Explicit session object handed to every collaborator that needs the
/// credential; replaces ad-hoc reads from ambient storage.
#[derive(Default)]
pub struct SessionTokenStore {
    inner: RwLock<Option<SessionTokens>>,
}

impl SessionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, tokens: SessionTokens) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(tokens);
        }
    }

    pub fn set_access_token(&self, access_token: String) {
        if let Ok(mut guard) = self.inner.write() {
            if let Some(tokens) = guard.as_mut() {
                tokens.access_token = access_token;
            }
        }
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|tokens| tokens.refresh_token.clone()))
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }
}

impl AccessTokenProvider for SessionTokenStore {
    fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|tokens| tokens.access_token.clone()))
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("not logged in: missing access token")]
    MissingToken,
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    /// Message for the blocking failure dialog: the server-supplied error
    /// when there is one, the fixed fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Api(exception) => exception.message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// The driver-facing API surface the order views depend on.
#[async_trait]
pub trait DriverGateway: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError>;
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), GatewayError>;
    async fn driver_profile(&self) -> Result<DriverProfile, GatewayError>;
}

/// Authenticated HTTP client for the driver API. Every request carries
/// `Authorization: Bearer <accessToken>`; a missing token fails before any
/// network traffic. No retries, no request cancellation.
pub struct DriverApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn AccessTokenProvider>,
}

impl DriverApiClient {
    pub fn new(
        base_url: &str,
        session: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
            session,
        })
    }

    fn bearer(&self) -> Result<String, GatewayError> {
        self.session
            .access_token()
            .ok_or(GatewayError::MissingToken)
    }
}

#[async_trait]
impl DriverGateway for DriverApiClient {
    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(format!("{}/api/driver/orders", self.base_url))
            .bearer_auth(&token)
            .send()
            .await?;
        let envelope: OrdersEnvelope = ok_or_api_error(response).await?.json().await?;
        info!(count = envelope.data.len(), "orders: listing fetched");
        Ok(envelope.data)
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), GatewayError> {
        let token = self.bearer()?;
        let response = self
            .http
            .put(format!("{}/api/driver/order/{order_id}", self.base_url))
            .bearer_auth(&token)
            .json(&UpdateOrderStatusRequest { status })
            .send()
            .await?;
        ok_or_api_error(response).await?;
        info!(order_id = %order_id, status = %status, "orders: status updated");
        Ok(())
    }

    async fn driver_profile(&self) -> Result<DriverProfile, GatewayError> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(format!("{}/api/driver", self.base_url))
            .bearer_auth(&token)
            .send()
            .await?;
        Ok(ok_or_api_error(response).await?.json().await?)
    }
}

/// Resolves a non-success response into a tagged [`ApiException`], decoding
/// the server's `{ "errors": ... }` body when present.
pub(crate) async fn ok_or_api_error(
    response: reqwest::Response,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(ApiException::from_response(status.as_u16(), &body).into())
}

pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(base_url)?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
