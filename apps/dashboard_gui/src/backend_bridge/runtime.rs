//! Backend worker: owns the tokio runtime, the session token store, and the
//! API clients. Commands come in over the crossbeam queue; outcomes go back
//! to the UI as [`UiEvent`]s.

use std::sync::Arc;
use std::time::Duration;

use client_core::{
    auth::AuthClient, AccessTokenProvider, DriverApiClient, DriverGateway, SessionTokenStore,
};
use crossbeam_channel::{Receiver, Sender};
use tracing::{info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Matches the access token lifetime minus a safety margin.
const TOKEN_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || run_worker(server_url, cmd_rx, ui_tx));
}

fn run_worker(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.send(UiEvent::BackendStartupFailed(err.to_string()));
            return;
        }
    };

    let session = Arc::new(SessionTokenStore::new());
    let auth = match AuthClient::new(&server_url) {
        Ok(auth) => auth,
        Err(err) => {
            let _ = ui_tx.send(UiEvent::BackendStartupFailed(format!(
                "invalid server url: {err}"
            )));
            return;
        }
    };
    let gateway = match DriverApiClient::new(
        &server_url,
        Arc::clone(&session) as Arc<dyn AccessTokenProvider>,
    ) {
        Ok(gateway) => gateway,
        Err(err) => {
            let _ = ui_tx.send(UiEvent::BackendStartupFailed(format!(
                "invalid server url: {err}"
            )));
            return;
        }
    };

    spawn_refresh_task(&runtime, Arc::clone(&session), auth.clone(), ui_tx.clone());

    for cmd in cmd_rx.iter() {
        runtime.block_on(handle_command(cmd, &session, &auth, &gateway, &ui_tx));
    }
    info!("backend worker shutting down");
}

/// Rotates the access token on a fixed cadence while a session is active. A
/// failed rotation invalidates the whole session.
fn spawn_refresh_task(
    runtime: &tokio::runtime::Runtime,
    session: Arc<SessionTokenStore>,
    auth: AuthClient,
    ui_tx: Sender<UiEvent>,
) {
    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(TOKEN_REFRESH_INTERVAL);
        // The first tick fires immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some(refresh_token) = session.refresh_token() else {
                continue;
            };
            match auth.refresh(&refresh_token).await {
                Ok(access_token) => {
                    session.set_access_token(access_token);
                    info!("auth: access token rotated");
                }
                Err(err) => {
                    warn!("auth: token rotation failed: {err}");
                    session.clear();
                    let _ = ui_tx.send(UiEvent::SessionExpired);
                }
            }
        }
    });
}

async fn handle_command(
    cmd: BackendCommand,
    session: &Arc<SessionTokenStore>,
    auth: &AuthClient,
    gateway: &DriverApiClient,
    ui_tx: &Sender<UiEvent>,
) {
    match cmd {
        BackendCommand::Login { email, password } => {
            match auth.login(&email, &password).await {
                Ok(tokens) => {
                    session.set(tokens);
                    let _ = ui_tx.send(UiEvent::LoginOk);
                }
                Err(err) => {
                    warn!("auth: login failed: {err}");
                    let _ = ui_tx.send(UiEvent::LoginFailed(err.user_message()));
                }
            }
        }
        BackendCommand::Logout => {
            if let Some(refresh_token) = session.refresh_token() {
                if let Err(err) = auth.logout(&refresh_token).await {
                    warn!("auth: logout call failed, dropping session anyway: {err}");
                }
            }
            session.clear();
            let _ = ui_tx.send(UiEvent::LoggedOut);
        }
        BackendCommand::FetchOrders { view } => match gateway.list_orders().await {
            Ok(orders) => {
                let _ = ui_tx.send(UiEvent::OrdersLoaded { view, orders });
            }
            Err(err) => {
                warn!("orders: listing failed: {err}");
                let _ = ui_tx.send(UiEvent::OrdersLoadFailed {
                    view,
                    message: err.user_message(),
                });
            }
        },
        BackendCommand::UpdateOrderStatus {
            view,
            order_id,
            status,
        } => match gateway.update_order_status(&order_id, status).await {
            Ok(()) => {
                let _ = ui_tx.send(UiEvent::OrderStatusUpdated {
                    view,
                    order_id,
                    status,
                });
            }
            Err(err) => {
                warn!(order_id = %order_id, "orders: status update failed: {err}");
                let _ = ui_tx.send(UiEvent::OrderStatusUpdateFailed {
                    view,
                    message: err.user_message(),
                });
            }
        },
        BackendCommand::FetchProfile => match gateway.driver_profile().await {
            Ok(profile) => {
                let _ = ui_tx.send(UiEvent::ProfileLoaded(profile));
            }
            Err(err) => {
                warn!("profile: fetch failed: {err}");
                let _ = ui_tx.send(UiEvent::ProfileLoadFailed(err.user_message()));
            }
        },
    }
}
