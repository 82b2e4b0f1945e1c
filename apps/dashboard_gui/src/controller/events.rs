//! Events flowing from the backend worker to the UI thread.

use shared::domain::{OrderId, OrderStatus};
use shared::protocol::{DriverProfile, Order};

use crate::backend_bridge::commands::DashboardView;

#[derive(Debug)]
pub enum UiEvent {
    BackendStartupFailed(String),
    LoginOk,
    LoginFailed(String),
    LoggedOut,
    /// Token rotation failed; the stored session is gone.
    SessionExpired,
    OrdersLoaded {
        view: DashboardView,
        orders: Vec<Order>,
    },
    OrdersLoadFailed {
        view: DashboardView,
        message: String,
    },
    OrderStatusUpdated {
        view: DashboardView,
        order_id: OrderId,
        status: OrderStatus,
    },
    OrderStatusUpdateFailed {
        view: DashboardView,
        message: String,
    },
    ProfileLoaded(DriverProfile),
    ProfileLoadFailed(String),
}
