//! Commands queued from the UI thread to the backend worker.

use shared::domain::{OrderId, OrderStatus};

/// Which order listing a command or event belongs to. Both views share the
/// same view-model contract; they differ in page size and save behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardView {
    Home,
    Orders,
}

#[derive(Debug)]
pub enum BackendCommand {
    Login {
        email: String,
        password: String,
    },
    Logout,
    FetchOrders {
        view: DashboardView,
    },
    UpdateOrderStatus {
        view: DashboardView,
        order_id: OrderId,
        status: OrderStatus,
    },
    FetchProfile,
}
