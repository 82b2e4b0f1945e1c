use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{OrderId, OrderStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaundryPartner {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaundryPackage {
    pub name: String,
}

/// A laundry pickup/delivery request as returned by the API. Everything but
/// `status` is immutable from the client's perspective; row order within a
/// listing is the API response order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub laundry_partner: LaundryPartner,
    pub package: LaundryPackage,
}

/// Envelope of `GET /api/driver/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersEnvelope {
    pub data: Vec<Order>,
}

/// Body of `PUT /api/driver/order/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_order_with_missing_coupon() {
        let raw = r#"{
            "id": "ord-1",
            "status": "penjemputan",
            "created_at": "2024-03-04T08:00:00Z",
            "customer": {
                "name": "Budi",
                "email": "budi@example.com",
                "telephone": "0812",
                "address": "Jl. Kenanga 1"
            },
            "laundry_partner": { "name": "Cuci Kilat" },
            "package": { "name": "Reguler" }
        }"#;
        let order: Order = serde_json::from_str(raw).expect("decode");
        assert_eq!(order.id.as_str(), "ord-1");
        assert_eq!(order.status, OrderStatus::Penjemputan);
        assert!(order.coupon_code.is_none());
    }

    #[test]
    fn update_request_serializes_bare_status_field() {
        let body = UpdateOrderStatusRequest {
            status: OrderStatus::Selesai,
        };
        assert_eq!(
            serde_json::to_string(&body).expect("serialize"),
            r#"{"status":"selesai"}"#
        );
    }
}
