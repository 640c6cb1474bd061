//! Order, delivery and payment-handoff types.
//!
//! Orders are owned by the server. The client creates them, asks for a
//! payment redirect, and submits QR tokens; every status transition is
//! decided server-side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use super::auth::UserProfile;
use super::products::Product;

/// Order lifecycle as the client observes it.
///
/// `Pending → Paid → Processing → Shipped → Delivered → Completed`, with
/// `Pending → Cancelled` possible before payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Processing => write!(f, "PROCESSING"),
            OrderStatus::Shipped => write!(f, "SHIPPED"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    Delivered,
    Completed,
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Pending => write!(f, "PENDING"),
            DeliveryStatus::Assigned => write!(f, "ASSIGNED"),
            DeliveryStatus::PickedUp => write!(f, "PICKED_UP"),
            DeliveryStatus::Delivered => write!(f, "DELIVERED"),
            DeliveryStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// How the buyer receives the goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    LogisticPartner,
    SelfPickup,
}

impl DeliveryMethod {
    pub fn requires_address(self) -> bool {
        matches!(self, DeliveryMethod::LogisticPartner)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub produk_id: i64,
    pub qty_kg: Decimal,
    pub harga_per_kg: Decimal,
    pub subtotal: Decimal,
    #[serde(default, rename = "UdangProduk")]
    pub product: Option<Product>,
}

/// Shipment record linking an order to a logistics partner and its
/// pickup/receive QR tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub logistik_id: Option<i64>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub jarak_km: Option<Decimal>,
    #[serde(default)]
    pub biaya_logistik: Option<Decimal>,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub pickup_qr_token: Option<String>,
    #[serde(default)]
    pub receive_qr_token: Option<String>,
    #[serde(default, rename = "Order")]
    pub order: Option<Box<Order>>,
    #[serde(default, rename = "Logistik")]
    pub logistik: Option<UserProfile>,
}

/// Server-owned order. `total_harga` is the authoritative billed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub konsumen_id: i64,
    pub status: OrderStatus,
    pub total_harga: Decimal,
    #[serde(default)]
    pub total_jarak_km: Option<Decimal>,
    #[serde(default)]
    pub total_biaya_logistik: Option<Decimal>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, rename = "Konsumen")]
    pub konsumen: Option<UserProfile>,
    #[serde(default, rename = "OrderItems")]
    pub items: Vec<OrderItem>,
    #[serde(default, rename = "Delivery")]
    pub delivery: Option<Delivery>,
}

/// One line of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub produk_id: i64,
    pub qty: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order: Order,
}

/// Body of `POST /orders/payment/token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTokenRequest {
    #[serde(rename = "orderId")]
    pub order_id: i64,
}

/// Payment gateway handoff. A missing `redirect_url` means there is nothing
/// to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<Url>,
}

/// Body of the pickup and receive scan endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub qr_token: String,
}

/// Response of `GET /orders/{id}/qr`.
///
/// Petambak receive the pickup token with a rendered image; the full pair
/// is returned to parties allowed to see both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQr {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub pickup_qr: Option<String>,
    #[serde(default)]
    pub receive_qr: Option<String>,
}
