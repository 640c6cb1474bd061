//! `/orders` endpoints: checkout, payment handoff, deliveries and QR scans.

use super::{ClientError, CronosClient};
use crate::objects::{
    Ack, CreateOrderRequest, CreateOrderResponse, Delivery, Order, OrderQr, PaymentTokenRequest,
    PaymentTokenResponse, ScanRequest,
};

impl CronosClient {
    /// `POST /orders` – submit a cart as a new `PENDING` order.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ClientError> {
        self.post_json("orders", request).await
    }

    /// `POST /orders/payment/token` – request a payment gateway redirect
    /// for a pending order.
    pub async fn payment_token(&self, order_id: i64) -> Result<PaymentTokenResponse, ClientError> {
        self.post_json("orders/payment/token", &PaymentTokenRequest { order_id })
            .await
    }

    /// `GET /orders/my` – orders placed by the signed-in konsumen.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("orders/my").await
    }

    /// `GET /orders/petambak` – orders containing the petambak's products.
    pub async fn petambak_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("orders/petambak").await
    }

    /// `GET /orders/{id}/qr`
    pub async fn order_qr(&self, order_id: i64) -> Result<OrderQr, ClientError> {
        self.get_json(&format!("orders/{order_id}/qr")).await
    }

    /// `GET /orders/deliveries/available` – deliveries a logistik may take.
    pub async fn available_deliveries(&self) -> Result<Vec<Delivery>, ClientError> {
        self.get_json("orders/deliveries/available").await
    }

    /// `GET /orders/deliveries/my` – deliveries assigned to the logistik.
    pub async fn my_deliveries(&self) -> Result<Vec<Delivery>, ClientError> {
        self.get_json("orders/deliveries/my").await
    }

    /// `POST /orders/scan/pickup` – logistik confirms taking the goods.
    pub async fn scan_pickup(&self, qr_token: &str) -> Result<Ack, ClientError> {
        let body = ScanRequest {
            qr_token: qr_token.to_owned(),
        };
        self.post_for_ack("orders/scan/pickup", Some(&body)).await
    }

    /// `POST /orders/scan/receive` – konsumen confirms receipt.
    pub async fn scan_receive(&self, qr_token: &str) -> Result<Ack, ClientError> {
        let body = ScanRequest {
            qr_token: qr_token.to_owned(),
        };
        self.post_for_ack("orders/scan/receive", Some(&body)).await
    }
}
