//! Network seams of the client core.
//!
//! Components that run multi-step flows talk to the server through these
//! traits instead of [`CronosClient`] directly, so they can be driven by an
//! in-memory implementation in tests. [`CronosClient`] implements all of
//! them by delegating to its endpoint methods.

use async_trait::async_trait;
use cronos_sdk::client::{ClientError, CronosClient};
use cronos_sdk::objects::{
    Ack, ChatMessage, ConversationSummary, CreateOrderRequest, Delivery, Order, Participant,
    PaymentTokenResponse, SendMessageRequest,
};

/// Order, payment and delivery-scan endpoints.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// `POST /orders`, returning the created order.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError>;

    /// `POST /orders/payment/token`.
    async fn payment_token(&self, order_id: i64) -> Result<PaymentTokenResponse, ClientError>;

    async fn my_orders(&self) -> Result<Vec<Order>, ClientError>;

    async fn scan_receive(&self, qr_token: &str) -> Result<Ack, ClientError>;

    async fn scan_pickup(&self, qr_token: &str) -> Result<Ack, ClientError>;

    async fn available_deliveries(&self) -> Result<Vec<Delivery>, ClientError>;

    async fn my_deliveries(&self) -> Result<Vec<Delivery>, ClientError>;
}

/// Chat REST endpoints. The realtime push side is a socket, not part of
/// this trait.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn conversations(&self) -> Result<Vec<ConversationSummary>, ClientError>;

    async fn messages_with(&self, counterpart: Participant)
    -> Result<Vec<ChatMessage>, ClientError>;

    async fn send_message(&self, request: &SendMessageRequest) -> Result<ChatMessage, ClientError>;
}

#[async_trait]
impl OrderApi for CronosClient {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError> {
        let created = CronosClient::create_order(self, request).await?;
        Ok(created.order)
    }

    async fn payment_token(&self, order_id: i64) -> Result<PaymentTokenResponse, ClientError> {
        CronosClient::payment_token(self, order_id).await
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        CronosClient::my_orders(self).await
    }

    async fn scan_receive(&self, qr_token: &str) -> Result<Ack, ClientError> {
        CronosClient::scan_receive(self, qr_token).await
    }

    async fn scan_pickup(&self, qr_token: &str) -> Result<Ack, ClientError> {
        CronosClient::scan_pickup(self, qr_token).await
    }

    async fn available_deliveries(&self) -> Result<Vec<Delivery>, ClientError> {
        CronosClient::available_deliveries(self).await
    }

    async fn my_deliveries(&self) -> Result<Vec<Delivery>, ClientError> {
        CronosClient::my_deliveries(self).await
    }
}

#[async_trait]
impl ChatApi for CronosClient {
    async fn conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        CronosClient::conversations(self).await
    }

    async fn messages_with(
        &self,
        counterpart: Participant,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        CronosClient::messages_with(self, counterpart).await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<ChatMessage, ClientError> {
        CronosClient::send_message(self, request).await
    }
}
