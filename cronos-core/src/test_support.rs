//! In-memory API, notifier and opener used by the unit tests.

use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use cronos_sdk::client::ClientError;
use cronos_sdk::objects::{
    Ack, ChatMessage, ConversationSummary, CreateOrderRequest, Delivery, DeliveryStatus, Order,
    OrderStatus, Participant, PaymentTokenResponse, Product, ProductStatus, Role,
    SendMessageRequest, UserProfile,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use url::Url;

use crate::api::{ChatApi, OrderApi};
use crate::checkout::RedirectOpener;
use crate::notify::{Notice, NoticeLevel, Notifier};

/// The signed-in user of every fake session.
pub(crate) const ME: Participant = Participant {
    id: 9,
    role: Role::Konsumen,
};

pub(crate) fn user(id: i64, name: &str) -> UserProfile {
    UserProfile {
        id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: None,
        phone: None,
        address: None,
        latitude: None,
        longitude: None,
        vehicle_type: None,
        license_plate: None,
        profile_photo: None,
        status: None,
    }
}

pub(crate) fn product(id: i64, price_per_kg: i64, stock_kg: &str) -> Product {
    Product {
        id,
        batch_id: 1,
        jenis_udang: "Vaname".into(),
        grade: "A".into(),
        harga_per_kg: Decimal::from(price_per_kg),
        stok_kg: Decimal::from_str(stock_kg).unwrap(),
        status: ProductStatus::Available,
        batch: None,
    }
}

pub(crate) fn delivery(id: i64, order_id: i64, status: DeliveryStatus) -> Delivery {
    Delivery {
        id,
        order_id,
        logistik_id: Some(4),
        vehicle_id: None,
        jarak_km: None,
        biaya_logistik: None,
        status,
        pickup_qr_token: None,
        receive_qr_token: None,
        order: None,
        logistik: None,
    }
}

pub(crate) fn order(id: i64, status: OrderStatus, with_delivery: bool) -> Order {
    Order {
        id,
        konsumen_id: ME.id,
        status,
        total_harga: Decimal::from(116_000),
        total_jarak_km: None,
        total_biaya_logistik: None,
        created_at: None,
        konsumen: None,
        items: Vec::new(),
        delivery: with_delivery.then(|| delivery(id + 100, id, DeliveryStatus::PickedUp)),
    }
}

pub(crate) fn message(id: i64, from: Participant, to: Participant) -> ChatMessage {
    ChatMessage {
        id,
        sender_id: from.id,
        sender_role: from.role,
        receiver_id: to.id,
        receiver_role: to.role,
        content: format!("pesan {id}"),
        is_read: false,
        created_at: OffsetDateTime::UNIX_EPOCH + Duration::seconds(id),
    }
}

pub(crate) fn conversation(with: Participant, unread: u32) -> ConversationSummary {
    ConversationSummary {
        counterpart_id: with.id,
        counterpart_role: with.role,
        display_name: with.room(),
        last_message_preview: String::new(),
        time: None,
        unread_count: unread,
    }
}

fn unauthorized() -> ClientError {
    ClientError::Api {
        status: StatusCode::UNAUTHORIZED,
        message: Some("Token tidak valid".to_owned()),
        body: r#"{"message":"Token tidak valid"}"#.to_owned(),
    }
}

fn rejected(message: &str) -> ClientError {
    ClientError::Api {
        status: StatusCode::BAD_REQUEST,
        message: Some(message.to_owned()),
        body: format!(r#"{{"message":"{message}"}}"#),
    }
}

/// Scriptable stand-in for the CRONOS API. Records every call as
/// `name[:argument]`.
#[derive(Default)]
pub(crate) struct FakeApi {
    calls: Mutex<Vec<String>>,
    created_order: Option<Order>,
    create_error: Option<String>,
    payment_fails: bool,
    redirect: Option<Url>,
    scan_error: Option<String>,
    token_rejected: bool,
    orders: Mutex<Vec<Order>>,
    deliveries: Vec<Delivery>,
    conversations: Vec<ConversationSummary>,
    thread: Vec<ChatMessage>,
    last_order_request: Mutex<Option<CreateOrderRequest>>,
}

impl FakeApi {
    pub(crate) fn with_created_order(mut self, order: Order) -> Self {
        self.created_order = Some(order);
        self
    }

    pub(crate) fn failing_create(mut self, message: &str) -> Self {
        self.create_error = Some(message.to_owned());
        self
    }

    pub(crate) fn failing_payment(mut self) -> Self {
        self.payment_fails = true;
        self
    }

    pub(crate) fn with_redirect(mut self, url: Url) -> Self {
        self.redirect = Some(url);
        self
    }

    pub(crate) fn failing_scan(mut self, message: &str) -> Self {
        self.scan_error = Some(message.to_owned());
        self
    }

    /// Every chat call answers 401.
    pub(crate) fn rejecting_token(mut self) -> Self {
        self.token_rejected = true;
        self
    }

    pub(crate) fn with_orders(self, orders: Vec<Order>) -> Self {
        self.set_orders(orders);
        self
    }

    pub(crate) fn set_orders(&self, orders: Vec<Order>) {
        *self.orders.lock().unwrap() = orders;
    }

    pub(crate) fn with_deliveries(mut self, deliveries: Vec<Delivery>) -> Self {
        self.deliveries = deliveries;
        self
    }

    pub(crate) fn with_conversations(mut self, conversations: Vec<ConversationSummary>) -> Self {
        self.conversations = conversations;
        self
    }

    pub(crate) fn with_thread(mut self, thread: Vec<ChatMessage>) -> Self {
        self.thread = thread;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_order_request(&self) -> Option<CreateOrderRequest> {
        self.last_order_request.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl OrderApi for FakeApi {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError> {
        self.record("create_order");
        *self.last_order_request.lock().unwrap() = Some(request.clone());
        if let Some(message) = &self.create_error {
            return Err(rejected(message));
        }
        Ok(self
            .created_order
            .clone()
            .unwrap_or_else(|| order(1, OrderStatus::Pending, false)))
    }

    async fn payment_token(&self, order_id: i64) -> Result<PaymentTokenResponse, ClientError> {
        self.record(format!("payment_token:{order_id}"));
        if self.payment_fails {
            return Err(ClientError::Api {
                status: StatusCode::BAD_GATEWAY,
                message: None,
                body: String::new(),
            });
        }
        Ok(PaymentTokenResponse {
            token: Some("snap-token".into()),
            redirect_url: self.redirect.clone(),
        })
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.record("my_orders");
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn scan_receive(&self, qr_token: &str) -> Result<Ack, ClientError> {
        self.record(format!("scan_receive:{qr_token}"));
        match &self.scan_error {
            Some(message) => Err(rejected(message)),
            None => Ok(Ack::default()),
        }
    }

    async fn scan_pickup(&self, qr_token: &str) -> Result<Ack, ClientError> {
        self.record(format!("scan_pickup:{qr_token}"));
        match &self.scan_error {
            Some(message) => Err(rejected(message)),
            None => Ok(Ack::default()),
        }
    }

    async fn available_deliveries(&self) -> Result<Vec<Delivery>, ClientError> {
        self.record("available_deliveries");
        Ok(self.deliveries.clone())
    }

    async fn my_deliveries(&self) -> Result<Vec<Delivery>, ClientError> {
        self.record("my_deliveries");
        Ok(self.deliveries.clone())
    }
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        self.record("conversations");
        if self.token_rejected {
            return Err(unauthorized());
        }
        Ok(self.conversations.clone())
    }

    async fn messages_with(
        &self,
        counterpart: Participant,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.record(format!("messages_with:{}", counterpart.room()));
        if self.token_rejected {
            return Err(unauthorized());
        }
        Ok(self.thread.clone())
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<ChatMessage, ClientError> {
        let to = Participant::new(request.receiver_role, request.receiver_id);
        self.record(format!("send_message:{}", to.room()));
        if self.token_rejected {
            return Err(unauthorized());
        }
        let mut sent = message(1000, ME, to);
        sent.content = request.content.clone();
        Ok(sent)
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub(crate) fn texts(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.text.clone())
            .collect()
    }

    pub(crate) fn count(&self, level: NoticeLevel) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub(crate) struct RecordingOpener {
    opened: Mutex<Vec<Url>>,
}

impl RecordingOpener {
    pub(crate) fn opened(&self) -> Vec<Url> {
        self.opened.lock().unwrap().clone()
    }
}

impl RedirectOpener for RecordingOpener {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.clone());
        Ok(())
    }
}
