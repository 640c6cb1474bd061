pub mod admin;
pub mod auth;
pub mod chat;
pub mod orders;
pub mod products;
pub mod role;
pub mod tambak;
pub mod wallet;
pub mod ws;

pub use admin::{
    ChangeRequest, ChangeRequestAction, ChangeRequestStatus, LogistikPriceUpdate, PendingUser,
    VerifyAction, VerifyUserRequest,
};
pub use auth::{
    AuthResponse, LoginRequest, LogistikRegistration, RegisterCommon, RegisterRequest,
    ResidentRegistration, UserProfile,
};
pub use chat::{ChatMessage, ConversationSummary, SendMessageRequest};
pub use orders::{
    CreateOrderRequest, CreateOrderResponse, Delivery, DeliveryMethod, DeliveryStatus, Order,
    OrderItem, OrderItemRequest, OrderQr, OrderStatus, PaymentTokenRequest, PaymentTokenResponse,
    ScanRequest,
};
pub use products::{
    Integrity, NewProduct, Product, ProductQuery, ProductStatus, ProductUpdateRequest, TraceResult,
    TraceStage, TraceTambak,
};
pub use role::{Participant, Role, UnknownRole, VerificationStatus};
pub use tambak::{BatchUdang, HarvestUpdate, NewBatch, NewTambak, Tambak};
pub use wallet::{
    NewWithdrawal, OwnerType, ProcessWithdrawal, TransactionSource, TransactionType, Wallet,
    WalletTransaction, WithdrawAction, WithdrawStatus, Withdrawal,
};
pub use ws::{SocketClientFrame, SocketServerFrame};

use serde::{Deserialize, Serialize};

/// Generic acknowledgement body returned by action endpoints.
///
/// The server answers scans, verification and change-request actions with
/// an object that usually carries only a human readable `message`; any
/// other fields are ignored. An empty body decodes to the default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the API attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
