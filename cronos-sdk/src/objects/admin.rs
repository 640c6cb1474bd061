//! Admin verification and change-request types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::role::{Role, VerificationStatus};

// ---------------------------------------------------------------------------
// User verification
// ---------------------------------------------------------------------------

/// An account waiting for admin approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: Option<VerificationStatus>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyAction {
    Approve,
    Reject,
}

/// Body of `POST /admin/verify-user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyUserRequest {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub role: Role,
    pub action: VerifyAction,
}

// ---------------------------------------------------------------------------
// Change requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A petambak product update or logistik price update awaiting review.
///
/// The proposed values are kept as raw JSON since their shape depends on
/// what is being changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: i64,
    #[serde(default)]
    pub requester_role: Option<Role>,
    #[serde(default)]
    pub requester_id: Option<i64>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub status: ChangeRequestStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// Path segment of `POST /admin/change-requests/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeRequestAction {
    Approve,
    Reject,
}

impl ChangeRequestAction {
    pub fn as_path(self) -> &'static str {
        match self {
            ChangeRequestAction::Approve => "approve",
            ChangeRequestAction::Reject => "reject",
        }
    }
}

/// Body of `POST /logistik/request-price-update`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogistikPriceUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost_per_km: Decimal,
}
