//! Login, registration and profile types.

use serde::{Deserialize, Serialize};

use super::role::{Role, VerificationStatus};

/// Body of `POST /auth/login/{role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

/// Account record as the API returns it.
///
/// The four role tables share `id`, `name` and `email`; the rest is
/// role-specific and therefore optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VerificationStatus>,
}

/// Fields every registration carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCommon {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Konsumen and petambak registrations also need an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentRegistration {
    #[serde(flatten)]
    pub common: RegisterCommon,
    pub address: String,
}

/// Logistik registrations describe the vehicle instead of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogistikRegistration {
    #[serde(flatten)]
    pub common: RegisterCommon,
    pub vehicle_type: String,
    pub license_plate: String,
}

/// Body of `POST /auth/register/{role}`, one variant per role.
///
/// Serialized untagged: the role travels in the path, the body carries only
/// the fields that role needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RegisterRequest {
    Admin(RegisterCommon),
    Petambak(ResidentRegistration),
    Logistik(LogistikRegistration),
    Konsumen(ResidentRegistration),
}

impl RegisterRequest {
    pub fn role(&self) -> Role {
        match self {
            RegisterRequest::Admin(_) => Role::Admin,
            RegisterRequest::Petambak(_) => Role::Petambak,
            RegisterRequest::Logistik(_) => Role::Logistik,
            RegisterRequest::Konsumen(_) => Role::Konsumen,
        }
    }

    pub fn common(&self) -> &RegisterCommon {
        match self {
            RegisterRequest::Admin(common) => common,
            RegisterRequest::Petambak(r) | RegisterRequest::Konsumen(r) => &r.common,
            RegisterRequest::Logistik(l) => &l.common,
        }
    }
}
