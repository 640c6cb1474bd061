use serde::{Deserialize, Serialize};

/// Marketplace roles. Every account belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Shrimp farmer, owns tambak and batches.
    Petambak,
    /// Logistics partner, owns deliveries.
    Logistik,
    /// Consumer, places orders.
    Konsumen,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Petambak, Role::Logistik, Role::Konsumen];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Petambak => "petambak",
            Role::Logistik => "logistik",
            Role::Konsumen => "konsumen",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// Account verification state set by the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A user addressed by `(role, id)`.
///
/// Ids are only unique within a role, so chat routing and room names always
/// carry both halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub role: Role,
}

impl Participant {
    pub fn new(role: Role, id: i64) -> Self {
        Self { id, role }
    }

    /// Realtime room this participant listens on, `{role}_{id}`.
    pub fn room(&self) -> String {
        format!("{}_{}", self.role, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("Konsumen".parse::<Role>().unwrap(), Role::Konsumen);
        assert_eq!("LOGISTIK".parse::<Role>().unwrap(), Role::Logistik);
        assert!("kurir".parse::<Role>().is_err());
    }

    #[test]
    fn test_room_name() {
        assert_eq!(Participant::new(Role::Petambak, 3).room(), "petambak_3");
    }
}
