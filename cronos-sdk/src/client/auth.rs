//! `/auth` endpoints.

use super::{ClientError, CronosClient};
use crate::objects::{AuthResponse, LoginRequest, RegisterRequest, Role, UserProfile};

impl CronosClient {
    /// `POST /auth/login/{role}` – exchange credentials for a session token.
    ///
    /// Does not store the token; callers decide where the session lives.
    pub async fn login(
        &self,
        role: Role,
        credentials: &LoginRequest,
    ) -> Result<AuthResponse, ClientError> {
        self.post_json(&format!("auth/login/{role}"), credentials)
            .await
    }

    /// `POST /auth/register/{role}` – create an account. The role is taken
    /// from the request variant.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        self.post_json(&format!("auth/register/{}", request.role()), request)
            .await
    }

    /// `GET /auth/profile` – the account behind the current token.
    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.get_json("auth/profile").await
    }
}
