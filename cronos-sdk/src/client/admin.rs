//! Admin-only endpoints plus the logistik price proposal that admins review.

use super::{ClientError, CronosClient};
use crate::objects::{
    Ack, ChangeRequest, ChangeRequestAction, LogistikPriceUpdate, PendingUser, VerifyUserRequest,
};

impl CronosClient {
    /// `GET /admin/pending-users`
    pub async fn pending_users(&self) -> Result<Vec<PendingUser>, ClientError> {
        self.get_json("admin/pending-users").await
    }

    /// `POST /admin/verify-user`
    pub async fn verify_user(&self, request: &VerifyUserRequest) -> Result<Ack, ClientError> {
        self.post_for_ack("admin/verify-user", Some(request)).await
    }

    /// `GET /admin/change-requests`
    pub async fn change_requests(&self) -> Result<Vec<ChangeRequest>, ClientError> {
        self.get_json("admin/change-requests").await
    }

    /// `POST /admin/change-requests/{id}/{action}`
    pub async fn process_change_request(
        &self,
        request_id: i64,
        action: ChangeRequestAction,
    ) -> Result<Ack, ClientError> {
        self.post_for_ack::<()>(
            &format!("admin/change-requests/{request_id}/{}", action.as_path()),
            None,
        )
        .await
    }

    /// `POST /logistik/request-price-update`
    pub async fn request_price_update(
        &self,
        update: &LogistikPriceUpdate,
    ) -> Result<Ack, ClientError> {
        self.post_for_ack("logistik/request-price-update", Some(update))
            .await
    }
}
