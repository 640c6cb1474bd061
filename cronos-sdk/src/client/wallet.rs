//! `/wallet` endpoints.

use super::{ClientError, CronosClient};
use crate::objects::{NewWithdrawal, ProcessWithdrawal, Wallet, WithdrawAction, Withdrawal};

impl CronosClient {
    /// `GET /wallet/my`
    pub async fn my_wallet(&self) -> Result<Wallet, ClientError> {
        self.get_json("wallet/my").await
    }

    /// `GET /wallet/withdraw` – own requests, or all of them for admin.
    pub async fn withdrawals(&self) -> Result<Vec<Withdrawal>, ClientError> {
        self.get_json("wallet/withdraw").await
    }

    /// `POST /wallet/withdraw`
    pub async fn request_withdrawal(
        &self,
        request: &NewWithdrawal,
    ) -> Result<Withdrawal, ClientError> {
        self.post_json("wallet/withdraw", request).await
    }

    /// `POST /wallet/withdraw/{id}/process` – admin approves or rejects.
    pub async fn process_withdrawal(
        &self,
        withdrawal_id: i64,
        action: WithdrawAction,
    ) -> Result<Withdrawal, ClientError> {
        self.post_json(
            &format!("wallet/withdraw/{withdrawal_id}/process"),
            &ProcessWithdrawal { action },
        )
        .await
    }
}
