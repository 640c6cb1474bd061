//! Konsumen order board: order list, receipt confirmation and payment
//! retry.
//!
//! The board never changes an order's status itself. Every successful
//! action is followed by a refetch of `GET /orders/my`.

use std::sync::Arc;

use cronos_sdk::client::ClientError;
use cronos_sdk::objects::{Order, OrderStatus};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::OrderApi;
use crate::checkout::{PaymentHandoff, RedirectOpener, hand_off_payment};
use crate::notify::{Notice, Notifier};

/// Status in which an order is out for delivery and may be confirmed.
pub const DELIVERABLE_STATUS: OrderStatus = OrderStatus::Shipped;

#[derive(Debug, Error)]
pub enum OrderBoardError {
    #[error("Token QR wajib diisi")]
    EmptyToken,

    #[error("Pesanan #{0} tidak menunggu pembayaran")]
    NotPayable(i64),

    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ClientError,
    },
}

impl OrderBoardError {
    pub(crate) fn request(source: ClientError, fallback: &str) -> Self {
        Self::Request {
            message: source.user_message(fallback),
            source,
        }
    }

    /// The underlying API error, if the request reached the server.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            OrderBoardError::Request { source, .. } => Some(source),
            OrderBoardError::EmptyToken | OrderBoardError::NotPayable(_) => None,
        }
    }
}

/// Action a rendered order row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// "Konfirmasi Terima": submit the receive QR token.
    ConfirmReceipt,
    /// "Bayar Sekarang": request a fresh payment token.
    PayNow,
}

/// Receipt can be confirmed only for a shipped order that has a delivery.
pub fn can_confirm_receipt(order: &Order) -> bool {
    order.status == DELIVERABLE_STATUS && order.delivery.is_some()
}

pub fn can_pay(order: &Order) -> bool {
    order.status == OrderStatus::Pending
}

pub fn order_actions(order: &Order) -> Vec<OrderAction> {
    let mut actions = Vec::new();
    if can_pay(order) {
        actions.push(OrderAction::PayNow);
    }
    if can_confirm_receipt(order) {
        actions.push(OrderAction::ConfirmReceipt);
    }
    actions
}

/// Trim a scanned or typed QR token, refusing blank input.
pub(crate) fn scanned_token(token: &str) -> Result<&str, OrderBoardError> {
    let token = token.trim();
    if token.is_empty() {
        Err(OrderBoardError::EmptyToken)
    } else {
        Ok(token)
    }
}

pub struct OrderBoard {
    api: Arc<dyn OrderApi>,
    notifier: Arc<dyn Notifier>,
    opener: Arc<dyn RedirectOpener>,
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new(
        api: Arc<dyn OrderApi>,
        notifier: Arc<dyn Notifier>,
        opener: Arc<dyn RedirectOpener>,
    ) -> Self {
        Self {
            api,
            notifier,
            opener,
            orders: Vec::new(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Reload `GET /orders/my`, replacing the list wholesale.
    pub async fn refresh(&mut self) -> Result<&[Order], OrderBoardError> {
        match self.api.my_orders().await {
            Ok(orders) => {
                self.orders = orders;
                Ok(&self.orders)
            }
            Err(e) => {
                let err = OrderBoardError::request(e, "Gagal memuat pesanan");
                self.notifier.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Submit the receive QR token for an order in delivery.
    pub async fn confirm_receive(&mut self, token: &str) -> Result<(), OrderBoardError> {
        let token = match scanned_token(token) {
            Ok(token) => token,
            Err(e) => {
                self.notifier.notify(Notice::warning(e.to_string()));
                return Err(e);
            }
        };

        if let Err(e) = self.api.scan_receive(token).await {
            warn!(error = %e, "Receive confirmation rejected");
            let err = OrderBoardError::request(e, "Gagal mengonfirmasi penerimaan");
            self.notifier.notify(Notice::error(err.to_string()));
            return Err(err);
        }

        info!("Order receipt confirmed");
        self.notifier
            .notify(Notice::success("Pesanan berhasil diterima"));
        // Confirmation already succeeded; a failed reload has been reported.
        let _ = self.refresh().await;
        Ok(())
    }

    /// "Bayar Sekarang": request a new payment token for a pending order.
    pub async fn retry_payment(&mut self, order_id: i64) -> Result<PaymentHandoff, OrderBoardError> {
        if let Some(order) = self.order(order_id)
            && !can_pay(order)
        {
            return Err(OrderBoardError::NotPayable(order_id));
        }
        Ok(hand_off_payment(
            self.api.as_ref(),
            self.opener.as_ref(),
            self.notifier.as_ref(),
            order_id,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;
    use crate::test_support::{FakeApi, RecordingNotifier, RecordingOpener, order};
    use url::Url;

    fn board(api: FakeApi) -> (Arc<FakeApi>, Arc<RecordingNotifier>, OrderBoard) {
        let api = Arc::new(api);
        let notifier = Arc::new(RecordingNotifier::default());
        let board = OrderBoard::new(
            api.clone(),
            notifier.clone(),
            Arc::new(RecordingOpener::default()),
        );
        (api, notifier, board)
    }

    #[test]
    fn test_confirm_receipt_requires_shipped_and_delivery() {
        let statuses = [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ];
        for status in statuses {
            for with_delivery in [false, true] {
                let order = order(1, status, with_delivery);
                let expected = status == OrderStatus::Shipped && with_delivery;
                assert_eq!(can_confirm_receipt(&order), expected, "{status} {with_delivery}");
                assert_eq!(
                    order_actions(&order).contains(&OrderAction::ConfirmReceipt),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_pay_now_only_for_pending() {
        assert_eq!(
            order_actions(&order(42, OrderStatus::Pending, false)),
            vec![OrderAction::PayNow]
        );
        assert!(order_actions(&order(42, OrderStatus::Paid, true)).is_empty());
    }

    #[tokio::test]
    async fn test_blank_token_fails_locally() {
        let (api, _notifier, mut board) = board(FakeApi::default());

        for token in ["", "   "] {
            let err = board.confirm_receive(token).await.unwrap_err();
            assert!(matches!(err, OrderBoardError::EmptyToken));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_receive_refetches_without_local_mutation() {
        let api = FakeApi::default().with_orders(vec![order(42, OrderStatus::Shipped, true)]);
        let (api, _notifier, mut board) = board(api);
        board.refresh().await.unwrap();

        api.set_orders(vec![order(42, OrderStatus::Delivered, true)]);
        board.confirm_receive("  RCV-42 ").await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["my_orders", "scan_receive:RCV-42", "my_orders"]
        );
        assert_eq!(board.order(42).map(|o| o.status), Some(OrderStatus::Delivered));
    }

    #[tokio::test]
    async fn test_rejected_token_surfaces_server_message() {
        let api = FakeApi::default().failing_scan("QR token tidak valid");
        let (api, notifier, mut board) = board(api);

        let err = board.confirm_receive("RCV-X").await.unwrap_err();

        assert_eq!(err.to_string(), "QR token tidak valid");
        assert_eq!(notifier.count(NoticeLevel::Error), 1);
        assert_eq!(api.calls(), vec!["scan_receive:RCV-X"]);
    }

    #[tokio::test]
    async fn test_rejected_token_without_message_uses_generic_text() {
        let api = FakeApi::default().failing_scan("");
        let (_api, _notifier, mut board) = board(api);

        let err = board.confirm_receive("RCV-X").await.unwrap_err();

        assert_eq!(err.to_string(), "Gagal mengonfirmasi penerimaan");
    }

    #[tokio::test]
    async fn test_retry_payment_for_pending_order() {
        let redirect = Url::parse("https://pay.example.com/snap/retry").unwrap();
        let api = FakeApi::default()
            .with_orders(vec![
                order(42, OrderStatus::Pending, false),
                order(43, OrderStatus::Paid, false),
            ])
            .with_redirect(redirect.clone());
        let (api, _notifier, mut board) = board(api);
        board.refresh().await.unwrap();

        assert_eq!(
            board.retry_payment(42).await.unwrap(),
            PaymentHandoff::Opened(redirect)
        );
        assert!(matches!(
            board.retry_payment(43).await,
            Err(OrderBoardError::NotPayable(43))
        ));
        assert_eq!(api.calls(), vec!["my_orders", "payment_token:42"]);
    }
}
