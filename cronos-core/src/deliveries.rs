//! Logistik delivery board: open jobs, own jobs and pickup confirmation.

use std::sync::Arc;

use cronos_sdk::objects::{Delivery, DeliveryStatus};
use tracing::{info, warn};

use crate::api::OrderApi;
use crate::notify::{Notice, Notifier};
use crate::orders::{OrderBoardError, scanned_token};

/// Deliveries waiting for the pickup scan.
pub fn awaiting_pickup(delivery: &Delivery) -> bool {
    matches!(
        delivery.status,
        DeliveryStatus::Pending | DeliveryStatus::Assigned
    )
}

pub struct DeliveryBoard {
    api: Arc<dyn OrderApi>,
    notifier: Arc<dyn Notifier>,
    available: Vec<Delivery>,
    mine: Vec<Delivery>,
}

impl DeliveryBoard {
    pub fn new(api: Arc<dyn OrderApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            available: Vec::new(),
            mine: Vec::new(),
        }
    }

    pub fn available(&self) -> &[Delivery] {
        &self.available
    }

    pub fn mine(&self) -> &[Delivery] {
        &self.mine
    }

    /// Reload `GET /orders/deliveries/available`.
    pub async fn refresh_available(&mut self) -> Result<&[Delivery], OrderBoardError> {
        match self.api.available_deliveries().await {
            Ok(deliveries) => {
                self.available = deliveries;
                Ok(&self.available)
            }
            Err(e) => Err(self.report(OrderBoardError::request(e, "Gagal memuat pengiriman"))),
        }
    }

    /// Reload `GET /orders/deliveries/my`.
    pub async fn refresh_mine(&mut self) -> Result<&[Delivery], OrderBoardError> {
        match self.api.my_deliveries().await {
            Ok(deliveries) => {
                self.mine = deliveries;
                Ok(&self.mine)
            }
            Err(e) => Err(self.report(OrderBoardError::request(e, "Gagal memuat pengiriman"))),
        }
    }

    /// Submit the pickup QR token shown by the petambak.
    pub async fn confirm_pickup(&mut self, token: &str) -> Result<(), OrderBoardError> {
        let token = match scanned_token(token) {
            Ok(token) => token,
            Err(e) => {
                self.notifier.notify(Notice::warning(e.to_string()));
                return Err(e);
            }
        };

        if let Err(e) = self.api.scan_pickup(token).await {
            warn!(error = %e, "Pickup scan rejected");
            return Err(self.report(OrderBoardError::request(e, "Gagal konfirmasi pickup")));
        }

        info!("Pickup confirmed");
        self.notifier.notify(Notice::success("Pickup berhasil dikonfirmasi"));
        let _ = self.refresh_mine().await;
        Ok(())
    }

    fn report(&self, err: OrderBoardError) -> OrderBoardError {
        self.notifier.notify(Notice::error(err.to_string()));
        err
    }
}
