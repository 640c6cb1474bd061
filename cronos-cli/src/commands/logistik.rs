//! Logistik deliveries and shipping price proposals.

use std::sync::Arc;

use clap::Subcommand;
use cronos_core::deliveries::{DeliveryBoard, awaiting_pickup};
use cronos_core::notify::Notice;
use cronos_sdk::client::CronosClient;
use cronos_sdk::objects::{Delivery, LogistikPriceUpdate, Role};
use rust_decimal::Decimal;

use super::{CliError, rupiah};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum LogistikCommand {
    /// Deliveries waiting for a courier
    Available,
    /// Deliveries assigned to you
    Mine,
    /// Confirm pickup with the petambak's QR token
    Pickup { token: String },
    /// Propose a new shipping cost per km for admin review
    PriceUpdate {
        #[arg(long)]
        per_km: Decimal,
    },
}

fn print_delivery(delivery: &Delivery) {
    let distance = delivery
        .jarak_km
        .map(|km| format!(" {km} km"))
        .unwrap_or_default();
    let fee = delivery.biaya_logistik.map(rupiah).unwrap_or_default();
    println!(
        "#{:<5} pesanan #{:<5} {:<10}{distance} {fee}{}",
        delivery.id,
        delivery.order_id,
        delivery.status.to_string(),
        if awaiting_pickup(delivery) {
            "  [menunggu pickup]"
        } else {
            ""
        }
    );
}

pub async fn run(state: &AppState, cmd: LogistikCommand) -> Result<(), CliError> {
    let (_, client) = state.signed_in_as(Role::Logistik)?;
    let board = |client: CronosClient| DeliveryBoard::new(Arc::new(client), state.notifier.clone());

    match cmd {
        LogistikCommand::Available => {
            let mut board = board(client);
            let deliveries = board.refresh_available().await?;
            if deliveries.is_empty() {
                println!("Tidak ada pengiriman tersedia");
            }
            deliveries.iter().for_each(print_delivery);
        }
        LogistikCommand::Mine => {
            let mut board = board(client);
            board.refresh_mine().await?.iter().for_each(print_delivery);
        }
        LogistikCommand::Pickup { token } => {
            let mut board = board(client);
            board.confirm_pickup(&token).await?;
            board.mine().iter().for_each(print_delivery);
        }
        LogistikCommand::PriceUpdate { per_km } => {
            if per_km <= Decimal::ZERO {
                return Err(CliError::Invalid(
                    "Tarif per km harus lebih dari 0".to_string(),
                ));
            }
            let ack = client
                .request_price_update(&LogistikPriceUpdate {
                    shipping_cost_per_km: per_km,
                })
                .await?;
            state.notifier.notify(Notice::success(
                ack.message
                    .unwrap_or_else(|| "Permintaan perubahan tarif dikirim".to_string()),
            ));
        }
    }
    Ok(())
}
