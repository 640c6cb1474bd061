//! Konsumen checkout and the order board.

use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};
use cronos_core::checkout::{CheckoutEstimate, PaymentHandoff, Storefront};
use cronos_core::notify::Notice;
use cronos_core::orders::{OrderAction, OrderBoard, order_actions};
use cronos_sdk::client::CronosClient;
use cronos_sdk::objects::{DeliveryMethod, Order, ProductQuery, Role};

use super::{CliError, rupiah};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Delivered by a logistik partner
    Logistic,
    /// Collected from the petambak
    Pickup,
}

impl From<Method> for DeliveryMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Logistic => DeliveryMethod::LogisticPartner,
            Method::Pickup => DeliveryMethod::SelfPickup,
        }
    }
}

/// One `PRODUCT_ID:KG` cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: i64,
    pub quantity: i64,
}

fn parse_item(s: &str) -> Result<ItemArg, String> {
    let (id, kg) = s.split_once(':').unwrap_or((s, "1"));
    let product_id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid product id {id:?}"))?;
    let quantity = kg
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity {kg:?}, whole kilograms expected"))?;
    Ok(ItemArg {
        product_id,
        quantity,
    })
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Cart line as PRODUCT_ID:KG, repeatable
    #[arg(long = "item", required = true, value_parser = parse_item)]
    items: Vec<ItemArg>,
    #[arg(long, value_enum, default_value_t = Method::Logistic)]
    method: Method,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long)]
    note: Option<String>,
    /// Add shipping insurance
    #[arg(long)]
    insurance: bool,
    /// Print the estimate without placing the order
    #[arg(long)]
    estimate_only: bool,
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// List your orders (konsumen)
    List,
    /// Request a new payment link for a pending order
    Pay { order_id: i64 },
    /// Confirm receipt with the courier's QR token
    Receive { token: String },
    /// Show the QR tokens of an order
    Qr { order_id: i64 },
    /// Orders containing your products (petambak)
    Incoming,
}

fn print_estimate(estimate: &CheckoutEstimate) {
    println!("Subtotal      {:>16}", rupiah(estimate.subtotal));
    println!("Ongkir (est.) {:>16}", rupiah(estimate.logistics_fee));
    println!("Asuransi      {:>16}", rupiah(estimate.insurance_fee));
    println!("Total         {:>16}", rupiah(estimate.grand_total));
}

fn print_order(order: &Order) {
    let actions: Vec<&str> = order_actions(order)
        .into_iter()
        .map(|action| match action {
            OrderAction::PayNow => "Bayar Sekarang",
            OrderAction::ConfirmReceipt => "Konfirmasi Terima",
        })
        .collect();
    let delivery = order
        .delivery
        .as_ref()
        .map(|d| format!(" kirim {}", d.status))
        .unwrap_or_default();
    println!(
        "#{:<5} {:<11} {:>14}{delivery}{}",
        order.id,
        order.status.to_string(),
        rupiah(order.total_harga),
        if actions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", actions.join(", "))
        }
    );
}

fn report_handoff(order_id: i64, payment: &PaymentHandoff) {
    match payment {
        PaymentHandoff::Opened(_) => {}
        PaymentHandoff::NoRedirect => {
            println!("Tidak ada tautan pembayaran untuk pesanan #{order_id}");
        }
        PaymentHandoff::Failed { .. } => {
            println!("Pesanan #{order_id} menunggu pembayaran. Coba lagi: cronos orders pay {order_id}");
        }
    }
}

pub async fn checkout(state: &AppState, args: CheckoutArgs) -> Result<(), CliError> {
    let (_, client) = state.signed_in_as(Role::Konsumen)?;
    let catalog = client.list_products(&ProductQuery::default()).await?;

    let mut storefront = Storefront::new(
        Arc::new(client),
        state.notifier.clone(),
        state.opener.clone(),
        state.config.checkout,
    );
    for item in &args.items {
        let product = catalog
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| CliError::Invalid(format!("Produk #{} tidak ditemukan", item.product_id)))?;
        if storefront.cart().line(product.id).is_none() {
            storefront.add_to_cart(product)?;
        }
        storefront.set_quantity(product.id, item.quantity)?;
    }

    let form = storefront.form_mut();
    form.delivery_method = args.method.into();
    form.address = args.address;
    form.note = args.note;
    form.insurance = args.insurance;

    print_estimate(&storefront.estimate());
    if args.estimate_only {
        return Ok(());
    }

    let outcome = storefront.checkout().await?;
    print_order(&outcome.order);
    report_handoff(outcome.order.id, &outcome.payment);
    Ok(())
}

pub async fn orders(state: &AppState, cmd: OrderCommand) -> Result<(), CliError> {
    match cmd {
        OrderCommand::List => {
            let (_, client) = state.signed_in_as(Role::Konsumen)?;
            let mut board = board(state, client);
            let orders = board.refresh().await?;
            if orders.is_empty() {
                println!("Belum ada pesanan");
            }
            orders.iter().for_each(print_order);
        }
        OrderCommand::Pay { order_id } => {
            let (_, client) = state.signed_in_as(Role::Konsumen)?;
            let mut board = board(state, client);
            board.refresh().await?;
            let payment = board.retry_payment(order_id).await?;
            report_handoff(order_id, &payment);
        }
        OrderCommand::Receive { token } => {
            let (_, client) = state.signed_in_as(Role::Konsumen)?;
            let mut board = board(state, client);
            board.confirm_receive(&token).await?;
            board.orders().iter().for_each(print_order);
        }
        OrderCommand::Qr { order_id } => {
            let (_, client) = state.signed_in()?;
            let qr = client.order_qr(order_id).await?;
            let pickup = qr.pickup_qr.or(qr.token);
            match (pickup, qr.receive_qr) {
                (None, None) => state
                    .notifier
                    .notify(Notice::info(format!("Pesanan #{order_id} belum memiliki QR"))),
                (pickup, receive) => {
                    if let Some(token) = pickup {
                        println!("Pickup:  {token}");
                    }
                    if let Some(token) = receive {
                        println!("Terima:  {token}");
                    }
                }
            }
        }
        OrderCommand::Incoming => {
            let (_, client) = state.signed_in_as(Role::Petambak)?;
            client.petambak_orders().await?.iter().for_each(print_order);
        }
    }
    Ok(())
}

fn board(state: &AppState, client: CronosClient) -> OrderBoard {
    OrderBoard::new(
        Arc::new(client),
        state.notifier.clone(),
        state.opener.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(
            parse_item("7:3"),
            Ok(ItemArg {
                product_id: 7,
                quantity: 3
            })
        );
        assert_eq!(
            parse_item("7"),
            Ok(ItemArg {
                product_id: 7,
                quantity: 1
            })
        );
        assert!(parse_item("x:1").is_err());
        assert!(parse_item("7:1.5").is_err());
    }

    #[test]
    fn test_method_maps_to_wire_value() {
        assert_eq!(DeliveryMethod::from(Method::Logistic), DeliveryMethod::LogisticPartner);
        assert_eq!(DeliveryMethod::from(Method::Pickup), DeliveryMethod::SelfPickup);
    }
}
