//! Checkout orchestration.
//!
//! [`Storefront`] owns the cart, the delivery form and the current view of
//! a konsumen session. [`Storefront::checkout`] is the only multi-step flow
//! in the client:
//!
//! 1. Validate locally (non-empty cart, address when shipping).
//! 2. `POST /orders`.
//! 3. On success clear the cart and switch to the order list.
//! 4. Request a payment token and open its redirect URL.
//!
//! A failure in step 2 leaves cart and form untouched. A failure in step 4
//! leaves the order `PENDING`; the order board offers "Bayar Sekarang" to
//! retry.

use std::sync::Arc;

use cronos_sdk::client::ClientError;
use cronos_sdk::objects::{CreateOrderRequest, DeliveryMethod, Order, Product};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::OrderApi;
use crate::cart::{Cart, CartError};
use crate::config::CheckoutConfig;
use crate::notify::{Notice, Notifier};

const ORDER_FAILED: &str = "Gagal membuat pesanan";
const PAYMENT_FAILED: &str =
    "Pesanan dibuat, tetapi pembayaran gagal dimuat. Gunakan Bayar Sekarang di daftar pesanan";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Keranjang kosong")]
    EmptyCart,

    #[error("Alamat pengiriman wajib diisi")]
    MissingAddress,

    /// `POST /orders` failed; nothing changed locally.
    #[error("{message}")]
    OrderRejected {
        message: String,
        #[source]
        source: ClientError,
    },
}

impl CheckoutError {
    /// The underlying API error, if the order reached the server.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            CheckoutError::OrderRejected { source, .. } => Some(source),
            CheckoutError::EmptyCart | CheckoutError::MissingAddress => None,
        }
    }
}

/// Opens a payment gateway redirect for the user.
pub trait RedirectOpener: Send + Sync {
    fn open(&self, url: &Url) -> std::io::Result<()>;
}

/// Delivery details entered before checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub delivery_method: DeliveryMethod,
    pub address: String,
    pub note: Option<String>,
    pub insurance: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            delivery_method: DeliveryMethod::LogisticPartner,
            address: String::new(),
            note: None,
            insurance: false,
        }
    }
}

/// Price shown before submission. Never confused with the server's
/// billed `Order::total_harga`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutEstimate {
    pub subtotal: Decimal,
    pub logistics_fee: Decimal,
    pub insurance_fee: Decimal,
    pub grand_total: Decimal,
}

impl CheckoutEstimate {
    pub fn compute(cart: &Cart, form: &CheckoutForm, config: &CheckoutConfig) -> Self {
        let subtotal = cart.total();
        let logistics_fee = match form.delivery_method {
            DeliveryMethod::LogisticPartner => config.logistics_fee_estimate,
            DeliveryMethod::SelfPickup => Decimal::ZERO,
        };
        let insurance_fee = if form.insurance {
            subtotal * config.insurance_rate
        } else {
            Decimal::ZERO
        };
        Self {
            subtotal,
            logistics_fee,
            insurance_fee,
            grand_total: subtotal + logistics_fee + insurance_fee,
        }
    }
}

/// Screen the storefront currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    Cart,
    Orders,
}

/// What happened after the order was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentHandoff {
    /// The payment page was opened.
    Opened(Url),
    /// The server returned no redirect URL.
    NoRedirect,
    /// Token request or redirect failed; the order stays `PENDING`.
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub estimate: CheckoutEstimate,
    pub payment: PaymentHandoff,
}

impl CheckoutOutcome {
    /// Whether the order can still be paid from the order board.
    pub fn needs_payment_retry(&self) -> bool {
        matches!(self.payment, PaymentHandoff::Failed { .. })
    }
}

/// Request a payment token for `order_id` and open its redirect.
///
/// Failures are reported once through `notifier` and returned as
/// [`PaymentHandoff::Failed`].
pub(crate) async fn hand_off_payment(
    api: &dyn OrderApi,
    opener: &dyn RedirectOpener,
    notifier: &dyn Notifier,
    order_id: i64,
) -> PaymentHandoff {
    let response = match api.payment_token(order_id).await {
        Ok(response) => response,
        Err(e) => {
            warn!(order_id, error = %e, "Payment token request failed");
            let message = e.user_message(PAYMENT_FAILED);
            notifier.notify(Notice::error(message.clone()));
            return PaymentHandoff::Failed { message };
        }
    };

    let Some(url) = response.redirect_url else {
        info!(order_id, "Payment token returned no redirect");
        return PaymentHandoff::NoRedirect;
    };
    if let Err(e) = opener.open(&url) {
        warn!(order_id, error = %e, "Failed to open payment redirect");
        let message = format!("Buka halaman pembayaran secara manual: {url}");
        notifier.notify(Notice::error(message.clone()));
        return PaymentHandoff::Failed { message };
    }
    info!(order_id, %url, "Opened payment redirect");
    PaymentHandoff::Opened(url)
}

pub struct Storefront {
    api: Arc<dyn OrderApi>,
    notifier: Arc<dyn Notifier>,
    opener: Arc<dyn RedirectOpener>,
    config: CheckoutConfig,
    cart: Cart,
    form: CheckoutForm,
    view: View,
}

impl Storefront {
    pub fn new(
        api: Arc<dyn OrderApi>,
        notifier: Arc<dyn Notifier>,
        opener: Arc<dyn RedirectOpener>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            opener,
            config,
            cart: Cart::new(),
            form: CheckoutForm::default(),
            view: View::default(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn estimate(&self) -> CheckoutEstimate {
        CheckoutEstimate::compute(&self.cart, &self.form, &self.config)
    }

    /// Add one kilogram of `product`, notifying the outcome.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError> {
        match self.cart.add_item(product) {
            Ok(line) => {
                debug!(product_id = line.product_id, quantity = line.quantity, "Cart line updated");
                self.notifier
                    .notify(Notice::success(format!("{} masuk keranjang", line.name)));
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(Notice::warning(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> Result<(), CartError> {
        if let Err(e) = self.cart.set_quantity(product_id, quantity) {
            self.notifier.notify(Notice::warning(e.to_string()));
            return Err(e);
        }
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: i64) -> bool {
        self.cart.remove(product_id).is_some()
    }

    /// Submit the cart as an order and hand off to payment.
    pub async fn checkout(&mut self) -> Result<CheckoutOutcome, CheckoutError> {
        if self.cart.is_empty() {
            return Err(self.reject(CheckoutError::EmptyCart));
        }
        let address = self.form.address.trim();
        if self.form.delivery_method.requires_address() && address.is_empty() {
            return Err(self.reject(CheckoutError::MissingAddress));
        }

        let estimate = self.estimate();
        let request = CreateOrderRequest {
            items: self.cart.order_items(),
            delivery_method: Some(self.form.delivery_method),
            delivery_address: (!address.is_empty()).then(|| address.to_owned()),
            delivery_note: self
                .form
                .note
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            insurance: Some(self.form.insurance),
        };

        let order = match self.api.create_order(&request).await {
            Ok(order) => order,
            Err(source) => {
                warn!(error = %source, lines = request.items.len(), "Order creation failed");
                let message = source.user_message(ORDER_FAILED);
                self.notifier.notify(Notice::error(message.clone()));
                return Err(CheckoutError::OrderRejected { message, source });
            }
        };

        info!(order_id = order.id, total = %order.total_harga, "Order created");
        if order.total_harga != estimate.grand_total {
            warn!(
                order_id = order.id,
                estimate = %estimate.grand_total,
                billed = %order.total_harga,
                "Billed total differs from checkout estimate"
            );
        }
        self.cart.clear();
        self.view = View::Orders;
        self.notifier
            .notify(Notice::success(format!("Pesanan #{} berhasil dibuat", order.id)));

        let payment = hand_off_payment(
            self.api.as_ref(),
            self.opener.as_ref(),
            self.notifier.as_ref(),
            order.id,
        )
        .await;

        Ok(CheckoutOutcome {
            order,
            estimate,
            payment,
        })
    }

    fn reject(&self, error: CheckoutError) -> CheckoutError {
        self.notifier.notify(Notice::warning(error.to_string()));
        error
    }
}
