#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod cart;
pub mod chat;
pub mod checkout;
pub mod config;
pub mod deliveries;
pub mod notify;
pub mod orders;
pub mod registration;
pub mod session;

#[cfg(test)]
mod test_support;
