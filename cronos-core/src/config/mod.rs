//! Configuration types for the CRONOS client.
//!
//! These are the validated runtime values the core components consume.
//! Reading and validating the configuration file is handled by the binary
//! crate.

mod api;
mod checkout;

pub use api::ApiConfig;
pub use checkout::CheckoutConfig;
