//! Typed objects and clients for the CRONOS marketplace API.
//!
//! [`objects`] holds the request/response types shared by every front-end.
//! The HTTP client and the realtime chat socket live in [`client`], gated
//! behind the `client` cargo feature.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
