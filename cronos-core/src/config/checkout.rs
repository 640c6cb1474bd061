//! Client-side checkout pricing.

use rust_decimal::Decimal;

/// Inputs of the pre-submission price estimate.
///
/// The server computes the billed total itself; these values only drive
/// the estimate shown before the order exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Flat shipping estimate for `LOGISTIC_PARTNER` deliveries.
    pub logistics_fee_estimate: Decimal,
    /// Insurance premium as a fraction of the subtotal.
    pub insurance_rate: Decimal,
}

impl CheckoutConfig {
    pub const DEFAULT_LOGISTICS_FEE_ESTIMATE: Decimal = Decimal::from_parts(15_000, 0, 0, false, 0);
    pub const DEFAULT_INSURANCE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            logistics_fee_estimate: Self::DEFAULT_LOGISTICS_FEE_ESTIMATE,
            insurance_rate: Self::DEFAULT_INSURANCE_RATE,
        }
    }
}
