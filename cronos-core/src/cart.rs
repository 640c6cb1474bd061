//! Client-side shopping cart.
//!
//! The cart lives only in the client session and is never synced to the
//! server before checkout. Each product occupies at most one line, and a
//! line's quantity always stays in `1..=stock_ceiling`.

use cronos_sdk::objects::{OrderItemRequest, Product};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product has no whole kilogram left in stock.
    #[error("Stok {name} habis")]
    OutOfStock { product_id: i64, name: String },

    /// The requested quantity is above what the product had in stock when
    /// it was added.
    #[error("Stok {name} hanya tersedia {ceiling} kg")]
    ExceedsStock {
        product_id: i64,
        name: String,
        ceiling: u32,
    },

    #[error("Produk tidak ada di keranjang")]
    NotInCart(i64),
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    /// Price per kg captured when the product was added.
    pub unit_price: Decimal,
    /// Whole kilograms available when the product was added.
    pub stock_ceiling: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Stock available for ordering, in whole kilograms.
pub fn stock_ceiling(product: &Product) -> u32 {
    product.stok_kg.trunc().to_u32().unwrap_or(0)
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one kilogram of `product`.
    ///
    /// A product already in the cart has its line incremented by one;
    /// otherwise a new line with quantity one is created.
    pub fn add_item(&mut self, product: &Product) -> Result<&CartLine, CartError> {
        if let Some(index) = self.position(product.id) {
            let line = &mut self.lines[index];
            if line.quantity >= line.stock_ceiling {
                return Err(CartError::ExceedsStock {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    ceiling: line.stock_ceiling,
                });
            }
            line.quantity += 1;
            return Ok(&self.lines[index]);
        }

        let ceiling = stock_ceiling(product);
        if ceiling == 0 {
            return Err(CartError::OutOfStock {
                product_id: product.id,
                name: product.display_name(),
            });
        }
        self.lines.push(CartLine {
            product_id: product.id,
            name: product.display_name(),
            quantity: 1,
            unit_price: product.harga_per_kg,
            stock_ceiling: ceiling,
        });
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Replace the quantity of a line. Zero or less removes the line.
    ///
    /// Quantities above the line's stock ceiling are refused and the line
    /// keeps its previous quantity.
    pub fn set_quantity(
        &mut self,
        product_id: i64,
        quantity: i64,
    ) -> Result<Option<&CartLine>, CartError> {
        let index = self
            .position(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        if quantity <= 0 {
            self.lines.remove(index);
            return Ok(None);
        }

        let line = &mut self.lines[index];
        match u32::try_from(quantity) {
            Ok(quantity) if quantity <= line.stock_ceiling => {
                line.quantity = quantity;
                Ok(Some(&self.lines[index]))
            }
            _ => Err(CartError::ExceedsStock {
                product_id,
                name: line.name.clone(),
                ceiling: line.stock_ceiling,
            }),
        }
    }

    pub fn remove(&mut self, product_id: i64) -> Option<CartLine> {
        let index = self.position(product_id)?;
        Some(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of `quantity × unit_price` over all lines.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Lines in the shape `POST /orders` expects.
    pub fn order_items(&self) -> Vec<OrderItemRequest> {
        self.lines
            .iter()
            .map(|l| OrderItemRequest {
                produk_id: l.product_id,
                qty: l.quantity,
            })
            .collect()
    }

    fn position(&self, product_id: i64) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}
