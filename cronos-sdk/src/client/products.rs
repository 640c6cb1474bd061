//! `/products` endpoints.

use super::{ClientError, CronosClient};
use crate::objects::{Ack, NewProduct, Product, ProductQuery, ProductUpdateRequest, TraceResult};

impl CronosClient {
    /// `GET /products` – marketplace listing.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ClientError> {
        self.get_json_with_query("products", query).await
    }

    /// `GET /products/my` – products listed by the signed-in petambak.
    pub async fn my_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get_json("products/my").await
    }

    /// `POST /products` – list a product from a harvested batch.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        self.post_json("products", product).await
    }

    /// `POST /products/{id}/request-update` – propose a price/stock change
    /// for admin review.
    pub async fn request_product_update(
        &self,
        product_id: i64,
        update: &ProductUpdateRequest,
    ) -> Result<Ack, ClientError> {
        self.post_for_ack(&format!("products/{product_id}/request-update"), Some(update))
            .await
    }

    /// `GET /products/trace/{batch_id}` – public traceability lookup.
    ///
    /// `batch_id` is user input (often scanned), so it is percent-encoded.
    pub async fn trace_batch(&self, batch_id: &str) -> Result<TraceResult, ClientError> {
        self.get_json(&format!(
            "products/trace/{}",
            urlencoding::encode(batch_id.trim())
        ))
        .await
    }
}
