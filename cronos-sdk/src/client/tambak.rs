//! `/tambak` endpoints (petambak only).

use super::{ClientError, CronosClient};
use crate::objects::{BatchUdang, HarvestUpdate, NewBatch, NewTambak, Tambak};

impl CronosClient {
    /// `GET /tambak`
    pub async fn list_tambak(&self) -> Result<Vec<Tambak>, ClientError> {
        self.get_json("tambak").await
    }

    /// `POST /tambak`
    pub async fn create_tambak(&self, tambak: &NewTambak) -> Result<Tambak, ClientError> {
        self.post_json("tambak", tambak).await
    }

    /// `GET /tambak/batch`
    pub async fn list_batches(&self) -> Result<Vec<BatchUdang>, ClientError> {
        self.get_json("tambak/batch").await
    }

    /// `POST /tambak/batch` – the server records the batch hash on creation.
    pub async fn create_batch(&self, batch: &NewBatch) -> Result<BatchUdang, ClientError> {
        self.post_json("tambak/batch", batch).await
    }

    /// `PUT /tambak/batch/{id}/harvest`
    pub async fn update_harvest(
        &self,
        batch_id: i64,
        harvest: &HarvestUpdate,
    ) -> Result<BatchUdang, ClientError> {
        self.put_json(&format!("tambak/batch/{batch_id}/harvest"), harvest)
            .await
    }
}
