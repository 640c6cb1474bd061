//! Marketplace product (udang produk) and traceability types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tambak::BatchUdang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Available,
    SoldOut,
    Archived,
}

/// A shrimp product listed from a harvest batch. Priced and stocked per kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub batch_id: i64,
    pub jenis_udang: String,
    pub grade: String,
    pub harga_per_kg: Decimal,
    pub stok_kg: Decimal,
    pub status: ProductStatus,
    #[serde(default, rename = "BatchUdang")]
    pub batch: Option<BatchUdang>,
}

impl Product {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.jenis_udang, self.grade)
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenis_udang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub batch_id: i64,
    pub jenis_udang: String,
    pub grade: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub harga_per_kg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stok_kg: Decimal,
}

/// Body of `POST /products/{id}/request-update`. Applied after admin approval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdateRequest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub harga_per_kg: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub stok_kg: Option<Decimal>,
}

/// Result of comparing a batch against its recorded hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integrity {
    #[serde(rename = "VALID")]
    Valid,
    #[serde(rename = "DATA TAMPERED")]
    DataTampered,
}

/// Pond summary embedded in a trace result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceTambak {
    pub nama_tambak: String,
    pub lokasi: String,
    #[serde(default)]
    pub petambak_name: Option<String>,
}

/// Response of `GET /products/trace/{batch_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    pub batch: BatchUdang,
    pub tambak: TraceTambak,
    pub integrity: Integrity,
}

/// One step of a batch's journey from stocking to harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStage {
    pub stage: &'static str,
    pub detail: String,
    pub location: String,
}

impl TraceResult {
    /// Build the journey shown to buyers: stocking, upkeep, and harvest
    /// once the batch has a harvest date.
    pub fn journey(&self) -> Vec<TraceStage> {
        let mut stages = vec![
            TraceStage {
                stage: "Bibit Ditebar",
                detail: self.batch.tanggal_tebar.clone(),
                location: self.tambak.lokasi.clone(),
            },
            TraceStage {
                stage: "Pemeliharaan",
                detail: format!(
                    "pH: {}, Salinitas: {}",
                    self.batch.kualitas_air_ph, self.batch.kualitas_air_salinitas
                ),
                location: self.tambak.nama_tambak.clone(),
            },
        ];
        if let Some(panen) = &self.batch.tanggal_panen {
            stages.push(TraceStage {
                stage: "Panen",
                detail: panen.clone(),
                location: self.tambak.lokasi.clone(),
            });
        }
        stages
    }

    pub fn is_intact(&self) -> bool {
        self.integrity == Integrity::Valid
    }
}
