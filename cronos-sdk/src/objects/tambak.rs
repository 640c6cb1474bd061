//! Pond (tambak) and harvest batch types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tambak {
    pub id: i64,
    pub petambak_id: i64,
    pub nama_tambak: String,
    pub lokasi: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub luas_m2: Decimal,
    pub kapasitas_maks_kg: Decimal,
    #[serde(default)]
    pub kapasitas_terpakai_kg: Decimal,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Tambak {
    /// Capacity left before the pond is full, never negative.
    pub fn remaining_capacity_kg(&self) -> Decimal {
        (self.kapasitas_maks_kg - self.kapasitas_terpakai_kg).max(Decimal::ZERO)
    }
}

/// A tracked harvest batch.
///
/// `blockchain_hash` is computed server-side when the batch is recorded;
/// the trace endpoint compares it against the current row to report
/// integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUdang {
    pub id: i64,
    pub tambak_id: i64,
    /// Stocking date, `YYYY-MM-DD`.
    pub tanggal_tebar: String,
    #[serde(default)]
    pub tanggal_panen: Option<String>,
    pub usia_bibit_hari: i32,
    pub asal_bibit: String,
    pub kualitas_air_ph: Decimal,
    pub kualitas_air_salinitas: Decimal,
    pub estimasi_panen_kg: Decimal,
    #[serde(default)]
    pub blockchain_hash: Option<String>,
    #[serde(default)]
    pub blockchain_tx_hash: Option<String>,
    #[serde(default, rename = "Tambak")]
    pub tambak: Option<Tambak>,
}

/// Body of `POST /tambak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTambak {
    pub nama_tambak: String,
    pub lokasi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub luas_m2: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub kapasitas_maks_kg: Decimal,
}

/// Body of `POST /tambak/batch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBatch {
    pub tambak_id: i64,
    pub tanggal_tebar: String,
    pub usia_bibit_hari: i32,
    pub asal_bibit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub kualitas_air_ph: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub kualitas_air_salinitas: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimasi_panen_kg: Decimal,
}

/// Body of `PUT /tambak/batch/{id}/harvest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestUpdate {
    pub tanggal_panen: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub estimasi_panen_kg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_umur_panen_hari: Option<i32>,
}
