//! Products, batch tracing, ponds and harvest batches.

use clap::Subcommand;
use cronos_core::cart::stock_ceiling;
use cronos_core::notify::Notice;
use cronos_sdk::objects::{
    HarvestUpdate, NewBatch, NewProduct, NewTambak, Product, ProductQuery, ProductStatus,
    ProductUpdateRequest, Role,
};
use rust_decimal::Decimal;

use super::{CliError, rupiah};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products on sale
    List {
        #[arg(long)]
        jenis: Option<String>,
        #[arg(long)]
        grade: Option<String>,
    },
    /// List your own products (petambak)
    Mine,
    /// List a product from a harvest batch (petambak)
    Create {
        #[arg(long)]
        batch_id: i64,
        #[arg(long)]
        jenis: String,
        #[arg(long)]
        grade: String,
        #[arg(long)]
        price_per_kg: Decimal,
        #[arg(long)]
        stock_kg: Decimal,
    },
    /// Propose a price or stock change for admin review (petambak)
    RequestUpdate {
        product_id: i64,
        #[arg(long)]
        price_per_kg: Option<Decimal>,
        #[arg(long)]
        stock_kg: Option<Decimal>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TambakCommand {
    /// List your ponds
    List,
    /// Register a pond
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        area_m2: Decimal,
        #[arg(long)]
        capacity_kg: Decimal,
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
    },
    /// List your harvest batches
    Batches,
    /// Record a new batch
    CreateBatch {
        #[arg(long)]
        tambak_id: i64,
        /// Stocking date, YYYY-MM-DD
        #[arg(long)]
        stocked_on: String,
        #[arg(long)]
        seed_age_days: i32,
        #[arg(long)]
        seed_origin: String,
        #[arg(long)]
        ph: Decimal,
        #[arg(long)]
        salinity: Decimal,
        #[arg(long)]
        estimated_harvest_kg: Decimal,
    },
    /// Record the harvest of a batch
    Harvest {
        batch_id: i64,
        /// Harvest date, YYYY-MM-DD
        #[arg(long)]
        harvested_on: String,
        #[arg(long)]
        harvest_kg: Option<Decimal>,
        #[arg(long)]
        age_days: Option<i32>,
    },
}

fn print_product(product: &Product) {
    let status = match product.status {
        ProductStatus::Available => "tersedia",
        ProductStatus::SoldOut => "habis",
        ProductStatus::Archived => "arsip",
    };
    println!(
        "#{:<5} {:<28} {:>12}/kg  stok {} kg ({status})",
        product.id,
        product.display_name(),
        rupiah(product.harga_per_kg),
        stock_ceiling(product),
    );
}

pub async fn products(state: &AppState, cmd: ProductCommand) -> Result<(), CliError> {
    match cmd {
        ProductCommand::List { jenis, grade } => {
            let client = state.client_for_current_user()?;
            let query = ProductQuery {
                jenis_udang: jenis,
                grade,
                status: None,
            };
            let products = client.list_products(&query).await?;
            if products.is_empty() {
                println!("Belum ada produk");
            }
            products.iter().for_each(print_product);
        }
        ProductCommand::Mine => {
            let (_, client) = state.signed_in_as(Role::Petambak)?;
            client.my_products().await?.iter().for_each(print_product);
        }
        ProductCommand::Create {
            batch_id,
            jenis,
            grade,
            price_per_kg,
            stock_kg,
        } => {
            let (_, client) = state.signed_in_as(Role::Petambak)?;
            let product = client
                .create_product(&NewProduct {
                    batch_id,
                    jenis_udang: jenis,
                    grade,
                    harga_per_kg: price_per_kg,
                    stok_kg: stock_kg,
                })
                .await?;
            state
                .notifier
                .notify(Notice::success(format!("Produk #{} ditambahkan", product.id)));
            print_product(&product);
        }
        ProductCommand::RequestUpdate {
            product_id,
            price_per_kg,
            stock_kg,
        } => {
            if price_per_kg.is_none() && stock_kg.is_none() {
                return Err(CliError::Invalid(
                    "Isi --price-per-kg atau --stock-kg".to_string(),
                ));
            }
            let (_, client) = state.signed_in_as(Role::Petambak)?;
            let ack = client
                .request_product_update(
                    product_id,
                    &ProductUpdateRequest {
                        harga_per_kg: price_per_kg,
                        stok_kg: stock_kg,
                    },
                )
                .await?;
            state.notifier.notify(Notice::success(
                ack.message
                    .unwrap_or_else(|| "Permintaan perubahan dikirim ke admin".to_string()),
            ));
        }
    }
    Ok(())
}

pub async fn trace(state: &AppState, batch_id: &str) -> Result<(), CliError> {
    if batch_id.trim().is_empty() {
        return Err(CliError::Invalid("ID batch wajib diisi".to_string()));
    }
    let trace = state.client().trace_batch(batch_id).await?;

    println!(
        "Batch #{} dari {} ({})",
        trace.batch.id, trace.tambak.nama_tambak, trace.tambak.lokasi
    );
    if let Some(owner) = &trace.tambak.petambak_name {
        println!("Petambak: {owner}");
    }
    for stage in trace.journey() {
        println!("  - {:<14} {:<30} {}", stage.stage, stage.detail, stage.location);
    }
    if trace.is_intact() {
        println!("Integritas: VALID");
    } else {
        state
            .notifier
            .notify(Notice::warning("Integritas: DATA TAMPERED"));
    }
    if let Some(hash) = &trace.batch.blockchain_hash {
        println!("Hash: {hash}");
    }
    Ok(())
}

pub async fn tambak(state: &AppState, cmd: TambakCommand) -> Result<(), CliError> {
    let (_, client) = state.signed_in_as(Role::Petambak)?;
    match cmd {
        TambakCommand::List => {
            for tambak in client.list_tambak().await? {
                println!(
                    "#{:<4} {:<24} {:<20} sisa kapasitas {} kg",
                    tambak.id,
                    tambak.nama_tambak,
                    tambak.lokasi,
                    tambak.remaining_capacity_kg()
                );
            }
        }
        TambakCommand::Create {
            name,
            location,
            area_m2,
            capacity_kg,
            latitude,
            longitude,
        } => {
            let tambak = client
                .create_tambak(&NewTambak {
                    nama_tambak: name,
                    lokasi: location,
                    latitude,
                    longitude,
                    luas_m2: area_m2,
                    kapasitas_maks_kg: capacity_kg,
                })
                .await?;
            state
                .notifier
                .notify(Notice::success(format!("Tambak #{} terdaftar", tambak.id)));
        }
        TambakCommand::Batches => {
            for batch in client.list_batches().await? {
                println!(
                    "#{:<4} tambak #{:<4} tebar {} panen {} estimasi {} kg",
                    batch.id,
                    batch.tambak_id,
                    batch.tanggal_tebar,
                    batch.tanggal_panen.as_deref().unwrap_or("-"),
                    batch.estimasi_panen_kg
                );
            }
        }
        TambakCommand::CreateBatch {
            tambak_id,
            stocked_on,
            seed_age_days,
            seed_origin,
            ph,
            salinity,
            estimated_harvest_kg,
        } => {
            let batch = client
                .create_batch(&NewBatch {
                    tambak_id,
                    tanggal_tebar: stocked_on,
                    usia_bibit_hari: seed_age_days,
                    asal_bibit: seed_origin,
                    kualitas_air_ph: ph,
                    kualitas_air_salinitas: salinity,
                    estimasi_panen_kg: estimated_harvest_kg,
                })
                .await?;
            state
                .notifier
                .notify(Notice::success(format!("Batch #{} dicatat", batch.id)));
            if let Some(hash) = batch.blockchain_hash {
                println!("Hash: {hash}");
            }
        }
        TambakCommand::Harvest {
            batch_id,
            harvested_on,
            harvest_kg,
            age_days,
        } => {
            let batch = client
                .update_harvest(
                    batch_id,
                    &HarvestUpdate {
                        tanggal_panen: harvested_on,
                        estimasi_panen_kg: harvest_kg,
                        total_umur_panen_hari: age_days,
                    },
                )
                .await?;
            state.notifier.notify(Notice::success(format!(
                "Panen batch #{} dicatat",
                batch.id
            )));
        }
    }
    Ok(())
}
