//! Sensordeck seeding tool
//!
//! Resets the store and fills it with synthetic daily readings, one per
//! day starting from a given date. Mirrors the shape of real sensor data:
//! field1 in [0, 100), field2 in [10, 60), field3 in [0, 200), integers.
//!
//! Run with: cargo run --bin sensordeck-seed -- --count 50

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use rand::Rng;
use sensordeck::config::Config;
use sensordeck::store::{JsonStore, Reading, ReadingStore, StoreConfig};

const DAY_MILLIS: i64 = 24 * 3600 * 1000;

#[derive(Parser, Debug)]
#[command(
    name = "sensordeck-seed",
    version,
    about = "Seed the sensordeck store with synthetic readings"
)]
struct Args {
    /// Number of daily readings to generate
    #[arg(long, default_value_t = 50)]
    count: u32,

    /// First day (YYYY-MM-DD) to generate a reading for
    #[arg(long, default_value = "2024-01-01")]
    start: String,

    /// Data directory (defaults to the configured one)
    #[arg(long)]
    data_dir: Option<String>,

    /// Keep existing readings instead of clearing them first
    #[arg(long)]
    keep_existing: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensordeck=info".into()),
        )
        .init();

    let args = Args::parse();

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| Config::load_default().store.data_dir);

    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .with_context(|| format!("invalid start date {:?}, expected YYYY-MM-DD", args.start))?;
    let start_millis = start
        .and_hms_opt(0, 0, 0)
        .context("invalid start of day")?
        .and_utc()
        .timestamp_millis();

    let store = JsonStore::open(StoreConfig::new(&data_dir))
        .await
        .with_context(|| format!("failed to open store in {data_dir}"))?;

    if !args.keep_existing {
        store.reset().await.context("failed to clear old data")?;
    }

    let mut rng = rand::thread_rng();
    let readings: Vec<Reading> = (0..args.count)
        .map(|i| {
            Reading::new(
                start_millis + i64::from(i) * DAY_MILLIS,
                f64::from(rng.gen_range(0..100)),
                f64::from(rng.gen_range(10..60)),
                f64::from(rng.gen_range(0..200)),
            )
        })
        .collect();

    let inserted = store
        .insert_many(readings)
        .await
        .context("failed to insert readings")?;

    tracing::info!(inserted, data_dir = %data_dir, "seeding complete");
    println!("Seeded {inserted} readings into {data_dir}");

    Ok(())
}
