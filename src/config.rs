use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use compute::store::{DatabaseStore, EarningsStore, MemoryStore};
use compute::week::{DEFAULT_UTC_OFFSET_HOURS, WeekClock};
use ::config::{Config, Environment};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

/// Which backing store holds the weekly records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Relational database reached through `database_url`
    Database,
    /// Process memory; records are lost on restart
    Memory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Database => "database",
            StorageKind::Memory => "memory",
        }
    }
}

/// Runtime settings.
///
/// Defaults are overridden by `RIDELEDGER_*` environment variables (a `.env`
/// file is loaded first), which are in turn overridden by command-line flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Fixed offset, in hours, that weeks are aligned to
    pub utc_offset_hours: i32,
    pub storage: StorageKind,
}

impl Settings {
    /// Load settings from defaults and the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("database_url", "sqlite://rideledger.db?mode=rwc")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("utc_offset_hours", i64::from(DEFAULT_UTC_OFFSET_HOURS))?
            .set_default("storage", StorageKind::Database.as_str())?
            .add_source(Environment::with_prefix("RIDELEDGER"))
            .build()?
            .try_deserialize::<Settings>()?;

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn week_clock(&self) -> Result<WeekClock> {
        WeekClock::from_hours(self.utc_offset_hours)
            .ok_or_else(|| anyhow!("utc_offset_hours must be between -23 and 23, got {}", self.utc_offset_hours))
    }
}

/// Build the store selected by `settings`
pub async fn build_store(settings: &Settings) -> Result<Arc<dyn EarningsStore>> {
    match settings.storage {
        StorageKind::Database => {
            info!("Connecting to database: {}", settings.database_url);
            let db = Database::connect(&settings.database_url).await?;
            Ok(Arc::new(DatabaseStore::new(db)))
        }
        StorageKind::Memory => {
            warn!("Using in-memory storage, records will be lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Initialize application state from settings
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    let store = build_store(settings).await?;
    app_state_with_store(settings, store)
}

/// Wrap an already built store into application state
pub fn app_state_with_store(settings: &Settings, store: Arc<dyn EarningsStore>) -> Result<AppState> {
    let week_clock = settings.week_clock()?;
    let ledger = compute::default_ledger(store, Some(week_clock.offset()));

    info!(
        "Weeks aligned to UTC{:+} hours",
        week_clock.offset().local_minus_utc() / 3600
    );

    Ok(AppState {
        ledger: Arc::new(ledger),
        storage: settings.storage,
    })
}
