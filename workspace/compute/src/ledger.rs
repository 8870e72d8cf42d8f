use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace};

use crate::clock::Clock;
use crate::earnings::{EarningsRecord, EarningsUpdate, NewEarningsRecord, RawEarnings};
use crate::error::Result;
use crate::store::EarningsStore;
use crate::week::{WeekClock, WeekInfo, WeekInterval};

/// Owns the weekly earnings records and keeps their derived figures in step with the inputs.
///
/// The ledger resolves "the current week" from its clock on every call, so a
/// week rolls over as soon as the clock crosses the local Monday midnight.
#[derive(Debug)]
pub struct EarningsLedger {
    store: Arc<dyn EarningsStore>,
    clock: Arc<dyn Clock>,
    week_clock: WeekClock,
    // Held across lookup, merge and store so two writers cannot both create the week
    write_lock: Mutex<()>,
}

impl EarningsLedger {
    pub fn new(store: Arc<dyn EarningsStore>, clock: Arc<dyn Clock>, week_clock: WeekClock) -> Self {
        Self {
            store,
            clock,
            week_clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn week_clock(&self) -> &WeekClock {
        &self.week_clock
    }

    pub fn current_week(&self) -> WeekInterval {
        self.week_clock.current_week(self.clock.now())
    }

    pub fn week_info(&self) -> WeekInfo {
        self.week_clock.week_info(self.clock.now())
    }

    /// The record of the current week, if one was written. Never creates it.
    #[instrument(skip(self))]
    pub async fn get_current(&self) -> Result<Option<EarningsRecord>> {
        let week = self.current_week();
        trace!("Looking up current week starting {}", week.start());
        self.store.find_by_week(&week).await
    }

    /// The record of the week before the current one, if one was written.
    #[instrument(skip(self))]
    pub async fn get_previous(&self) -> Result<Option<EarningsRecord>> {
        let week = self.current_week().previous();
        trace!("Looking up previous week starting {}", week.start());
        self.store.find_by_week(&week).await
    }

    /// Full history, most recent week first. Weeks with equal starts keep insertion order.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<EarningsRecord>> {
        let mut records = self.store.list().await?;
        records.sort_by(|a, b| b.week.start().cmp(&a.week.start()));
        debug!("Loaded {} weekly records", records.len());
        Ok(records)
    }

    /// Applies `update` to the current week, creating the week with zero inputs first if needed.
    ///
    /// Validation happens before anything is read, so a rejected update leaves the
    /// stored record untouched. A newly created week is written once, with the
    /// overrides already applied.
    #[instrument(skip(self))]
    pub async fn upsert_current(&self, update: EarningsUpdate) -> Result<EarningsRecord> {
        update.validate()?;

        let _guard = self.write_lock.lock().await;
        let week = self.current_week();

        match self.store.find_by_week(&week).await? {
            Some(existing) => {
                let inputs = existing.inputs.apply(&update);
                let record = self.store.update(existing.with_inputs(inputs)).await?;
                debug!("Updated earnings for week starting {}", week.start());
                Ok(record)
            }
            None => {
                let inputs = RawEarnings::default().apply(&update);
                let record = self
                    .store
                    .insert(NewEarningsRecord::new(week, inputs, self.clock.now()))
                    .await?;
                info!("Started earnings record {} for week starting {}", record.id, week.start());
                Ok(record)
            }
        }
    }

    /// Checks the backing store is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}
