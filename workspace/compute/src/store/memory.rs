use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::EarningsStore;
use crate::earnings::{EarningsRecord, NewEarningsRecord};
use crate::error::{LedgerError, Result};
use crate::week::WeekInterval;

#[derive(Debug)]
struct Inner {
    next_id: i32,
    records: Vec<EarningsRecord>,
}

/// Process-local store; its contents are lost on restart.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl EarningsStore for MemoryStore {
    async fn find_by_week(&self, week: &WeekInterval) -> Result<Option<EarningsRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|record| record.week == *week).cloned())
    }

    #[instrument(skip(self))]
    async fn insert(&self, record: NewEarningsRecord) -> Result<EarningsRecord> {
        let mut inner = self.inner.write().await;
        if inner.records.iter().any(|existing| existing.week == record.week) {
            return Err(LedgerError::Storage(format!(
                "week starting {} already has a record",
                record.week.start()
            )));
        }

        let record = record.with_id(inner.next_id);
        inner.next_id += 1;
        inner.records.push(record.clone());
        debug!("Stored earnings record {} in memory", record.id);
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn update(&self, record: EarningsRecord) -> Result<EarningsRecord> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .records
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or_else(|| LedgerError::Storage(format!("earnings record {} does not exist", record.id)))?;

        slot.inputs = record.inputs;
        slot.breakdown = record.breakdown;
        Ok(slot.clone())
    }

    async fn list(&self) -> Result<Vec<EarningsRecord>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earnings::RawEarnings;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn week(day: u32) -> WeekInterval {
        WeekInterval::starting_at(Utc.with_ymd_and_hms(2025, 6, day, 22, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let first = store.insert(NewEarningsRecord::new(week(1), RawEarnings::default(), now)).await.unwrap();
        let second = store.insert(NewEarningsRecord::new(week(8), RawEarnings::default(), now)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_duplicate_week_is_rejected() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store.insert(NewEarningsRecord::new(week(1), RawEarnings::default(), now)).await.unwrap();
        let duplicate = store.insert(NewEarningsRecord::new(week(1), RawEarnings::default(), now)).await;

        assert!(matches!(duplicate, Err(LedgerError::Storage(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_and_update_by_week() {
        let store = MemoryStore::new();
        let stored = store
            .insert(NewEarningsRecord::new(week(8), RawEarnings::default(), Utc::now()))
            .await
            .unwrap();

        let inputs = RawEarnings {
            uber_gross: Decimal::new(1200, 0),
            ..Default::default()
        };
        let updated = store.update(stored.clone().with_inputs(inputs)).await.unwrap();
        assert_eq!(updated.breakdown.fixed_deduction, Decimal::new(45, 0));

        let found = store.find_by_week(&week(8)).await.unwrap().unwrap();
        assert_eq!(found, updated);
        assert!(store.find_by_week(&week(15)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_record_fails() {
        let store = MemoryStore::new();
        let orphan = NewEarningsRecord::new(week(1), RawEarnings::default(), Utc::now()).with_id(42);
        assert!(store.update(orphan).await.is_err());
    }
}
