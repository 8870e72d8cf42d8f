//! Persistence seam of the ledger.
//!
//! A store only keeps what the ledger hands it; it never computes derived
//! figures and never picks the current week.

pub mod database;
pub mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::earnings::{EarningsRecord, NewEarningsRecord};
use crate::error::Result;
use crate::week::WeekInterval;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait EarningsStore: Send + Sync + fmt::Debug {
    /// Looks a record up by its week interval (value equality on both bounds).
    async fn find_by_week(&self, week: &WeekInterval) -> Result<Option<EarningsRecord>>;

    /// Persists a new record and returns it with its assigned id.
    /// Fails if the week already has a record.
    async fn insert(&self, record: NewEarningsRecord) -> Result<EarningsRecord>;

    /// Overwrites the inputs and derived figures of an existing record.
    async fn update(&self, record: EarningsRecord) -> Result<EarningsRecord>;

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<EarningsRecord>>;

    /// Checks the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
