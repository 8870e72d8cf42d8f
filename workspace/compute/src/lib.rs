pub mod clock;
pub mod earnings;
pub mod error;
pub mod ledger;
pub mod store;
pub mod week;

use std::sync::Arc;

use chrono::FixedOffset;
use clock::SystemClock;
use ledger::EarningsLedger;
use store::EarningsStore;
use week::WeekClock;

/// Returns a ledger reading wall-clock time, which is what the service uses outside of tests.
///
/// `offset` is the fixed UTC offset the weeks are aligned to (GMT+2 unless configured otherwise).
pub fn default_ledger(store: Arc<dyn EarningsStore>, offset: Option<FixedOffset>) -> EarningsLedger {
    let week_clock = offset.map(WeekClock::new).unwrap_or_default();
    EarningsLedger::new(store, Arc::new(SystemClock), week_clock)
}
