//! Week boundary resolution.
//!
//! Weeks run Monday 00:00:00.000 to Sunday 23:59:59.999 in a fixed UTC offset
//! (no daylight saving). Every boundary is derived from the local Monday that
//! starts the week, so two readings taken inside the same local week always
//! produce identical intervals.

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    Utc,
};

/// Offset used when none is configured: GMT+2.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 2;

const DAYS_PER_WEEK: i64 = 7;

/// Composite identity of a weekly record: the first and last instant of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl WeekInterval {
    /// Builds the week that begins at `start`.
    ///
    /// The end is the last millisecond of the sixth day after `start`.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        let end = shift(shift(start, Duration::days(DAYS_PER_WEEK)), -Duration::milliseconds(1));
        Self { start, end }
    }

    /// Rebuilds an interval from bounds read back from storage.
    pub(crate) fn from_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The week immediately before this one.
    pub fn previous(&self) -> Self {
        Self::starting_at(shift(self.start, -Duration::days(DAYS_PER_WEEK)))
    }

    /// The instant this week rolls over into the next one.
    pub fn next_start(&self) -> DateTime<Utc> {
        shift(self.start, Duration::days(DAYS_PER_WEEK))
    }
}

/// Snapshot of the week boundaries relative to one clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekInfo {
    pub current_week: WeekInterval,
    pub previous_week: WeekInterval,
    pub next_reset: DateTime<Utc>,
}

/// Maps instants to the week they fall in, for a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekClock {
    offset: FixedOffset,
}

impl Default for WeekClock {
    fn default() -> Self {
        Self::from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or(Self::new(Utc.fix()))
    }
}

impl WeekClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Returns `None` when `hours` is not a valid offset (outside -23..=23).
    pub fn from_hours(hours: i32) -> Option<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local Monday 00:00 of the week containing `now`.
    pub fn week_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let offset = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        let local = now.naive_utc().checked_add_signed(offset).unwrap_or(
            if offset < Duration::zero() {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            },
        );

        let day = local.date();
        // Monday steps back 0 days, Sunday steps back 6
        let back = u64::from(day.weekday().num_days_from_monday());
        let monday = day.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);

        monday
            .and_time(NaiveTime::MIN)
            .checked_sub_signed(offset)
            .map(|naive| naive.and_utc())
            .unwrap_or(if offset > Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    pub fn current_week(&self, now: DateTime<Utc>) -> WeekInterval {
        WeekInterval::starting_at(self.week_start(now))
    }

    pub fn previous_week(&self, now: DateTime<Utc>) -> WeekInterval {
        self.current_week(now).previous()
    }

    /// Local Monday 00:00 of the week after the one containing `now`.
    pub fn next_reset(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.current_week(now).next_start()
    }

    pub fn week_info(&self, now: DateTime<Utc>) -> WeekInfo {
        let current_week = self.current_week(now);
        WeekInfo {
            current_week,
            previous_week: current_week.previous(),
            next_reset: current_week.next_start(),
        }
    }
}

/// Adds `delta`, saturating at the representable range instead of panicking.
fn shift(instant: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    instant.checked_add_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
