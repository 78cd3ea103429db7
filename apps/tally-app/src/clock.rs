//! # Clock
//!
//! Time source for meal timestamps and the on-screen clock. Both are shown
//! in Malaysia time (UTC+08:00) unless configured otherwise.
//!
//! | Use              | Format                   | Example                  |
//! |------------------|--------------------------|--------------------------|
//! | Meal timestamp   | medium date, short time  | `19 Oct 2026, 3:45 pm`   |
//! | Clock display    | medium date, 24h seconds | `19 Oct 2026, 15:45:12`  |

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Malaysia's offset from UTC, in hours.
pub const MALAYSIA_UTC_OFFSET_HOURS: i32 = 8;

/// `19 Oct 2026, 3:45 pm`
pub const MEAL_TIMESTAMP_FORMAT: &str = "%-d %b %Y, %-I:%M %P";

/// `19 Oct 2026, 15:45:12`
pub const CLOCK_DISPLAY_FORMAT: &str = "%-d %b %Y, %H:%M:%S";

/// Current-time source.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use tally_app::clock::{Clock, FixedClock};
///
/// let time = Utc.with_ymd_and_hms(2026, 10, 19, 7, 45, 12).unwrap();
/// assert_eq!(FixedClock::new(time).now(), time);
/// ```
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant. For tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(time: DateTime<Utc>) -> Self {
        FixedClock { time }
    }

    pub fn set(&mut self, time: DateTime<Utc>) {
        self.time = time;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Offset for `hours` east of UTC, or `None` if out of range.
pub fn utc_offset(hours: i32) -> Option<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
}

/// Offset for `hours`, falling back to UTC when out of range.
pub fn utc_offset_or_utc(hours: i32) -> FixedOffset {
    utc_offset(hours).unwrap_or_else(|| Utc.fix())
}

/// Meal log timestamp, e.g. `19 Oct 2026, 3:45 pm`.
pub fn meal_timestamp(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format(MEAL_TIMESTAMP_FORMAT)
        .to_string()
}

/// Clock text, e.g. `19 Oct 2026, 15:45:12`.
pub fn clock_display(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format(CLOCK_DISPLAY_FORMAT)
        .to_string()
}
