use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The fixed-length span of calendar days currently rendered.
///
/// Covers `[anchor, anchor + length days)` in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    /// Local midnight of the first visible day.
    pub anchor: NaiveDateTime,
    /// Number of visible days, at least 1.
    pub length: u32,
}

impl DisplayWindow {
    pub fn new(first_day: NaiveDate, length: u32) -> Self {
        Self {
            anchor: first_day.and_time(chrono::NaiveTime::MIN),
            length: length.max(1),
        }
    }

    /// Window whose first day is today.
    pub fn starting_today(length: u32) -> Self {
        Self::new(Local::now().date_naive(), length)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.anchor.date()
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> NaiveDateTime {
        self.day_start(i64::from(self.length))
    }

    /// Local midnight of the day `index` days after the anchor.
    pub fn day_start(&self, index: i64) -> NaiveDateTime {
        self.anchor + Duration::days(index)
    }

    /// Continuous day offset of an instant from the anchor.
    pub fn day_offset(&self, instant: NaiveDateTime) -> f64 {
        (instant - self.anchor).num_milliseconds() as f64 / MS_PER_DAY as f64
    }

    /// Whole day index containing `instant` (floor).
    pub fn day_index(&self, instant: NaiveDateTime) -> i64 {
        (instant - self.anchor).num_milliseconds().div_euclid(MS_PER_DAY)
    }

    pub fn contains_day(&self, index: i64) -> bool {
        (0..i64::from(self.length)).contains(&index)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..i64::from(self.length)).map(|i| self.day_start(i).date())
    }

    pub fn shift_days(&mut self, days: i64) {
        self.anchor += Duration::days(days);
    }

    /// Advance by one full window.
    pub fn next(&mut self) {
        self.shift_days(i64::from(self.length));
    }

    /// Step back by one full window.
    pub fn previous(&mut self) {
        self.shift_days(-i64::from(self.length));
    }
}

/// Whole days (`ceil`) spanned by `[start, end)`, at least 1.
pub fn span_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let ms = (end - start).num_milliseconds();
    let days = ms.div_euclid(MS_PER_DAY) + i64::from(ms.rem_euclid(MS_PER_DAY) != 0);
    days.max(1)
}

/// Map a wall-clock value back onto the local timezone.
///
/// Ambiguous times take the earlier mapping; times inside a DST gap move
/// forward by one hour.
pub fn to_local(naive: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}
