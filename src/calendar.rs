//! Calendar rollover detection.
//!
//! Once per elapsed second the screen manager compares the live time
//! against the last-rendered snapshot. Only the coarsest changed unit is
//! reported, so a year boundary yields `Year` alone even though month,
//! day, hour and minute all changed with it.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Wall-clock reading at minute resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Three-letter English month name; "???" outside 1..=12.
    pub fn month_abbrev(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        match self.month {
            1..=12 => NAMES[self.month as usize - 1],
            _ => "???",
        }
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(t: NaiveDateTime) -> Self {
        Self {
            year: t.year().clamp(0, u16::MAX as i32) as u16,
            month: t.month() as u8,
            day: t.day() as u8,
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

/// Which time unit rolled over since the last check.
///
/// Ordered by granularity: `Year` is the most significant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalendarEvent {
    #[default]
    None,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// Mirror of the last-rendered time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalendarCache {
    last: DateTime,
}

impl CalendarCache {
    pub const fn new(now: DateTime) -> Self {
        Self { last: now }
    }

    pub fn last(&self) -> DateTime {
        self.last
    }

    /// Overwrite the mirror after a full clock repaint.
    pub fn resync(&mut self, now: DateTime) {
        self.last = now;
    }
}

/// Compare `now` with `cache` and report the coarsest changed unit.
///
/// Whenever an event fires the whole cache is refreshed, since a coarser
/// change leaves every finer field stale as well.
pub fn check_rollover(now: &DateTime, cache: &mut CalendarCache) -> CalendarEvent {
    let last = &cache.last;
    let event = if now.year != last.year {
        CalendarEvent::Year
    } else if now.month != last.month {
        CalendarEvent::Month
    } else if now.day != last.day {
        CalendarEvent::Day
    } else if now.hour != last.hour {
        CalendarEvent::Hour
    } else if now.minute != last.minute {
        CalendarEvent::Minute
    } else {
        CalendarEvent::None
    };

    if event != CalendarEvent::None {
        #[cfg(feature = "defmt")]
        defmt::debug!("Calendar: {} rollover", event);
        cache.last = *now;
    }
    event
}

/// External wall-clock source (RTC driver).
pub trait TimeSource {
    fn now(&mut self) -> DateTime;
}

/// Wall clock derived from a boot epoch plus monotonic uptime.
///
/// `uptime` returns whole seconds since boot.
pub struct EpochClock<F> {
    epoch_secs: i64,
    uptime: F,
}

impl<F: FnMut() -> u64> EpochClock<F> {
    pub fn new(epoch_secs: i64, uptime: F) -> Self {
        Self { epoch_secs, uptime }
    }
}

impl<F: FnMut() -> u64> TimeSource for EpochClock<F> {
    fn now(&mut self) -> DateTime {
        let secs = self
            .epoch_secs
            .saturating_add(i64::try_from((self.uptime)()).unwrap_or(i64::MAX));
        chrono::DateTime::from_timestamp(secs, 0)
            .map(|t| DateTime::from(t.naive_utc()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_day_midnight_reports_day_only() {
        let mut cache = CalendarCache::new(DateTime::new(2024, 2, 28, 23, 59));
        let now = DateTime::new(2024, 2, 29, 0, 0);
        assert_eq!(check_rollover(&now, &mut cache), CalendarEvent::Day);
        assert_eq!(cache.last(), now);
        assert_eq!(check_rollover(&now, &mut cache), CalendarEvent::None);
    }

    #[test]
    fn coarsest_unit_wins() {
        let mut cache = CalendarCache::new(DateTime::new(2023, 12, 31, 23, 59));
        assert_eq!(
            check_rollover(&DateTime::new(2024, 1, 1, 0, 0), &mut cache),
            CalendarEvent::Year
        );
        assert_eq!(
            check_rollover(&DateTime::new(2024, 2, 1, 0, 0), &mut cache),
            CalendarEvent::Month
        );
        assert_eq!(
            check_rollover(&DateTime::new(2024, 2, 1, 1, 0), &mut cache),
            CalendarEvent::Hour
        );
        assert_eq!(
            check_rollover(&DateTime::new(2024, 2, 1, 1, 1), &mut cache),
            CalendarEvent::Minute
        );
    }

    #[test]
    fn unchanged_time_leaves_cache_alone() {
        let start = DateTime::new(2024, 5, 5, 5, 5);
        let mut cache = CalendarCache::new(start);
        assert_eq!(check_rollover(&start, &mut cache), CalendarEvent::None);
        assert_eq!(cache.last(), start);
    }

    #[test]
    fn events_are_ordered_by_granularity() {
        assert!(CalendarEvent::Year > CalendarEvent::Month);
        assert!(CalendarEvent::Minute > CalendarEvent::None);
    }

    #[test]
    fn epoch_clock_adds_uptime() {
        // 2024-02-28 23:59:30 UTC
        let mut uptime = 0u64;
        let mut clock = EpochClock::new(1_709_164_770, || {
            uptime += 30;
            uptime
        });
        assert_eq!(clock.now(), DateTime::new(2024, 2, 29, 0, 0));
        assert_eq!(clock.now().month_abbrev(), "Feb");
    }
}
