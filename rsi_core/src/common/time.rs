use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Wall-clock view of a candle's epoch-second timestamp (UTC).
#[derive(Debug, Clone, Copy)]
pub struct CTime {
    pub ts: i64,
    datetime: NaiveDateTime,
}

impl CTime {
    pub fn from_timestamp(ts: i64) -> Option<Self> {
        let datetime = DateTime::from_timestamp(ts, 0)?.naive_utc();
        Some(Self { ts, datetime })
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    pub fn to_date_str(&self, splt: &str) -> String {
        format!(
            "{:04}{}{:02}{}{:02}",
            self.year(),
            splt,
            self.month(),
            splt,
            self.day()
        )
    }
}

impl fmt::Display for CTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hour() == 0 && self.minute() == 0 {
            write!(f, "{:04}/{:02}/{:02}", self.year(), self.month(), self.day())
        } else {
            write!(
                f,
                "{:04}/{:02}/{:02} {:02}:{:02}",
                self.year(),
                self.month(),
                self.day(),
                self.hour(),
                self.minute()
            )
        }
    }
}

impl PartialEq for CTime {
    fn eq(&self, other: &Self) -> bool {
        self.ts == other.ts
    }
}

impl Eq for CTime {}

impl PartialOrd for CTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ts.cmp(&other.ts)
    }
}
