use chrono::{DateTime, Datelike, TimeZone};
use std::str::FromStr;

/// A calendar year-month, written `YYYY-MM`.
///
/// Ordering is chronological, so sorting descending puts the most recent
/// month first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of<Tz: TimeZone>(date: &DateTime<Tz>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Invalid month '{s}', expected YYYY-MM"))?;
        if year.len() != 4 || month.len() != 2 {
            anyhow::bail!("Invalid month '{s}', expected YYYY-MM");
        }
        let year: i32 = year
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid month in '{s}'"))?;
        Self::new(year, month).ok_or_else(|| anyhow::anyhow!("Month out of range in '{s}'"))
    }
}

/// Which expenses the summary covers: everything, or a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(MonthKey),
}

impl MonthFilter {
    pub const ALL_KEY: &'static str = "all";

    pub fn matches(&self, key: MonthKey) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => *m == key,
        }
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{}", Self::ALL_KEY),
            Self::Month(m) => write!(f, "{m}"),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::ALL_KEY) {
            Ok(Self::All)
        } else {
            Ok(Self::Month(s.parse()?))
        }
    }
}
