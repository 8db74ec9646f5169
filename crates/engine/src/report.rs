//! Monthly report construction.
//!
//! The builder is pure: the engine fetches the costs of the month and hands
//! them over, the builder only partitions and projects them.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{Category, Cost, EngineError, ResultEngine, UserId};

/// A calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod(format!(
                "year {year} is out of range"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns `[start, end)` in UTC, where both bounds are local midnight of
    /// the first day of this month and of the next one.
    pub fn range(&self, tz: Tz) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let start = first_of_month(self.year, self.month)?;
        let end = first_of_month(next_year, next_month)?;
        Ok((local_midnight(tz, start)?, local_midnight(tz, end)?))
    }
}

fn first_of_month(year: i32, month: u32) -> ResultEngine<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::InvalidPeriod(format!("invalid month {year}-{month}")))
}

fn local_midnight(tz: Tz, date: NaiveDate) -> ResultEngine<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            EngineError::InvalidPeriod(format!("midnight of {date} does not exist in {tz}"))
        })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub sum: f64,
    pub description: String,
    /// Day of month, 1-based.
    pub day: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryCosts {
    pub category: Category,
    pub items: Vec<ReportItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub userid: UserId,
    pub year: i32,
    pub month: u32,
    /// One entry per category, in [`Category::ALL`] order.
    pub costs: Vec<CategoryCosts>,
}

/// Partition `costs` into the fixed categories, keeping input order inside
/// each bucket.
pub fn build_monthly_report(
    userid: UserId,
    period: ReportPeriod,
    costs: &[Cost],
    tz: Tz,
) -> MonthlyReport {
    let costs = Category::ALL
        .into_iter()
        .map(|category| CategoryCosts {
            category,
            items: costs
                .iter()
                .filter(|cost| cost.category == category)
                .map(|cost| ReportItem {
                    sum: cost.sum,
                    description: cost.description.clone(),
                    day: cost.date.with_timezone(&tz).day(),
                })
                .collect(),
        })
        .collect();

    MonthlyReport {
        userid,
        year: period.year,
        month: period.month,
        costs,
    }
}
