//! Request validation.
//!
//! Everything here is pure: raw wire values go in, engine types come out.
//! A value counts as missing when it is absent, empty or zero.

use api_types::{
    cost::{CostNew, RawAmount, RawId},
    report::ReportQuery,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use engine::{Category, NewCost, ReportPeriod, Tz, UserId};
use thiserror::Error;

pub(crate) const COST_FIELDS: &[&str] = &["description", "category", "userid", "sum"];
pub(crate) const REPORT_FIELDS: &[&str] = &["id", "year", "month"];

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The message always lists every required field of the operation,
    /// `missing` says which ones were actually absent.
    #[error(
        "Missing one or more from the required query parameters: {}",
        list_fields(.required)
    )]
    MissingFields {
        required: &'static [&'static str],
        missing: Vec<&'static str>,
    },
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn list_fields(fields: &[&str]) -> String {
    match fields.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => (*last).to_string(),
        None => String::new(),
    }
}

fn present_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn present_id(value: Option<RawId>) -> Option<RawId> {
    value.filter(|id| match id {
        RawId::Integer(n) => *n != 0,
        RawId::Text(s) => !s.is_empty(),
    })
}

fn present_amount(value: Option<RawAmount>) -> Option<RawAmount> {
    value.filter(|amount| match amount {
        RawAmount::Number(n) => *n != 0.0 && !n.is_nan(),
        RawAmount::Text(s) => !s.is_empty(),
    })
}

/// Check the body of an add-cost request and convert it.
pub fn validate_cost_input(input: CostNew, tz: Tz) -> Result<NewCost, ValidationError> {
    let description = present_text(input.description);
    let category = present_text(input.category);
    let userid = present_id(input.userid);
    let sum = present_amount(input.sum);

    let (Some(description), Some(category), Some(userid), Some(sum)) =
        (&description, &category, &userid, &sum)
    else {
        let missing = [
            description.is_none(),
            category.is_none(),
            userid.is_none(),
            sum.is_none(),
        ]
        .into_iter()
        .zip(COST_FIELDS)
        .filter_map(|(absent, field)| absent.then_some(*field))
        .collect();
        return Err(ValidationError::MissingFields {
            required: COST_FIELDS,
            missing,
        });
    };

    let category =
        Category::try_from(category.as_str()).map_err(|_| ValidationError::Invalid {
            field: "category",
            reason: format!(
                "`{category}` is not one of food, health, housing, sport or education"
            ),
        })?;
    let userid = parse_user_id(userid)?;
    let sum = parse_sum(sum)?;
    let date = present_text(input.date)
        .map(|raw| parse_cost_date(&raw, tz))
        .transpose()?;

    Ok(NewCost {
        description: description.clone(),
        category,
        userid,
        sum,
        date,
    })
}

/// Check the query of a report request.
pub fn validate_report_query(query: ReportQuery) -> Result<(UserId, ReportPeriod), ValidationError> {
    let trimmed = |v: Option<String>| present_text(v.map(|s| s.trim().to_string()));
    let id = trimmed(query.id);
    let year = trimmed(query.year);
    let month = trimmed(query.month);

    let (Some(id), Some(year), Some(month)) = (&id, &year, &month) else {
        let missing = [id.is_none(), year.is_none(), month.is_none()]
            .into_iter()
            .zip(REPORT_FIELDS)
            .filter_map(|(absent, field)| absent.then_some(*field))
            .collect();
        return Err(ValidationError::MissingFields {
            required: REPORT_FIELDS,
            missing,
        });
    };

    let userid = user_id_from_text("id", id)?;
    let year: i32 = year.parse().map_err(|_| ValidationError::Invalid {
        field: "year",
        reason: format!("`{year}` is not an integer"),
    })?;
    let month: u32 = month.parse().map_err(|_| ValidationError::Invalid {
        field: "month",
        reason: format!("`{month}` is not an integer"),
    })?;
    let period = ReportPeriod::new(year, month).map_err(|err| ValidationError::Invalid {
        field: "period",
        reason: err.to_string(),
    })?;

    Ok((userid, period))
}

/// Normalize a client identifier to the opaque form used for lookups.
pub fn parse_user_id(raw: &RawId) -> Result<UserId, ValidationError> {
    match raw {
        RawId::Integer(n) => user_id_from_text("userid", &n.to_string()),
        RawId::Text(s) => user_id_from_text("userid", s),
    }
}

pub(crate) fn user_id_from_text(field: &'static str, raw: &str) -> Result<UserId, ValidationError> {
    UserId::new(raw).map_err(|err| ValidationError::Invalid {
        field,
        reason: err.to_string(),
    })
}

fn parse_sum(raw: &RawAmount) -> Result<f64, ValidationError> {
    let value = match raw {
        RawAmount::Number(n) => Some(*n),
        RawAmount::Text(s) => s.trim().parse::<f64>().ok(),
    };
    value
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::Invalid {
            field: "sum",
            reason: match raw {
                RawAmount::Number(n) => format!("`{n}` is not a number"),
                RawAmount::Text(s) => format!("`{s}` is not a number"),
            },
        })
}

/// Parse the optional date of a cost.
///
/// RFC 3339 input keeps its offset. Dates and timestamps without an offset
/// are read as local time in `tz`.
pub fn parse_cost_date(raw: &str, tz: Tz) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let invalid = |reason: String| ValidationError::Invalid {
        field: "date",
        reason,
    };
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| invalid(format!("`{raw}` is not an ISO-8601 date")))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| invalid(format!("`{raw}` does not exist in {tz}")))
}
