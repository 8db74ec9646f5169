//! Data access for the cost manager.
//!
//! [`Engine`] owns the database connection and exposes the typed operations
//! the HTTP layer needs: user lookups, cost insertion, range queries and
//! aggregation. Report shaping lives in [`report`] and is pure.

pub use costs::{Category, Cost, NewCost};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use report::{CategoryCosts, MonthlyReport, ReportItem, ReportPeriod, build_monthly_report};
pub use users::{User, UserId};

pub use chrono_tz::Tz;

pub mod costs;
mod error;
mod ops;
pub mod report;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
