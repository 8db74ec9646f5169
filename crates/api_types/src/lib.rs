use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Health,
    Housing,
    Sport,
    Education,
}

pub mod cost {
    use super::*;

    /// Identifier on the wire: `"u1"` or `123123`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RawId {
        Integer(i64),
        Text(String),
    }

    /// Amount as the client sent it: `10`, `10.5` or `"10.5"`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RawAmount {
        Number(f64),
        Text(String),
    }

    /// Request body of `POST /api/add`.
    ///
    /// Every field is optional at the wire level so that a missing field
    /// produces the "missing parameters" error instead of a decoding error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CostNew {
        pub description: Option<String>,
        pub category: Option<String>,
        pub userid: Option<RawId>,
        pub sum: Option<RawAmount>,
        /// ISO-8601 date or timestamp.
        pub date: Option<String>,
    }

    /// A stored cost.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Cost {
        pub id: Uuid,
        pub description: String,
        pub category: Category,
        pub userid: RawId,
        pub sum: f64,
        pub date: DateTime<Utc>,
    }
}

pub mod report {
    use std::collections::BTreeMap;

    use super::{cost::RawId, *};

    /// Query string of `GET /api/report`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ReportQuery {
        pub id: Option<String>,
        pub year: Option<String>,
        pub month: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ReportItem {
        pub sum: f64,
        pub description: String,
        pub day: u32,
    }

    /// One category bucket, serialized as `{ "<category>": [items] }`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(
        try_from = "BTreeMap<Category, Vec<ReportItem>>",
        into = "BTreeMap<Category, Vec<ReportItem>>"
    )]
    pub struct CategoryCosts {
        pub category: Category,
        pub items: Vec<ReportItem>,
    }

    impl From<CategoryCosts> for BTreeMap<Category, Vec<ReportItem>> {
        fn from(value: CategoryCosts) -> Self {
            BTreeMap::from([(value.category, value.items)])
        }
    }

    impl TryFrom<BTreeMap<Category, Vec<ReportItem>>> for CategoryCosts {
        type Error = String;

        fn try_from(value: BTreeMap<Category, Vec<ReportItem>>) -> Result<Self, Self::Error> {
            if value.len() != 1 {
                return Err(format!(
                    "expected exactly one category per entry, got {}",
                    value.len()
                ));
            }
            let (category, items) = value
                .into_iter()
                .next()
                .ok_or_else(|| "empty category entry".to_string())?;
            Ok(Self { category, items })
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Report {
        pub userid: RawId,
        pub year: i32,
        pub month: u32,
        pub costs: Vec<CategoryCosts>,
    }
}

pub mod user {
    use super::{cost::RawId, *};

    /// Response of `GET /api/users/{id}`.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserTotal {
        pub id: RawId,
        pub first_name: String,
        pub last_name: String,
        pub total: f64,
    }
}
