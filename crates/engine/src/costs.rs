//! Cost primitives.
//!
//! A `Cost` is a single expense of a user. Costs are immutable once stored.

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, UserId};

/// Fixed set of spending categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Health,
    Housing,
    Sport,
    Education,
}

impl Category {
    /// Canonical report order.
    pub const ALL: [Category; 5] = [
        Self::Food,
        Self::Health,
        Self::Housing,
        Self::Sport,
        Self::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Health => "health",
            Self::Housing => "housing",
            Self::Sport => "sport",
            Self::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "food" => Ok(Self::Food),
            "health" => Ok(Self::Health),
            "housing" => Ok(Self::Housing),
            "sport" => Ok(Self::Sport),
            "education" => Ok(Self::Education),
            other => Err(EngineError::InvalidCategory(format!(
                "`{other}` is not one of food, health, housing, sport, education"
            ))),
        }
    }
}

/// A cost as submitted, before it gets an id and a date.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCost {
    pub description: String,
    pub category: Category,
    pub userid: UserId,
    pub sum: f64,
    /// `None` means "now" at insertion time.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub id: Uuid,
    pub description: String,
    pub category: Category,
    pub userid: UserId,
    pub sum: f64,
    pub date: DateTime<Utc>,
}

impl Cost {
    /// Turn a submitted cost into a storable one, stamping `now` when the
    /// caller did not provide a date.
    pub fn new(new: NewCost, now: DateTime<Utc>) -> ResultEngine<Self> {
        let description = new.description.trim();
        if description.is_empty() {
            return Err(EngineError::InvalidCost(
                "description must not be empty".to_string(),
            ));
        }
        if !new.sum.is_finite() {
            return Err(EngineError::InvalidCost("sum must be a number".to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            description: description.to_string(),
            category: new.category,
            userid: new.userid,
            sum: new.sum,
            date: new.date.unwrap_or(now),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "costs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub category: String,
    pub userid: String,
    pub sum: f64,
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Cost> for ActiveModel {
    fn from(cost: &Cost) -> Self {
        Self {
            id: ActiveValue::Set(cost.id.to_string()),
            description: ActiveValue::Set(cost.description.clone()),
            category: ActiveValue::Set(cost.category.as_str().to_string()),
            userid: ActiveValue::Set(cost.userid.as_str().to_string()),
            sum: ActiveValue::Set(cost.sum),
            date: ActiveValue::Set(cost.date),
        }
    }
}

impl TryFrom<Model> for Cost {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidCost(format!("invalid cost id {}", model.id)))?;
        Ok(Self {
            id,
            description: model.description,
            category: Category::try_from(model.category.as_str())?,
            userid: UserId::new(&model.userid)?,
            sum: model.sum,
            date: model.date,
        })
    }
}
