//! Users are created out-of-band and only read by the API.
//!
//! The identifier is opaque: whatever the caller sent (`"u1"`, `123123`) is
//! normalized to its textual form and compared as a string.

use std::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// External identifier of a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Build an identifier, rejecting blank input.
    pub fn new(raw: &str) -> ResultEngine<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidUser(
                "user id must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub marital_status: Option<String>,
}

impl User {
    pub fn new(
        id: UserId,
        first_name: &str,
        last_name: &str,
        birthday: Option<NaiveDate>,
        marital_status: Option<&str>,
    ) -> ResultEngine<Self> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(EngineError::InvalidUser(
                "first_name and last_name are required".to_string(),
            ));
        }
        Ok(Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birthday,
            marital_status: marital_status
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub marital_status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: UserId(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            birthday: model.birthday,
            marital_status: model.marital_status,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: ActiveValue::Set(user.id.as_str().to_string()),
            first_name: ActiveValue::Set(user.first_name.clone()),
            last_name: ActiveValue::Set(user.last_name.clone()),
            birthday: ActiveValue::Set(user.birthday),
            marital_status: ActiveValue::Set(user.marital_status.clone()),
        }
    }
}
