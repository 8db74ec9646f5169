use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod costs;
mod reports;
mod users;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    timezone: Tz,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Time zone used to cut months and to read the day of a cost.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    timezone: Option<Tz>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Reporting time zone, UTC when not set.
    pub fn timezone(mut self, tz: Tz) -> EngineBuilder {
        self.timezone = Some(tz);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
            timezone: self.timezone.unwrap_or(Tz::UTC),
        })
    }
}
