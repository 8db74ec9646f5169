use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QuerySelect, prelude::*, sea_query::Expr};

use crate::{Cost, NewCost, ResultEngine, UserId, costs};

use super::Engine;

impl Engine {
    /// Persist a cost without looking at the user table.
    ///
    /// `now` becomes the cost date when the caller did not provide one.
    pub async fn insert_cost(&self, new: NewCost, now: DateTime<Utc>) -> ResultEngine<Cost> {
        let cost = Cost::new(new, now)?;
        costs::ActiveModel::from(&cost)
            .insert(&self.database)
            .await?;
        tracing::debug!(
            "stored cost {} for user {} ({} {})",
            cost.id,
            cost.userid,
            cost.category,
            cost.sum
        );
        Ok(cost)
    }

    /// Persist a cost for an existing user.
    ///
    /// Fails with [`UserNotFound`](crate::EngineError::UserNotFound) before
    /// writing anything when the user is unknown.
    pub async fn add_cost(&self, new: NewCost, now: DateTime<Utc>) -> ResultEngine<Cost> {
        self.user(&new.userid).await?;
        self.insert_cost(new, now).await
    }

    /// Costs of `userid` with `start <= date < end`, in no particular order.
    pub async fn costs_in_range(
        &self,
        userid: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<Vec<Cost>> {
        costs::Entity::find()
            .filter(costs::Column::Userid.eq(userid.as_str()))
            .filter(costs::Column::Date.gte(start))
            .filter(costs::Column::Date.lt(end))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Cost::try_from)
            .collect()
    }

    /// Sum of every cost of `userid`; 0 when there are none.
    pub async fn total_for_user(&self, userid: &UserId) -> ResultEngine<f64> {
        let total: Option<Option<f64>> = costs::Entity::find()
            .select_only()
            .column_as(Expr::col(costs::Column::Sum).sum(), "total")
            .filter(costs::Column::Userid.eq(userid.as_str()))
            .into_tuple()
            .one(&self.database)
            .await?;
        Ok(total.flatten().unwrap_or(0.0))
    }
}
