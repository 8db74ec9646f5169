use crate::{MonthlyReport, ReportPeriod, ResultEngine, User, UserId, build_monthly_report};

use super::Engine;

impl Engine {
    /// Categorized costs of a user for one calendar month.
    pub async fn monthly_report(
        &self,
        userid: &UserId,
        period: ReportPeriod,
    ) -> ResultEngine<MonthlyReport> {
        self.user(userid).await?;
        let (start, end) = period.range(self.timezone)?;
        let costs = self.costs_in_range(userid, start, end).await?;
        Ok(build_monthly_report(
            userid.clone(),
            period,
            &costs,
            self.timezone,
        ))
    }

    /// A user together with the sum of all its costs.
    pub async fn user_total(&self, id: &UserId) -> ResultEngine<(User, f64)> {
        let user = self.user(id).await?;
        let total = self.total_for_user(id).await?;
        Ok((user, total))
    }
}
