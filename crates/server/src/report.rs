//! Monthly report endpoint

use api_types::report::{CategoryCosts, Report, ReportItem, ReportQuery};
use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, map_category, server::ServerState, validation, wire_id};

fn map_report(report: engine::MonthlyReport) -> Report {
    Report {
        userid: wire_id(&report.userid),
        year: report.year,
        month: report.month,
        costs: report
            .costs
            .into_iter()
            .map(|bucket| CategoryCosts {
                category: map_category(bucket.category),
                items: bucket
                    .items
                    .into_iter()
                    .map(|item| ReportItem {
                        sum: item.sum,
                        description: item.description,
                        day: item.day,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// `GET /api/report?id=..&year=..&month=..`
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<ReportQuery>, ServerError>,
) -> Result<Json<Report>, ServerError> {
    tracing::debug!(
        "report requested for id={:?} year={:?} month={:?}",
        query.id,
        query.year,
        query.month
    );
    let (userid, period) = validation::validate_report_query(query)?;
    let report = state.engine.monthly_report(&userid, period).await?;
    Ok(Json(map_report(report)))
}
