//! Cost API endpoints

use api_types::cost::{Cost, CostNew};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use crate::{ServerError, map_category, server::ServerState, validation, wire_id};

fn map_cost(cost: engine::Cost) -> Cost {
    Cost {
        id: cost.id,
        description: cost.description,
        category: map_category(cost.category),
        userid: wire_id(&cost.userid),
        sum: cost.sum,
        date: cost.date,
    }
}

/// `POST /api/add`: store a cost for an existing user.
pub async fn add(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<CostNew>, ServerError>,
) -> Result<(StatusCode, Json<Cost>), ServerError> {
    let new = validation::validate_cost_input(payload, state.engine.timezone())?;
    let cost = state.engine.add_cost(new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(map_cost(cost))))
}
