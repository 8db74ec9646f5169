//! User endpoints

use api_types::user::UserTotal;
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, server::ServerState, validation, wire_id};

/// `GET /api/users/{id}`: user details plus the sum of all its costs.
pub async fn get_total(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ServerError>,
) -> Result<Json<UserTotal>, ServerError> {
    let id = validation::user_id_from_text("id", &id)?;
    let (user, total) = state.engine.user_total(&id).await?;

    Ok(Json(UserTotal {
        id: wire_id(&user.id),
        first_name: user.first_name,
        last_name: user.last_name,
        total,
    }))
}
