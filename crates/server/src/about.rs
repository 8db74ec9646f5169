//! Team information, served straight from disk.

use std::io::ErrorKind;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{ServerError, server::ServerState};

/// `GET /api/about`
pub async fn get(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let body = tokio::fs::read(state.about.as_path())
        .await
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => {
                tracing::warn!("team file {} not found", state.about.display());
                ServerError::NotFound("Not Found".to_string())
            }
            _ => ServerError::Io(err),
        })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
