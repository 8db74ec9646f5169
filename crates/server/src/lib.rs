use api_types::cost::RawId;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{EngineError, UserId};

use serde::Serialize;
pub use server::{ServerState, app, run_with_listener};
pub use validation::ValidationError;

mod about;
mod costs;
mod report;
mod server;
mod user;
pub mod validation;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Validation(ValidationError),
    NotFound(String),
    Io(std::io::Error),
    Rejection(StatusCode, String),
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UserNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidUser(_)
        | EngineError::InvalidCost(_)
        | EngineError::InvalidCategory(_)
        | EngineError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    if let EngineError::Database(db_err) = &err {
        tracing::error!("database error: {db_err}");
    }
    err.to_string()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Validation(err) => {
                if let ValidationError::MissingFields { missing, .. } = &err {
                    tracing::debug!("request rejected, missing {}", missing.join(", "));
                }
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Io(err) => {
                tracing::error!("io error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ServerError::Rejection(status, err) => (status, err),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err)
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ValidationError> for ServerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Bad syntax, wrongly typed fields and a missing content type answer 400.
impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        let status = match &value {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => StatusCode::BAD_REQUEST,
            _ => value.status(),
        };
        Self::Rejection(status, value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Rejection(value.status(), value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Rejection(value.status(), value.body_text())
    }
}

/// Identifiers that are plain integers go back on the wire as JSON numbers,
/// everything else as strings.
fn wire_id(id: &UserId) -> RawId {
    match id.as_str().parse::<i64>() {
        Ok(n) if n.to_string() == id.as_str() => RawId::Integer(n),
        _ => RawId::Text(id.to_string()),
    }
}

fn map_category(category: engine::Category) -> api_types::Category {
    match category {
        engine::Category::Food => api_types::Category::Food,
        engine::Category::Health => api_types::Category::Health,
        engine::Category::Housing => api_types::Category::Housing,
        engine::Category::Sport => api_types::Category::Sport,
        engine::Category::Education => api_types::Category::Education,
    }
}
