use axum::{
    Router, ServiceExt,
    extract::Request,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use std::{any::Any, path::PathBuf, sync::Arc};

use crate::{ServerError, about, costs, report, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// JSON file served as-is by `/api/about`.
    pub about: Arc<PathBuf>,
}

impl ServerState {
    pub fn new(engine: Engine, about: impl Into<PathBuf>) -> Self {
        Self {
            engine: Arc::new(engine),
            about: Arc::new(about.into()),
        }
    }
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Not Found".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "internal server error".to_string()
    };
    tracing::error!("handler panicked: {message}");
    ServerError::Internal(message).into_response()
}

fn api() -> Router<ServerState> {
    Router::new()
        .route("/add", post(costs::add))
        .route("/report", get(report::get))
        .route("/users/{id}", get(user::get_total))
        .route("/about", get(about::get))
        .method_not_allowed_fallback(not_found)
}

/// All routes, without trailing-slash normalization.
fn router(state: ServerState) -> Router {
    Router::new()
        .nest("/api", api())
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The service actually served: `/api/report/` and `/api/report` are the
/// same route.
pub fn app(state: ServerState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state))).await
}
