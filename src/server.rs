//! The HTTP interface.
//!
//! A single route, `POST /solve`, accepts `{"equation": "..."}` and replies
//! with either `{"solution": "..."}` or `{"error": "..."}`.

use crate::{
    config::Config,
    equations::solve_equation,
    errors::{Error, ErrorKind},
    solve::SolutionSet,
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// The body of a `POST /solve` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub equation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Build the application's routes.
pub fn router(config: Config) -> Router {
    Router::new()
        .route("/solve", post(handle_solve))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            config: Arc::new(config),
        })
}

/// Listen on the configured address until the process is interrupted.
pub async fn serve(config: Config) -> eyre::Result<()> {
    let addr = config.addr;
    let app = router(config);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Unable to listen for the shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received, stopping server gracefully");
        })
        .await?;

    Ok(())
}

async fn handle_solve(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SolveResponse>, Error> {
    let equation = read_equation(&body)?;
    debug!(%equation, "Received equation");

    let solutions = solve_with_timeout(Arc::clone(&state.config), equation)
        .await?;

    if solutions.is_all() {
        info!("Equation holds for every value of the unknown");
    } else {
        info!(
            roots = solutions.roots().len(),
            solution = %solutions,
            "Equation solved successfully"
        );
    }

    Ok(Json(SolveResponse {
        solution: solutions.to_string(),
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Pull the equation out of a request body.
fn read_equation(body: &[u8]) -> Result<String, Error> {
    if body.is_empty() {
        return Err(Error::MissingEquation);
    }

    let request: SolveRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Unable to deserialize the request body");
        Error::MissingEquation
    })?;

    let equation = request.equation.ok_or(Error::MissingEquation)?;

    if equation.trim().is_empty() {
        return Err(Error::EmptyEquation);
    }

    Ok(equation)
}

/// Solve on the blocking thread pool, giving up once the configured time
/// budget is spent.
async fn solve_with_timeout(
    config: Arc<Config>,
    equation: String,
) -> Result<SolutionSet, Error> {
    let budget = config.solve_timeout;
    let deadline = config.deadline();

    let task = tokio::task::spawn_blocking(move || {
        solve_equation(&equation, &config.vocabulary, &deadline)
    });

    let joined = match budget {
        Some(budget) => tokio::time::timeout(budget, task)
            .await
            .map_err(|_| Error::TimedOut)?,
        None => task.await,
    };

    joined.map_err(|e| Error::Internal(e.to_string()))?
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let status = if kind.is_caller_error() {
            warn!(?kind, error = %self, "Unable to solve the equation");
            StatusCode::BAD_REQUEST
        } else {
            error!(?kind, error = %self, "Unexpected error while solving");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
