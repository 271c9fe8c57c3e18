//! Axum server for vehicle position reports

use std::future::Future;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use sintra_core_presence::{ControllerSnapshot, IngestBoundary};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::{Result, SintraError};
use crate::state::AppState;

/// Position report posted by a vehicle
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GpsReport {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Why a report was refused before reaching the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRejection {
    /// Request carried no body
    MissingBody,

    /// Body was not a usable report
    InvalidPayload(String),
}

impl IntoResponse for ReportRejection {
    fn into_response(self) -> Response {
        match self {
            ReportRejection::MissingBody => {
                (StatusCode::BAD_REQUEST, "Bad Request").into_response()
            }
            ReportRejection::InvalidPayload(_) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON").into_response()
            }
        }
    }
}

/// Decode a report body, rejecting anything the controller must not see
pub fn decode_report(body: &[u8]) -> std::result::Result<GpsReport, ReportRejection> {
    if body.is_empty() {
        return Err(ReportRejection::MissingBody);
    }

    let report: GpsReport = serde_json::from_slice(body)
        .map_err(|e| ReportRejection::InvalidPayload(e.to_string()))?;

    if report.id.is_empty() {
        return Err(ReportRejection::InvalidPayload("empty id".to_string()));
    }
    if !report.latitude.is_finite() || !report.longitude.is_finite() {
        return Err(ReportRejection::InvalidPayload(
            "non-finite coordinate".to_string(),
        ));
    }

    Ok(report)
}

/// Report ingest handler
async fn gps_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<(StatusCode, &'static str), ReportRejection> {
    let report = decode_report(&body).inspect_err(|rejection| {
        tracing::debug!(?rejection, "Rejected position report");
    })?;

    let ack = state
        .controller
        .lock()
        .await
        .submit_report(&report.id, report.latitude, report.longitude);

    tracing::debug!(
        id = %report.id,
        latitude = report.latitude,
        longitude = report.longitude,
        outcome = ?ack.outcome,
        "Position report accepted"
    );

    Ok((StatusCode::OK, "Location received"))
}

/// Current live count and green time
async fn status_handler(State(state): State<AppState>) -> Json<ControllerSnapshot> {
    let snapshot = state.controller.lock().await.snapshot();
    Json(snapshot)
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/gps", post(gps_handler))
        .route("/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Listening for position reports on http://{}/gps", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SintraError::Server(e.to_string()))?;

    tracing::info!("Report listener stopped");
    Ok(())
}
