use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::{debug, warn};

use super::models::*;
use crate::batch;
use crate::error::Error;
use crate::geodesy::{GeoPoint, GeodesyEngine};

/// Shared engine handed to every handler
pub type AppState = Arc<GeodesyEngine>;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: error.into() }))
}

fn bad_request(e: Error) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, e.to_string())
}

pub async fn get_inverse(
    State(engine): State<AppState>,
    Query(req): Query<InverseRequest>,
) -> Result<Json<InverseResponse>, ApiError> {
    let start = Instant::now();

    let (from, to) = (req.start(), req.end());
    from.validate().map_err(bad_request)?;
    to.validate().map_err(bad_request)?;

    let solution = engine.inverse(from, to);
    if !solution.converged {
        warn!(?from, ?to, iterations = solution.iterations, "inverse request hit the iteration cap");
    }

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok(Json(InverseResponse::new(&solution, execution_time_ms)))
}

pub async fn get_direct(
    State(engine): State<AppState>,
    Query(req): Query<DirectRequest>,
) -> Result<Json<DirectResponse>, ApiError> {
    let start = Instant::now();

    let from = GeoPoint::new(req.lat, req.lon);
    from.validate().map_err(bad_request)?;
    if !req.bearing.is_finite() {
        return Err(bad_request(Error::InvalidInput(format!("bearing {} is not finite", req.bearing))));
    }
    if !(req.distance.is_finite() && req.distance >= 0.0) {
        return Err(bad_request(Error::InvalidInput(format!(
            "distance {} must be finite and non-negative",
            req.distance
        ))));
    }

    let solution = engine.direct(from, req.bearing, req.distance);
    if !solution.converged {
        warn!(?from, bearing = req.bearing, distance = req.distance, "direct request hit the iteration cap");
    }

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok(Json(DirectResponse::new(&solution, execution_time_ms)))
}

pub async fn upload_batch(
    State(engine): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csv" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read CSV: {}", e)))?;
                csv_data = Some(bytes.to_vec());
            }
            other => debug!(field = other, "ignoring multipart field"),
        }
    }

    let csv_data = csv_data.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing CSV file"))?;

    let (_, output) = tokio::task::spawn_blocking(move || batch::process_csv(&*engine, &csv_data))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Batch task failed: {}", e)))?
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to process CSV: {}", e)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(header::CONTENT_DISPOSITION, "attachment; filename=\"geodesics.csv\"")
        .body(Body::from(output))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
