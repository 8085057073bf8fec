use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use super::handlers::*;

pub fn create_router(engine: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/api/inverse", get(get_inverse))
        .route("/api/direct", get(get_direct))
        .route("/api/batch", post(upload_batch))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit_bytes))
                .layer(CorsLayer::permissive())
        )
        .with_state(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::models::{ErrorResponse, InverseResponse};
    use crate::geodesy::GeodesyEngine;

    fn app() -> Router {
        create_router(Arc::new(GeodesyEngine::wgs84()), 1024 * 1024)
    }

    #[tokio::test]
    async fn test_inverse_route() {
        let request = Request::builder()
            .uri("/api/inverse?from_lat=0&from_lon=0&to_lat=0&to_lon=10")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: InverseResponse = serde_json::from_slice(&body).unwrap();
        assert!((parsed.distance - 1_113_194.907_932).abs() < 1e-3);
        assert!((parsed.initial_bearing - 90.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_direct_route_rejects_bad_latitude() {
        let request = Request::builder()
            .uri("/api/direct?lat=120&lon=0&bearing=0&distance=10")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.error.contains("latitude"));
    }

    #[tokio::test]
    async fn test_batch_route() {
        let boundary = "geodesy-boundary";
        let csv = "from_lat,from_lon,to_lat,to_lon,name\n0,0,0,10,equator\n";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"csv\"; filename=\"routes.csv\"\r\n\
             Content-Type: text/csv\r\n\
             \r\n\
             {csv}\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/batch")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("# Solved: 1\n"));
        assert!(text.contains("equator"));
    }

    #[tokio::test]
    async fn test_batch_route_without_csv() {
        let boundary = "geodesy-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"note\"\r\n\
             \r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/batch")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
