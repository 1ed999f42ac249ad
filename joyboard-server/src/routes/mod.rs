pub mod calendars;
pub mod links;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Serialize;

use joyboard_core::JoyboardError;

use crate::state::AppState;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert anyhow errors to HTTP responses.
///
/// `NotFound` surfaces as 404; everything else (storage I/O, serialization)
/// is a 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<JoyboardError>() {
            Some(JoyboardError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "timestamp": Utc::now() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn make_app(dir: &std::path::Path) -> Router {
        let state = AppState::new(dir.to_path_buf()).unwrap();
        Router::new()
            .merge(calendars::router())
            .merge(links::router())
            .merge(health_router())
            .with_state(state)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let app = make_app(tmp.path());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_add_and_list_calendars() {
        let tmp = tempfile::tempdir().unwrap();
        let app = make_app(tmp.path());

        let request = Request::builder()
            .method("POST")
            .uri("/api/calendars")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"name": "Personal", "url": "https://example.com/cal.ics"}"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["success"], true);
        assert!(created["id"].is_string());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendars")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["connected"].as_array().unwrap().len(), 1);
        assert_eq!(body["connected"][0]["name"], "Personal");
        assert!(body["lastSync"].is_null());
    }

    #[tokio::test]
    async fn test_delete_missing_calendar_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = make_app(tmp.path());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/calendars/no-such-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_manual_link_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let app = make_app(tmp.path());

        // Manual creation works with zero calendar sources configured.
        let request = Request::builder()
            .method("POST")
            .uri("/api/linked-events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{
                    "calendarUid": "evt-1",
                    "calendarName": "Manual",
                    "eventSummary": "Lisbon weekend getaway",
                    "eventDate": "2024-02-08",
                    "links": [{"type": "travel", "id": "d1", "name": "Lisbon Trip"}]
                }"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/linked-events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["links"].as_array().unwrap().len(), 1);
        assert_eq!(body["links"][0]["eventSummary"], "Lisbon weekend getaway");
        assert_eq!(body["links"][0]["eventDate"], "2024-02-08");
        assert_eq!(body["links"][0]["links"][0]["type"], "travel");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/linked-events/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/linked-events/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_manual_link_accepts_plural_experience_kind() {
        let tmp = tempfile::tempdir().unwrap();
        let app = make_app(tmp.path());

        // The original frontend sent "experiences" for this category.
        let request = Request::builder()
            .method("POST")
            .uri("/api/linked-events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{
                    "calendarUid": "evt-2",
                    "calendarName": "Manual",
                    "eventSummary": "Northern lights",
                    "eventDate": "2024-11-20T19:00:00Z",
                    "links": [{"type": "experiences", "id": "x1", "name": "See the lights"}]
                }"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/linked-events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        // Serialized back out in canonical singular form.
        assert_eq!(body["links"][0]["links"][0]["type"], "experience");
    }
}
