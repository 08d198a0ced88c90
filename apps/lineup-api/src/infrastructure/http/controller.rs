//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the repositories and the access gate.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;

use crate::application::use_cases::AccessGate;
use crate::domain::access::{SecretCheck, SecretRepository, SecretUpdate};
use crate::domain::order_book::{DeleteOutcome, OrderRepository, OrderSummary, SavedOrder};
use crate::domain::roster::{Player, RosterRepository};
use crate::infrastructure::metrics::get_metrics_handle;

use super::error::ApiError;
use super::middleware::{cors, request_tracing, track_requests};
use super::request::{
    Candidate, CheckSecretRequest, SaveOrderRequest, UpdateSecretRequest, name_param, parse_json,
    parse_json_value,
};
use super::response::{ExistsResponse, FailResponse, HealthResponse, StatusResponse};

/// Application state shared across handlers.
pub struct AppState<O, R, S>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    /// Saved orders.
    pub orders: Arc<O>,
    /// Player table.
    pub roster: Arc<R>,
    /// Shared secret gate.
    pub gate: AccessGate<S>,
    /// Application version.
    pub version: String,
}

impl<O, R, S> Clone for AppState<O, R, S>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            roster: Arc::clone(&self.roster),
            gate: self.gate.clone(),
            version: self.version.clone(),
        }
    }
}

impl<O, R, S> AppState<O, R, S>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    /// Assemble state from the three repositories.
    pub fn new(orders: Arc<O>, roster: Arc<R>, secrets: Arc<S>, version: impl Into<String>) -> Self {
        Self {
            orders,
            roster,
            gate: AccessGate::new(secrets),
            version: version.into(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O, R, S>(state: AppState<O, R, S>) -> Router
where
    O: OrderRepository + 'static,
    R: RosterRepository + 'static,
    S: SecretRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        // Access gate
        .route("/check-secret", post(check_secret))
        .route("/checkPassword", post(check_secret))
        .route("/update-secret", post(update_secret))
        .route("/updatePassword", post(update_secret))
        // Roster
        .route("/list-players", get(list_players))
        .route("/getPlayers", get(list_players))
        .route("/replace-players", post(replace_players))
        .route("/updatePlayers", post(replace_players))
        // Orders
        .route("/order-exists", get(order_exists))
        .route("/orderExists", get(order_exists))
        .route("/list-orders", get(list_orders))
        .route("/getOrders", get(list_orders))
        .route("/get-order", get(get_order))
        .route("/getOrder", get(get_order))
        .route("/save-order", post(save_order))
        .route("/saveOrder", post(save_order))
        .route("/delete-order", get(delete_order).delete(delete_order))
        .route("/deleteOrder", get(delete_order).delete(delete_order))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(middleware::from_fn(request_tracing))
        .layer(middleware::from_fn(cors))
}

// =============================================================================
// Service Endpoints
// =============================================================================

async fn health_check<O, R, S>(State(state): State<AppState<O, R, S>>) -> impl IntoResponse
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn metrics() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

// =============================================================================
// Access Gate
// =============================================================================

async fn check_secret<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    body: Bytes,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let request: CheckSecretRequest = parse_json(&body)?;
    let Candidate::Text(candidate) = request.candidate() else {
        return Ok(Json(FailResponse::new("password mismatch")).into_response());
    };

    Ok(match state.gate.check(candidate).await? {
        SecretCheck::Match => Json(StatusResponse::success()).into_response(),
        SecretCheck::Mismatch => Json(FailResponse::new("password mismatch")).into_response(),
    })
}

async fn update_secret<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    body: Bytes,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let request: UpdateSecretRequest = parse_json(&body)?;
    let current = request.old_password.unwrap_or_default();
    let new = request.new_password.unwrap_or_default();

    Ok(match state.gate.update(&current, &new).await? {
        SecretUpdate::Updated => Json(StatusResponse::success()).into_response(),
        SecretUpdate::Mismatch => {
            Json(FailResponse::new("current password mismatch")).into_response()
        }
    })
}

// =============================================================================
// Roster
// =============================================================================

async fn list_players<O, R, S>(
    State(state): State<AppState<O, R, S>>,
) -> Result<Json<Vec<Player>>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    Ok(Json(state.roster.list().await?))
}

async fn replace_players<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let Value::Array(items) = parse_json_value(&body)? else {
        return Err(ApiError::BadRequest("array required".to_string()));
    };

    let players: Vec<Player> = items.iter().map(Player::from_json).collect();
    state.roster.replace_all(&players).await?;
    Ok(Json(StatusResponse::success()))
}

// =============================================================================
// Orders
// =============================================================================

async fn order_exists<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    uri: Uri,
) -> Result<Json<ExistsResponse>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let name = name_param(&uri)?;
    let exists = state.orders.exists(&name).await?;
    Ok(Json(ExistsResponse { exists }))
}

async fn list_orders<O, R, S>(
    State(state): State<AppState<O, R, S>>,
) -> Result<Json<Vec<OrderSummary>>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    Ok(Json(state.orders.list().await?))
}

async fn get_order<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    uri: Uri,
) -> Result<Json<Option<SavedOrder>>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let name = name_param(&uri)?;
    Ok(Json(state.orders.get(&name).await?))
}

async fn save_order<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let request: SaveOrderRequest = parse_json(&body)?;
    let name = request.order_name.unwrap_or_default();
    let payload = request.payload.unwrap_or(Value::Null);

    state.orders.save(&name, &payload).await?;
    Ok(Json(StatusResponse::success()))
}

async fn delete_order<O, R, S>(
    State(state): State<AppState<O, R, S>>,
    uri: Uri,
) -> Result<Json<StatusResponse>, ApiError>
where
    O: OrderRepository,
    R: RosterRepository,
    S: SecretRepository,
{
    let name = name_param(&uri)?;
    Ok(Json(match state.orders.delete(&name).await? {
        DeleteOutcome::Deleted => StatusResponse::deleted(),
        DeleteOutcome::NotFound => StatusResponse::not_found(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FixedClock;
    use crate::infrastructure::persistence::{
        InMemoryRangeStore, SheetLayout, SheetOrderRepository, SheetRosterRepository,
        SheetSecretRepository,
    };
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tower::ServiceExt;

    type TestState = AppState<
        SheetOrderRepository<InMemoryRangeStore>,
        SheetRosterRepository<InMemoryRangeStore>,
        SheetSecretRepository<InMemoryRangeStore>,
    >;

    fn setup() -> (Arc<InMemoryRangeStore>, Router) {
        let layout = SheetLayout::default();
        let store = Arc::new(InMemoryRangeStore::with_sheets(layout.titles()));
        store.set_rows(&layout.settings, vec![vec!["password".into(), "1234".into()]]);
        store.set_rows(&layout.orders, vec![vec!["orderName".into(), "savedAt".into(), "payload".into()]]);

        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 15, 0).unwrap()));
        let state: TestState = AppState::new(
            Arc::new(SheetOrderRepository::new(Arc::clone(&store), clock, layout.orders.clone())),
            Arc::new(SheetRosterRepository::new(Arc::clone(&store), layout.roster.clone())),
            Arc::new(SheetSecretRepository::new(Arc::clone(&store), layout.settings.clone())),
            "0.1.0-test",
        );
        (store, create_router(state))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (_, router) = setup();
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "version": "0.1.0-test"}));
    }

    #[tokio::test]
    async fn check_secret_match_and_mismatch() {
        let (_, router) = setup();

        let (status, body) =
            send(&router, Method::POST, "/check-secret", Some(json!({"password": "1234"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success"}));

        let (status, body) =
            send(&router, Method::POST, "/checkPassword", Some(json!({"password": "0000"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "fail", "error": "password mismatch"}));
    }

    #[tokio::test]
    async fn check_secret_with_non_string_password_is_mismatch() {
        let (_, router) = setup();
        let (status, body) =
            send(&router, Method::POST, "/check-secret", Some(json!({"password": 1234}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "fail", "error": "password mismatch"}));
    }

    #[tokio::test]
    async fn check_secret_without_password_is_400() {
        let (_, router) = setup();
        let (status, body) = send(&router, Method::POST, "/check-secret", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["error"], "password required");
    }

    #[tokio::test]
    async fn update_secret_flow() {
        let (store, router) = setup();

        let (status, body) = send(
            &router,
            Method::POST,
            "/update-secret",
            Some(json!({"oldPassword": "wrong", "newPassword": "5678"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "fail");

        let (status, body) = send(
            &router,
            Method::POST,
            "/updatePassword",
            Some(json!({"oldPassword": "1234", "newPassword": "5678"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success"}));
        assert_eq!(store.rows("설정")[0][1], "5678");

        let (status, _) = send(
            &router,
            Method::POST,
            "/update-secret",
            Some(json!({"oldPassword": "5678"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn replace_and_list_players() {
        let (_, router) = setup();

        let (status, _) = send(
            &router,
            Method::POST,
            "/replace-players",
            Some(json!([{"name": "Kim", "num": 7, "p": 1}, {"name": "Lee", "num": "9", "of": false}])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, Method::GET, "/getPlayers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["name"], "Kim");
        assert_eq!(body[0]["num"], "7");
        assert_eq!(body[0]["p"], "1");
        assert_eq!(body[1]["of"], "0");
        assert_eq!(body[1]["1b"], "0");
    }

    #[tokio::test]
    async fn replace_players_requires_array() {
        let (_, router) = setup();
        let (status, body) =
            send(&router, Method::POST, "/updatePlayers", Some(json!({"name": "Kim"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": "fail", "error": "array required"}));
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (_, router) = setup();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/save-order")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"orderName\": "))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn order_endpoints_require_name() {
        let (_, router) = setup();
        for uri in ["/order-exists", "/get-order", "/delete-order", "/getOrder?name="] {
            let (status, body) = send(&router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "name required");
        }

        let (status, _) =
            send(&router, Method::POST, "/save-order", Some(json!({"orderName": "A"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&router, Method::POST, "/save-order", Some(json!({"payload": {"a": 1}}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_unknown_order_is_null() {
        let (_, router) = setup();
        let (status, body) = send(&router, Method::GET, "/get-order?name=Nope", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn delete_accepts_delete_method() {
        let (_, router) = setup();
        send(
            &router,
            Method::POST,
            "/save-order",
            Some(json!({"orderName": "A", "payload": [1]})),
        )
        .await;

        let (status, body) = send(&router, Method::DELETE, "/deleteOrder?name=A", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "deleted"}));

        let (_, body) = send(&router, Method::DELETE, "/delete-order?name=A", None).await;
        assert_eq!(body, json!({"status": "not_found"}));
    }

    #[tokio::test]
    async fn corrupt_payload_is_500() {
        let (store, router) = setup();
        store.set_rows(
            "Orders",
            vec![
                vec!["orderName".into(), "savedAt".into(), "payload".into()],
                vec!["Broken".into(), "t".into(), "{oops".into()],
            ],
        );
        let (status, body) = send(&router, Method::GET, "/get-order?name=Broken", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn missing_sheet_is_500_with_message() {
        let store = Arc::new(InMemoryRangeStore::default());
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let state: TestState = AppState::new(
            Arc::new(SheetOrderRepository::new(Arc::clone(&store), clock, "Orders")),
            Arc::new(SheetRosterRepository::new(Arc::clone(&store), "Roster")),
            Arc::new(SheetSecretRepository::new(Arc::clone(&store), "Settings")),
            "test",
        );
        let (status, body) = send(&create_router(state), Method::GET, "/list-orders", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Unable to parse range: 'Orders'!A2:B");
    }

    #[tokio::test]
    async fn unknown_path_is_404_with_cors() {
        let (_, router) = setup();
        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "fail", "error": "not found"}));
    }

    #[tokio::test]
    async fn preflight_is_204_with_cors_headers() {
        let (_, router) = setup();
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/save-order")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS, DELETE");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let (_, router) = setup();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let generated = response.headers()["x-request-id"].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_503() {
        let (_, router) = setup();
        if get_metrics_handle().is_none() {
            let response = router
                .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}
