//! End-to-end HTTP tests against the in-memory range store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, TimeZone, Utc};
use lineup_api::{
    AppState, FixedClock, InMemoryRangeStore, SheetLayout, SheetOrderRepository,
    SheetRosterRepository, SheetSecretRepository, create_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

struct Harness {
    store: Arc<InMemoryRangeStore>,
    clock: Arc<FixedClock>,
    layout: SheetLayout,
    router: Router,
}

fn harness() -> Harness {
    let layout = SheetLayout::default();
    let store = Arc::new(InMemoryRangeStore::with_sheets(layout.titles()));
    store.set_rows(&layout.settings, vec![vec!["password".into(), "letmein".into()]]);
    store.set_rows(
        &layout.orders,
        vec![vec!["orderName".into(), "savedAt".into(), "payload".into()]],
    );

    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 4, 5, 18, 30, 0).unwrap()));
    let state = AppState::new(
        Arc::new(SheetOrderRepository::new(
            Arc::clone(&store),
            Arc::clone(&clock) as Arc<dyn lineup_api::Clock>,
            layout.orders.clone(),
        )),
        Arc::new(SheetRosterRepository::new(Arc::clone(&store), layout.roster.clone())),
        Arc::new(SheetSecretRepository::new(Arc::clone(&store), layout.settings.clone())),
        "test",
    );

    Harness {
        store,
        clock,
        layout,
        router: create_router(state),
    }
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = if let Some(v) = body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
    } else {
        Body::empty()
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

fn tigers_payload() -> Value {
    json!({
        "players": [{"name": "Kim", "num": "7"}],
        "startingList": [{"name": "Kim", "pos": "P"}]
    })
}

#[tokio::test]
async fn tigers_a_save_get_exists_delete() {
    let h = harness();

    let (status, body) = call(
        &h.router,
        Method::POST,
        "/save-order",
        Some(json!({"orderName": "Tigers A", "payload": tigers_payload()})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success"}));

    let (status, body) = call(&h.router, Method::GET, "/get-order?name=Tigers%20A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderName"], "Tigers A");
    assert_eq!(body["payload"], tigers_payload());
    assert_eq!(body["savedAt"], "2025-04-05T18:30:00.000Z");

    let (_, body) = call(&h.router, Method::GET, "/order-exists?name=Tigers%20A", None).await;
    assert_eq!(body, json!({"exists": true}));

    let (status, body) = call(&h.router, Method::GET, "/delete-order?name=Tigers%20A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, body) = call(&h.router, Method::GET, "/get-order?name=Tigers%20A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, body) = call(&h.router, Method::GET, "/orderExists?name=Tigers%20A", None).await;
    assert_eq!(body, json!({"exists": false}));
}

#[tokio::test]
async fn resave_overwrites_in_place_and_refreshes_timestamp() {
    let h = harness();

    for name in ["Tigers A", "Bears B"] {
        call(
            &h.router,
            Method::POST,
            "/saveOrder",
            Some(json!({"orderName": name, "payload": {"players": []}})),
        )
        .await;
    }

    h.clock.advance(Duration::minutes(5));
    call(
        &h.router,
        Method::POST,
        "/saveOrder",
        Some(json!({"orderName": "Tigers A", "payload": tigers_payload()})),
    )
    .await;

    let (_, list) = call(&h.router, Method::GET, "/list-orders", None).await;
    assert_eq!(
        list,
        json!([
            {"orderName": "Tigers A", "savedAt": "2025-04-05T18:35:00.000Z"},
            {"orderName": "Bears B", "savedAt": "2025-04-05T18:30:00.000Z"}
        ])
    );

    // Header plus two data rows.
    assert_eq!(h.store.rows(&h.layout.orders).len(), 3);
}

#[tokio::test]
async fn delete_unknown_name_reports_not_found() {
    let h = harness();

    let (status, body) = call(&h.router, Method::DELETE, "/deleteOrder?name=Nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "not_found"}));
}

#[tokio::test]
async fn delete_shifts_following_rows_up() {
    let h = harness();

    for name in ["First", "Middle", "Last"] {
        call(
            &h.router,
            Method::POST,
            "/save-order",
            Some(json!({"orderName": name, "payload": {"n": name}})),
        )
        .await;
    }

    call(&h.router, Method::DELETE, "/delete-order?name=Middle", None).await;

    let names: Vec<String> = h
        .store
        .rows(&h.layout.orders)
        .into_iter()
        .skip(1)
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(names, ["First", "Last"]);

    let (_, body) = call(&h.router, Method::GET, "/get-order?name=Last", None).await;
    assert_eq!(body["payload"], json!({"n": "Last"}));
}

#[tokio::test]
async fn roster_replace_then_list() {
    let h = harness();

    let (status, body) = call(
        &h.router,
        Method::POST,
        "/replace-players",
        Some(json!([
            {"name": "Kim", "num": "7", "p": "O", "1b": "O"},
            {"name": "Lee", "num": 12, "ss": "O", "of": "O"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success"}));

    let (_, players) = call(&h.router, Method::GET, "/getPlayers", None).await;
    assert_eq!(players.as_array().unwrap().len(), 2);
    assert_eq!(players[0]["name"], "Kim");
    assert_eq!(players[0]["1b"], "O");
    assert_eq!(players[0]["c"], "0");
    assert_eq!(players[1]["num"], "12");
    assert_eq!(players[1]["of"], "O");

    let (status, body) = call(&h.router, Method::POST, "/updatePlayers", Some(json!({"name": "Kim"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "fail", "error": "array required"}));
}

#[tokio::test]
async fn secret_rotation_gates_old_value() {
    let h = harness();

    let (_, body) = call(
        &h.router,
        Method::POST,
        "/update-secret",
        Some(json!({"oldPassword": "letmein", "newPassword": "hunter2"})),
    )
    .await;
    assert_eq!(body, json!({"status": "success"}));

    let (_, body) = call(&h.router, Method::POST, "/check-secret", Some(json!({"password": "letmein"}))).await;
    assert_eq!(body["status"], "fail");

    let (_, body) = call(&h.router, Method::POST, "/check-secret", Some(json!({"password": "hunter2"}))).await;
    assert_eq!(body, json!({"status": "success"}));
}

#[tokio::test]
async fn preflight_gets_cors_headers() {
    let h = harness();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/save-order")
        .header(header::ORIGIN, "https://coach.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = h.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS, DELETE");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}
