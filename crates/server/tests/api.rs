use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, User, UserId};
use migration::MigratorTrait;
use server::ServerState;

const TEAM_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../public/data/team.json");

async fn state_and_db(about: &str) -> (ServerState, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    for (id, first, last) in [("u1", "John", "Doe"), ("123123", "Jane", "Roe")] {
        engine
            .create_user(User::new(UserId::new(id).unwrap(), first, last, None, None).unwrap())
            .await
            .unwrap();
    }
    (ServerState::new(engine, about), db)
}

async fn state_with_about(about: &str) -> ServerState {
    state_and_db(about).await.0
}

async fn state() -> ServerState {
    state_with_about(TEAM_FILE).await
}

async fn send(state: &ServerState, request: Request<Body>) -> (StatusCode, Value) {
    let response = server::app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_cost(state: &ServerState, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, request).await
}

async fn get(state: &ServerState, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(state, request).await
}

async fn total_of(state: &ServerState, id: &str) -> f64 {
    state
        .engine
        .total_for_user(&UserId::new(id).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn add_cost_returns_stored_record() {
    let state = state().await;

    let (status, body) = post_cost(
        &state,
        json!({
            "description": "test item",
            "category": "food",
            "userid": 123123,
            "sum": 50,
            "date": "2025-05-30"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["description"], "test item");
    assert_eq!(body["category"], "food");
    assert_eq!(body["userid"], 123123);
    assert_eq!(body["sum"].as_f64(), Some(50.0));
    assert_eq!(body["date"], "2025-05-30T00:00:00Z");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn add_cost_without_date_is_stamped_now() {
    let state = state().await;
    let before = Utc::now();

    let (status, body) = post_cost(
        &state,
        json!({ "description": "milk 9", "category": "food", "userid": "u1", "sum": 8 }),
    )
    .await;
    let after = Utc::now();

    assert_eq!(status, StatusCode::CREATED);
    let date: DateTime<Utc> = body["date"].as_str().unwrap().parse().unwrap();
    assert!(before <= date && date <= after);
}

#[tokio::test]
async fn add_cost_with_missing_field_is_rejected() {
    let state = state().await;

    let (status, body) = post_cost(
        &state,
        json!({ "description": "test item", "category": "food", "userid": "u1" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing one or more from the required query parameters: description, category, userid or sum"
    );
    assert_eq!(total_of(&state, "u1").await, 0.0);
}

#[tokio::test]
async fn add_cost_for_unknown_user_is_rejected() {
    let state = state().await;

    let (status, body) = post_cost(
        &state,
        json!({ "description": "milk", "category": "food", "userid": "ghost", "sum": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
    assert_eq!(total_of(&state, "ghost").await, 0.0);
}

#[tokio::test]
async fn add_cost_with_unknown_category_is_rejected() {
    let state = state().await;

    let (status, body) = post_cost(
        &state,
        json!({ "description": "flight", "category": "travel", "userid": "u1", "sum": 300 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("travel"));
    assert_eq!(total_of(&state, "u1").await, 0.0);
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let state = state().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn wrongly_typed_field_is_a_bad_request() {
    let state = state().await;

    for body in [
        json!({ "description": "milk", "category": "food", "userid": "u1", "sum": true }),
        json!({ "description": 5, "category": "food", "userid": "u1", "sum": 10 }),
    ] {
        let (status, body) = post_cost(&state, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
    assert_eq!(total_of(&state, "u1").await, 0.0);
}

#[tokio::test]
async fn body_without_content_type_is_a_bad_request() {
    let state = state().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/add")
        .body(Body::from(
            json!({ "description": "milk", "category": "food", "userid": "u1", "sum": 10 })
                .to_string(),
        ))
        .unwrap();

    let (status, body) = send(&state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(total_of(&state, "u1").await, 0.0);
}

#[tokio::test]
async fn report_lists_costs_by_category() {
    let state = state().await;
    let (status, _) = post_cost(
        &state,
        json!({
            "description": "milk",
            "category": "food",
            "userid": "u1",
            "sum": 10,
            "date": "2024-03-05"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&state, "/api/report?id=u1&year=2024&month=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "userid": "u1",
            "year": 2024,
            "month": 3,
            "costs": [
                { "food": [{ "sum": 10.0, "description": "milk", "day": 5 }] },
                { "health": [] },
                { "housing": [] },
                { "sport": [] },
                { "education": [] }
            ]
        })
    );
}

#[tokio::test]
async fn report_excludes_first_day_of_next_month() {
    let state = state().await;
    for (description, date) in [("rent", "2024-03-01"), ("rent", "2024-04-01")] {
        let (status, _) = post_cost(
            &state,
            json!({
                "description": description,
                "category": "housing",
                "userid": "u1",
                "sum": 500,
                "date": date
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&state, "/api/report?id=u1&year=2024&month=3").await;

    assert_eq!(status, StatusCode::OK);
    let housing = body["costs"][2]["housing"].as_array().unwrap();
    assert_eq!(housing.len(), 1);
    assert_eq!(housing[0]["day"], 1);
}

#[tokio::test]
async fn report_accepts_trailing_slash() {
    let state = state().await;

    let (status, body) = get(&state, "/api/report/?id=123123&year=2025&month=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userid"], 123123);
    assert_eq!(body["costs"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn report_with_missing_parameter_is_rejected() {
    let state = state().await;

    let (status, body) = get(&state, "/api/report?id=u1&year=2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing one or more from the required query parameters: id, year or month"
    );
}

#[tokio::test]
async fn report_for_unknown_user_is_not_found() {
    let state = state().await;

    let (status, body) = get(&state, "/api/report?id=999999&year=2025&month=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn user_total_sums_all_costs() {
    let state = state().await;
    for (sum, date) in [(10, "2024-01-10"), (25, "2024-06-20")] {
        post_cost(
            &state,
            json!({
                "description": "item",
                "category": "sport",
                "userid": "u1",
                "sum": sum,
                "date": date
            }),
        )
        .await;
    }

    let (status, body) = get(&state, "/api/users/u1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "u1");
    assert_eq!(body["first_name"], "John");
    assert_eq!(body["last_name"], "Doe");
    assert_eq!(body["total"].as_f64(), Some(35.0));
}

#[tokio::test]
async fn user_total_is_zero_without_costs() {
    let state = state().await;

    let (status, body) = get(&state, "/api/users/123123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let state = state().await;

    let (status, body) = get(&state, "/api/users/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn about_serves_the_team_file() {
    let state = state().await;
    let request = Request::builder()
        .uri("/api/about/")
        .body(Body::empty())
        .unwrap();

    let response = server::app(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!([
            { "first_name": "Yaakov", "last_name": "Israeli" },
            { "first_name": "Koren", "last_name": "Abugov" }
        ])
    );
}

#[tokio::test]
async fn about_without_file_is_not_found() {
    let state = state_with_about("/nonexistent/team.json").await;

    let (status, _) = get(&state, "/api/about").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let state = state().await;

    let (status, body) = get(&state, "/api/nothing-here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn wrong_method_is_not_found() {
    let state = state().await;

    let (status, body) = get(&state, "/api/add").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn store_failure_passes_the_message_through() {
    let (state, db) = state_and_db(TEAM_FILE).await;
    db.execute_unprepared("DROP TABLE costs").await.unwrap();

    let (status, body) = get(&state, "/api/users/u1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn numeric_id_in_total_goes_back_as_a_number() {
    let state = state().await;

    let (status, body) = get(&state, "/api/users/123123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 123123);
    assert_eq!(body["first_name"], "Jane");
}
