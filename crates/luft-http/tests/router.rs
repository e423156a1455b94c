//! Extractors and error bodies exercised through an in-memory axum router.

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower::ServiceExt;

use luft_http::error::STATUS_EXTENSION;
use luft_http::extractors::coerce_path_params;
use luft_http::{AppError, Coerced, CoercedQuery, Described, QueryConfig};
use luft_schema::factory as l;
use luft_schema::Schema;

#[derive(Debug, Deserialize, Serialize)]
struct NewUser {
    name: String,
    age: i64,
    #[serde(default)]
    tags: Vec<String>,
}

impl Described for NewUser {
    fn schema() -> Schema {
        l::object()
            .field("name", l::string().trim().min_len(2))
            .field("age", l::int().min_eq(0))
            .field("tags", l::array(l::string()).optional())
            .strict()
            .into()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct Listing {
    page: i64,
    sort: String,
    tag: Vec<String>,
}

impl Described for Listing {
    fn schema() -> Schema {
        l::object()
            .field("page", l::int().min_eq(1).default(1))
            .field("sort", l::literal(["asc", "desc"]).default("asc"))
            .field("tag", l::array(l::string()).default(Vec::<luft_schema::Value>::new()))
            .extension(STATUS_EXTENSION, serde_json::json!(422))
            .into()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct LastWins {
    sort: String,
}

impl Described for LastWins {
    fn schema() -> Schema {
        l::object().field("sort", l::string()).into()
    }

    fn query_config() -> QueryConfig {
        QueryConfig::Last
    }
}

async fn create(Coerced(user): Coerced<NewUser>) -> Json<NewUser> {
    Json(user)
}

async fn list(CoercedQuery(listing): CoercedQuery<Listing>) -> Json<Listing> {
    Json(listing)
}

async fn sorted(CoercedQuery(query): CoercedQuery<LastWins>) -> Json<LastWins> {
    Json(query)
}

async fn show(
    Path(params): Path<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let schema = l::object().field("id", l::int().positive());
    let value = coerce_path_params(&schema, params)?;
    Ok(Json(value.to_json()))
}

fn router() -> Router {
    Router::new()
        .route("/users", post(create))
        .route("/users", get(list))
        .route("/sorted", get(sorted))
        .route("/users/{id}", get(show))
}

async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = router().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_uri(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn body_is_coerced_before_deserializing() {
    let (status, body) = send(post_json(
        "/users",
        r#"{"name":"  Ada ","age":"36","tags":"math"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"name": "Ada", "age": 36, "tags": ["math"]})
    );
}

#[tokio::test]
async fn invalid_body_lists_every_issue() {
    let (status, body) = send(post_json(
        "/users",
        r#"{"name":"A","age":-1,"admin":true}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let codes: Vec<&str> = body["error"]["details"]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["INVALID_LENGTH", "INVALID_RANGE", "EXTRA_KEYS"]);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = send(post_json("/users", r#"{"name":"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn query_defaults_and_repeated_keys() {
    let (status, body) = send(get_uri("/users?tag=a&tag=b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"page": 1, "sort": "asc", "tag": ["a", "b"]})
    );

    let (_, body) = send(get_uri("/users?page=4&sort=desc&tag=solo")).await;
    assert_eq!(
        body,
        serde_json::json!({"page": 4, "sort": "desc", "tag": ["solo"]})
    );
}

#[tokio::test]
async fn query_rejection_uses_schema_status() {
    let (status, body) = send(get_uri("/users?page=0&sort=sideways")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let issues = body["error"]["details"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["path"], serde_json::json!(["page"]));
    assert_eq!(issues[1]["path"], serde_json::json!(["sort"]));
}

#[tokio::test]
async fn last_query_config_keeps_final_value() {
    let (status, body) = send(get_uri("/sorted?sort=asc&sort=desc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"sort": "desc"}));
}

#[tokio::test]
async fn path_params_are_coerced() {
    let (status, body) = send(get_uri("/users/42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"id": 42}));

    let (status, body) = send(get_uri("/users/-3")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["issues"][0]["path"], serde_json::json!(["id"]));
}
