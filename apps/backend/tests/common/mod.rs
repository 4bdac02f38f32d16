#![allow(dead_code)]

// tests/common/mod.rs
use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{ETAG, IF_MATCH};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use thegame::{routes, AppState, RequestTrace, TraceSpan};

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Full application wired the same way `main.rs` does it.
pub async fn test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

pub fn etag_of<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .expect("room responses carry an ETag")
        .to_string()
}

pub fn post_json(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(path).set_json(body)
}

pub fn post_json_if_match(path: &str, body: Value, version_tag: &str) -> test::TestRequest {
    post_json(path, body).insert_header((IF_MATCH, version_tag.to_string()))
}

/// Create a room hosted by "Ann" and return its code.
pub async fn create_room<S, B>(app: &S) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, post_json("/api/rooms", json!({"name": "Ann"})).to_request()).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    body["code"].as_str().expect("code is a string").to_string()
}

pub async fn join_room<S, B>(app: &S, code: &str, name: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        post_json(&format!("/api/rooms/{code}/join"), json!({"name": name})).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    test::read_body_json(resp).await
}

/// Index and pile of the first card in `view.hand` that can be played.
pub fn first_legal_play(view: &Value) -> (usize, u64) {
    view["hand"]
        .as_array()
        .expect("hand is an array")
        .iter()
        .enumerate()
        .find_map(|(i, h)| h["legalPiles"][0].as_u64().map(|pile| (i, pile)))
        .expect("a fresh table always has a legal play")
}
