//! Tests for the HTTP move endpoint.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use expert_server::{AppState, USAGE, router};
use expert_tictactoe::{Engine, Player, TurnRule};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> axum::Router {
    router(AppState::new(Player::O, Engine::default()))
}

async fn send(app: axum::Router, method: Method, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn get(uri: &str) -> Response {
    send(app(), Method::GET, uri).await
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_move_returns_new_board() {
    let response = get("/move?board=o%20ox%20%20%20x%20").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, "ooox   x ");
}

#[tokio::test]
async fn test_plus_encoded_spaces() {
    let response = get("/move?board=x++++++++").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, "x   o    ");
}

#[tokio::test]
async fn test_invalid_board_is_bad_request() {
    let response = get("/move?board=xxx").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body.as_str().unwrap().starts_with("Board is invalid!"));
}

#[tokio::test]
async fn test_missing_board_is_bad_request() {
    let response = get("/move").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_out_of_turn_is_bad_request() {
    let strict = router(AppState::new(Player::O, Engine::new(TurnRule::Strict)));
    let response = send(strict, Method::GET, "/move?board=o%20%20%20%20%20%20%20%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, "It is not O's turn!");
}

#[tokio::test]
async fn test_full_board_is_server_error() {
    let response = get("/move?board=xoxxoooxx").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body.as_str().unwrap().starts_with("Error: "));
}

#[tokio::test]
async fn test_unknown_route_shows_usage() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, USAGE);

    let response = get("/somewhere/else?board=x").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, USAGE);
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    for uri in ["/move?board=x++++++++", "/move?board=bad", "/"] {
        let response = get(uri).await;
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*", "{uri}");
        assert!(headers.contains_key("access-control-allow-headers"), "{uri}");
        assert!(!headers.contains_key("access-control-allow-methods"), "{uri}");
    }
}

#[tokio::test]
async fn test_preflight_short_circuits() {
    for uri in ["/move", "/anything"] {
        let response = send(app(), Method::OPTIONS, uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-methods"], "GET");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(json_body(response).await, serde_json::json!({}));
    }
}

#[tokio::test]
async fn test_other_methods_on_move_show_usage() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let response = send(app(), method.clone(), "/move?board=x++++++++").await;
        assert_eq!(response.status(), StatusCode::OK, "{method}");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(json_body(response).await, USAGE, "{method}");
    }
}

#[tokio::test]
async fn test_duplicate_board_parameter_is_json_bad_request() {
    let response = get("/move?board=x&board=o").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body.as_str().unwrap().starts_with("Board is invalid!"));
}

#[tokio::test]
async fn test_trailing_slash_reaches_move() {
    let response = get("/move/?board=x++++++++").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, "x   o    ");
}
