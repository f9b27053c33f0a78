use axum::http::{header, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use ocean_dash::api::Params;
use ocean_dash::{ApiClient, RequestError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, router).await.expect("serve app") });
    format!("http://{addr}")
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Some(Duration::from_secs(5))).expect("client")
}

#[tokio::test]
async fn get_json_sends_query_parameters() {
    let router = Router::new().route(
        "/echo",
        get(|axum::extract::Query(query): axum::extract::Query<HashMap<String, String>>| async move {
            Json(json!(query))
        }),
    );
    let base = serve(router).await;

    let params = Params::new()
        .with("use_default_data", true)
        .with_opt::<String>("date_col", None);
    let echoed: Value = client(&base)
        .get_json("/echo", Some(&params))
        .await
        .expect("echo");

    assert_eq!(echoed, json!({ "use_default_data": "true" }));
}

#[tokio::test]
async fn post_json_sends_a_json_body() {
    let router = Router::new().route(
        "/echo",
        post(|headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!({ "content_type": content_type, "body": body }))
        }),
    );
    let base = serve(router).await;

    let echoed: Value = client(&base)
        .post_json("/echo", None, Some(&json!({ "future_days": 540 })))
        .await
        .expect("echo");

    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"]["future_days"], 540);
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let router = Router::new().route(
        "/down",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base = serve(router).await;

    let err = client(&base)
        .get_json::<Value>("/down", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.kind(), "status");
}

#[tokio::test]
async fn unparseable_body_is_a_parse_error() {
    let router = Router::new().route("/html", get(|| async { "<html>oops</html>" }));
    let base = serve(router).await;

    let err = client(&base)
        .get_json::<Value>("/html", None)
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Parse { .. }));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    // Bind and drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .get_json::<Value>("/forecast_interactive", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn slow_backend_hits_the_timeout() {
    let router = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let base = serve(router).await;

    let client = ApiClient::new(&base, Some(Duration::from_millis(200))).expect("client");
    let err = client.get_json::<Value>("/slow", None).await.unwrap_err();

    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn bytes_are_returned_untouched() {
    let router = Router::new().route(
        "/health-check",
        get(|| async { ([(header::CONTENT_TYPE, "image/png")], vec![1_u8, 2, 3]) }),
    );
    let base = serve(router).await;

    let bytes = client(&base)
        .get_bytes("/health-check", None)
        .await
        .expect("bytes");
    assert_eq!(bytes, [1, 2, 3]);
}
