use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use ocean_dash::domain::{DepthParameter, Origin};
use ocean_dash::mock::FishClassifierMock;
use ocean_dash::upload::UploadedFile;
use ocean_dash::views::{biodiversity, dashboard, fisheries, ocean, HealthPanel};
use ocean_dash::ApiClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

async fn serve(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, router).await.expect("serve app") });
    ApiClient::new(&format!("http://{addr}"), Some(Duration::from_secs(5))).expect("client")
}

fn fish_image() -> UploadedFile {
    UploadedFile::from_bytes("bass.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 16])
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

fn document(title: &str) -> Value {
    json!({
        "data": [{ "x": [2000, 2001, 2002], "y": [55.0, 55.8, 57.0], "name": "Actual Stock", "mode": "markers" }],
        "layout": { "title": { "text": title }, "xaxis": { "title": "Year" } }
    })
}

#[tokio::test]
async fn classification_walks_the_routes_in_order() {
    let router = Router::new()
        .route(
            "/predict/fish_species",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        // /classify/fish is not routed and answers 404
        .route(
            "/api/v1/fish/classify",
            post(|body: Bytes| async move {
                let text = String::from_utf8_lossy(&body);
                if !text.contains("name=\"file\"") || !text.contains("filename=\"bass.jpg\"") {
                    return Err(StatusCode::BAD_REQUEST);
                }
                Ok(Json(json!({ "predicted_class": "Red Mullet", "confidence": 91.2 })))
            }),
        );
    let backend = serve(router).await;
    let classifier = FishClassifierMock::new();

    let loaded = fisheries::classify(
        &backend,
        &fish_image(),
        &classifier,
        &mut StdRng::seed_from_u64(1),
    )
    .await;

    assert_eq!(loaded.origin, Origin::Real);
    assert_eq!(loaded.source, "/api/v1/fish/classify");
    assert_eq!(loaded.data.species, "Red Mullet");
    assert_eq!(loaded.data.confidence, "91.20%");
}

#[tokio::test]
async fn classification_falls_back_to_the_rotating_mock() {
    let router = Router::new().route(
        "/predict/fish_species",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let backend = serve(router).await;
    let classifier = FishClassifierMock::new();
    let mut rng = StdRng::seed_from_u64(2);

    let first = fisheries::classify(&backend, &fish_image(), &classifier, &mut rng).await;
    let second = fisheries::classify(&backend, &fish_image(), &classifier, &mut rng).await;

    assert!(first.is_mock());
    assert_eq!(first.data.species, "Sea Bass");
    assert_eq!(second.data.species, "Gilt-Head Bream");
    assert!(first.data.confidence.ends_with('%'));
}

#[tokio::test]
async fn string_confidences_pass_through() {
    let router = Router::new().route(
        "/predict/fish_species",
        post(|| async { Json(json!({ "species": "Sea Bass", "confidence": "high" })) }),
    );
    let backend = serve(router).await;

    let loaded = fisheries::classify(
        &backend,
        &fish_image(),
        &FishClassifierMock::new(),
        &mut StdRng::seed_from_u64(3),
    )
    .await;

    assert_eq!(loaded.source, "/predict/fish_species");
    assert_eq!(loaded.data.confidence, "high");
}

#[tokio::test]
async fn sst_request_carries_options_in_query_and_body() {
    let router = Router::new().route(
        "/api/v1/forecast",
        post(
            |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                let expected = query.get("format").map(String::as_str) == Some("future_interactive")
                    && query.get("future_days").map(String::as_str) == Some("540")
                    && body["use_default_data"] == json!(true)
                    && body["future_days"] == json!(540);
                if expected {
                    Ok(Json(document("SST")))
                } else {
                    Err(StatusCode::UNPROCESSABLE_ENTITY)
                }
            },
        ),
    );
    let backend = serve(router).await;

    let loaded = ocean::load_sst_forecast(&backend, &mut StdRng::seed_from_u64(4)).await;

    assert_eq!(loaded.origin, Origin::Real);
    assert_eq!(loaded.data.layout.title_text(), Some("SST"));
}

#[tokio::test]
async fn wrapped_depth_profile_is_unwrapped() {
    let router = Router::new().route(
        "/api/v1/ocean/depth-profile",
        post(|Query(query): Query<HashMap<String, String>>| async move {
            let parameter = query.get("parameter").cloned().unwrap_or_default();
            Json(json!({
                "plot_data": {
                    "data": [{ "x": [0.1, 0.7], "y": [0, 80], "name": parameter }],
                    "layout": { "yaxis": { "autorange": "reversed" } }
                },
                "title": "Depth"
            }))
        }),
    );
    let backend = serve(router).await;

    let loaded = ocean::load_depth_profile(
        &backend,
        DepthParameter::Salinity,
        &mut StdRng::seed_from_u64(5),
    )
    .await;

    assert_eq!(loaded.origin, Origin::Real);
    assert_eq!(loaded.data.data[0].name, "salinity");
    assert!(loaded.data.layout.y_reversed());
}

#[tokio::test]
async fn gaps_in_a_live_profile_keep_it_live() {
    let router = Router::new().route(
        "/api/v1/ocean/depth-profile",
        post(|| async {
            Json(json!({
                "data": [{ "x": [0, 10, 20], "y": [0.12, null, 0.31], "name": "Chlorophyll" }],
                "layout": { "title": "Depth vs Chlorophyll" }
            }))
        }),
    );
    let backend = serve(router).await;

    let loaded = ocean::load_depth_profile(
        &backend,
        DepthParameter::Chlorophyll,
        &mut StdRng::seed_from_u64(7),
    )
    .await;

    assert_eq!(loaded.origin, Origin::Real);
    assert_eq!(loaded.source, "/api/v1/ocean/depth-profile");
    let y = &loaded.data.data[0].y;
    assert_eq!(y.len(), 3);
    assert!(y[1].is_nan());
}

#[tokio::test]
async fn malformed_series_are_replaced_by_mock_data() {
    let router = Router::new().route(
        "/forecast_interactive",
        get(|| async {
            Json(json!({ "data": [{ "x": [1, 2, 3], "y": [1.0], "name": "broken" }], "layout": {} }))
        }),
    );
    let backend = serve(router).await;

    let loaded = dashboard::load_stock_forecast(&backend, &mut StdRng::seed_from_u64(6)).await;

    assert!(loaded.is_mock());
    assert!(loaded.data.series("Forecast").is_some());
    assert!(loaded.data.validate().is_ok());
}

#[tokio::test]
async fn edna_report_uses_the_server_invasive_subset() {
    let router = Router::new().route(
        "/api/v1/edna/analyze",
        post(|| async {
            Json(json!({
                "detected_species": [
                    { "sequence_id": "seq_1", "predicted_species": "Thunnus albacares", "confidence": 0.85 },
                    { "sequence_id": "seq_2", "predicted_species": "Pterois volitans", "confidence": 0.85 }
                ],
                "invasive_species": [
                    { "species": "Pterois volitans", "status": "invasive", "common_name": "Red lionfish" }
                ]
            }))
        }),
    );
    let backend = serve(router).await;
    let sample = UploadedFile::from_bytes("reads.fasta", b">seq_1\nACGT\n>seq_2\nTTGA\n".to_vec());

    let loaded = biodiversity::analyze(&backend, &sample).await;

    assert_eq!(loaded.origin, Origin::Real);
    let report = &loaded.data;
    assert!((report.detected_species[0].confidence - 85.0).abs() < 1e-9);
    assert!(report.detected_species[1].invasive);
    assert_eq!(report.invasive_alert().map(|hit| hit.display_name()), Some("Red lionfish"));
}

#[tokio::test]
async fn health_check_degrades_to_a_placeholder() {
    let router = Router::new().route(
        "/health-check",
        get(|| async { ([(header::CONTENT_TYPE, "image/png")], png(800, 600)) }),
    );
    let backend = serve(router).await;
    let loaded = fisheries::load_health_check(&backend).await;
    assert_eq!(loaded.origin, Origin::Real);
    assert!(matches!(loaded.data, HealthPanel::Image(ref image) if image.width == 800 && image.height == 600));

    let router = Router::new().route("/health-check", get(|| async { "not an image" }));
    let backend = serve(router).await;
    let loaded = fisheries::load_health_check(&backend).await;
    assert!(loaded.is_mock());
    assert_eq!(loaded.data, HealthPanel::Placeholder);
}

#[tokio::test]
async fn stock_metrics_fall_back_to_the_sample_series() {
    let backend = serve(Router::new()).await;
    let loaded = fisheries::load_stock_metrics(&backend).await;

    assert!(loaded.is_mock());
    assert_eq!(loaded.data.sustainability_status, "Overfishing");
    assert_eq!(loaded.data.current_stock, 11_900);
}
