use axum::body::{to_bytes, Body};
use axum::extract::Query;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use birthday_compat::compat::ZodiacSign;
use birthday_compat::config::UpstreamConfig;
use birthday_compat::upstream::{
    upstream_router, BirthMoment, ChartFetcher, UpstreamError, UpstreamGateway,
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn planet_data(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("planet").map(String::as_str) {
        Some("Sun") => axum::Json(json!({
            "Status": "Pass",
            "Payload": { "Sun": { "Longitude": "128.5", "Sign": "Leo" } }
        }))
        .into_response(),
        Some("Moon") => (
            [(header::CONTENT_TYPE, "application/xml")],
            "<Planet><Name>Moon</Name><ZodiacSign>Cancer</ZodiacSign><Longitude>100.2</Longitude></Planet>",
        )
            .into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("q").map(String::as_str) {
        Some("Mumbai, India") => axum::Json(json!([
            { "lat": "19.0760", "lon": "72.8777", "display_name": "Mumbai, Maharashtra, India" }
        ]))
        .into_response(),
        Some("boom") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => axum::Json(json!([])).into_response(),
    }
}

fn fake_upstream() -> Router {
    Router::new()
        .route("/api/AllPlanetData", get(planet_data))
        .route(
            "/api/Person/SunSign",
            get(|| async { "<Result><ZodiacSign>Leo</ZodiacSign></Result>" }),
        )
        .route(
            "/api/Person/MoonSign",
            get(|| async { axum::Json(json!({ "Payload": { "MoonSign": { "Name": "Ophiuchus" } } })) }),
        )
        .route("/api/blank", get(|| async { "" }))
        .route("/api/long", get(|| async { "x".repeat(1000) }))
        .route(
            "/api/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
        .route("/search", get(search))
}

async fn spawn_upstream() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, fake_upstream())
            .await
            .expect("fake upstream runs");
    });
    addr
}

fn gateway_for(addr: SocketAddr) -> Arc<UpstreamGateway> {
    let config = UpstreamConfig {
        allowed_prefixes: vec![format!("http://{addr}/api")],
        timeout: Duration::from_secs(5),
        user_agent: "birthday-compat-tests".to_string(),
        geocode_url: format!("http://{addr}/search?format=json&limit=1&q="),
    };
    Arc::new(UpstreamGateway::new(&config).expect("gateway builds"))
}

fn birth() -> BirthMoment {
    BirthMoment {
        date: NaiveDate::from_ymd_opt(1998, 8, 21).expect("date"),
        time: NaiveTime::from_hms_opt(18, 30, 0).expect("time"),
        lat: 19.076,
        lon: 72.877,
        tz_minutes: 330,
    }
}

async fn get_response(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router responds")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}

fn proxy_uri(target: &str) -> String {
    format!("/api/proxy?url={}", urlencoding::encode(target))
}

#[tokio::test]
async fn proxy_passes_status_and_body_through() {
    let addr = spawn_upstream().await;
    let router = upstream_router(gateway_for(addr));

    let response = get_response(router.clone(), &proxy_uri(&format!("http://{addr}/api/down"))).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_text(response).await, "maintenance");

    let sun = format!("http://{addr}/api/AllPlanetData?planet=Sun");
    let response = get_response(router, &proxy_uri(&sun)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("\"Longitude\":\"128.5\""));
}

#[tokio::test]
async fn proxy_debug_mode_returns_a_bounded_preview() {
    let addr = spawn_upstream().await;
    let router = upstream_router(gateway_for(addr));
    let target = format!("http://{addr}/api/long");

    let response = get_response(router, &format!("{}&debug=1", proxy_uri(&target))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["proxied_url"], json!(target));
    assert_eq!(body["status"], json!(200));
    assert_eq!(body["preview"].as_str().map(str::len), Some(400));
}

#[tokio::test]
async fn proxy_never_forwards_disallowed_urls() {
    let addr = spawn_upstream().await;
    let router = upstream_router(gateway_for(addr));

    let response = get_response(router, &proxy_uri(&format!("http://{addr}/search?q=x"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proxy_reports_transport_failures() {
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr")
    };
    let router = upstream_router(gateway_for(closed));

    let response = get_response(router, &proxy_uri(&format!("http://{closed}/api/x"))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], json!("proxy failed"));
}

#[tokio::test]
async fn geocode_distinguishes_hits_misses_and_upstream_errors() {
    let addr = spawn_upstream().await;
    let router = upstream_router(gateway_for(addr));

    let response = get_response(router.clone(), "/api/geocode?q=Mumbai%2C%20India").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "lat": 19.076, "lon": 72.8777, "name": "Mumbai, Maharashtra, India" })
    );

    let response = get_response(router.clone(), "/api/geocode?q=Atlantis").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], json!("place not found"));

    let response = get_response(router, "/api/geocode?q=boom").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await["error"],
        json!("geocode upstream error")
    );
}

#[tokio::test]
async fn chart_fetcher_combines_json_and_markup_payloads() {
    let addr = spawn_upstream().await;
    let fetcher = ChartFetcher::new(gateway_for(addr))
        .with_template(format!("http://{addr}/api/AllPlanetData?planet=PLANET&year=YEAR"));

    let signs = fetcher
        .fetch_signs(&birth())
        .await
        .expect("fetch succeeds")
        .expect("both positions resolved");

    assert_eq!(signs.sun.sign, Some(ZodiacSign::Leo));
    assert_eq!(signs.sun.longitude, 128.5);
    assert_eq!(signs.moon.sign, Some(ZodiacSign::Cancer));
    assert_eq!(signs.moon.longitude, 100.2);
}

#[tokio::test]
async fn chart_fetcher_yields_nothing_for_empty_payloads() {
    let addr = spawn_upstream().await;
    let fetcher =
        ChartFetcher::new(gateway_for(addr)).with_template(format!("http://{addr}/api/blank?p=PLANET"));

    let signs = fetcher.fetch_signs(&birth()).await.expect("fetch succeeds");
    assert!(signs.is_none());
}

#[tokio::test]
async fn chart_fetcher_fails_whole_on_upstream_errors() {
    let addr = spawn_upstream().await;
    let down = ChartFetcher::new(gateway_for(addr)).with_template(format!("http://{addr}/api/down"));
    assert!(matches!(
        down.fetch_signs(&birth()).await,
        Err(UpstreamError::Status { status: 503 })
    ));

    let outside = ChartFetcher::new(gateway_for(addr));
    assert!(matches!(
        outside.fetch_signs(&birth()).await,
        Err(UpstreamError::Disallowed { .. })
    ));
}

#[tokio::test]
async fn sign_endpoints_resolve_or_leave_signs_unknown() {
    let addr = spawn_upstream().await;
    let fetcher = ChartFetcher::new(gateway_for(addr)).with_sign_templates(
        format!("http://{addr}/api/Person/SunSign?location=LAT,LON"),
        format!("http://{addr}/api/Person/MoonSign?location=LAT,LON"),
    );

    let (sun, moon) = fetcher
        .fetch_sun_and_moon_signs(&birth())
        .await
        .expect("fetch succeeds");
    assert_eq!(sun, Some(ZodiacSign::Leo));
    assert_eq!(moon, None);

    let default_hosts = ChartFetcher::new(gateway_for(addr));
    assert!(matches!(
        default_hosts.fetch_sun_and_moon_signs(&birth()).await,
        Err(UpstreamError::Disallowed { .. })
    ));
}
