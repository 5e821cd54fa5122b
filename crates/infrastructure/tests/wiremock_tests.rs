//! End-to-end adapter tests against mock HTTP servers

use std::{sync::Arc, time::Duration};

use application::{
    AdvisoryService, ApplicationError, RiskRequest, WeatherRiskService,
    ports::{AdvisoryGeneratorPort, CachePort, GenerationOutcome, HistoricalSeriesPort},
};
use domain::{
    GeoLocation, SeriesQuery, YearRange,
    variables::{WS2M, WS2M_KMH},
};
use infrastructure::{
    AdvisoryAppConfig, CachedSeriesAdapter, GeminiAdvisoryAdapter, MokaCache, PowerAppConfig,
    PowerSeriesAdapter,
};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const POWER_PATH: &str = "/temporal/daily/point";
const GEMINI_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn power_body() -> serde_json::Value {
    serde_json::json!({
        "type": "Feature",
        "properties": {
            "parameter": {
                "T2M_MAX": {"20230101": 30.0, "20230102": 32.0},
                "PRECTOTCORR": {"20230101": 1.0, "20230102": -999.0},
                "WS2M": {"20230101": 2.0, "20230102": 3.0},
                "RH2M": {"20230101": 60.0, "20230102": 70.0}
            }
        },
        "header": {"fill_value": -999.0}
    })
}

fn gemini_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    })
}

fn power_adapter(server: &MockServer) -> PowerSeriesAdapter {
    let config = PowerAppConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    PowerSeriesAdapter::with_config(config.client_config()).unwrap()
}

fn query() -> SeriesQuery {
    SeriesQuery::for_years(
        GeoLocation::new(28.61, 77.21).unwrap(),
        YearRange::new(2023, 2023).unwrap(),
    )
}

fn advisory_config(server: &MockServer) -> AdvisoryAppConfig {
    AdvisoryAppConfig {
        api_key: Some(SecretString::from("test-key".to_string())),
        base_url: server.uri(),
        request_timeout_secs: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn power_adapter_derives_wind_in_kmh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POWER_PATH))
        .and(query_param("start", "20230101"))
        .and(query_param("end", "20231231"))
        .respond_with(ResponseTemplate::new(200).set_body_json(power_body()))
        .mount(&server)
        .await;

    let table = power_adapter(&server).fetch(&query()).await.unwrap();

    assert_eq!(table.len(), 2);
    assert!(table.has_column(WS2M));
    let kmh = table.column(WS2M_KMH).unwrap();
    assert!((kmh[0].unwrap() - 7.2).abs() < 1e-9);
    assert!((kmh[1].unwrap() - 10.8).abs() < 1e-9);
    assert_eq!(table.column("PRECTOTCORR").unwrap()[1], None);
}

#[tokio::test]
async fn power_adapter_maps_upstream_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POWER_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = power_adapter(&server).fetch(&query()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Upstream(_)));
}

#[tokio::test]
async fn cached_adapter_hits_upstream_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POWER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(power_body()))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(MokaCache::for_series(16, Duration::from_secs(60)));
    let adapter =
        CachedSeriesAdapter::new(power_adapter(&server), Arc::clone(&cache), Duration::from_secs(60));

    let first = adapter.fetch(&query()).await.unwrap();
    let second = adapter.fetch(&query()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.stats().hits, 1);
}

#[tokio::test]
async fn cached_adapter_does_not_store_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POWER_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let cache = Arc::new(MokaCache::for_series(16, Duration::from_secs(60)));
    let adapter =
        CachedSeriesAdapter::new(power_adapter(&server), Arc::clone(&cache), Duration::from_secs(60));

    assert!(adapter.fetch(&query()).await.is_err());
    assert!(adapter.fetch(&query()).await.is_err());
}

#[tokio::test]
async fn gemini_adapter_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("Carry water.")))
        .mount(&server)
        .await;

    let adapter = GeminiAdvisoryAdapter::from_config(&advisory_config(&server)).unwrap();
    assert_eq!(
        adapter.generate("prompt").await,
        GenerationOutcome::Text("Carry water.".to_string())
    );
}

#[tokio::test]
async fn gemini_adapter_folds_errors_into_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = GeminiAdvisoryAdapter::from_config(&advisory_config(&server)).unwrap();
    assert!(matches!(adapter.generate("prompt").await, GenerationOutcome::Failed(_)));
}

#[tokio::test]
async fn gemini_adapter_failure_reason_omits_api_key() {
    let config = AdvisoryAppConfig {
        api_key: Some(SecretString::from("SUPERSECRETKEY".to_string())),
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
        ..Default::default()
    };

    let adapter = GeminiAdvisoryAdapter::from_config(&config).unwrap();
    let GenerationOutcome::Failed(reason) = adapter.generate("prompt").await else {
        panic!("unreachable backend must fail");
    };
    assert!(!reason.contains("SUPERSECRETKEY"), "{reason}");
}

#[tokio::test]
async fn gemini_adapter_blank_text_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("   ")))
        .mount(&server)
        .await;

    let adapter = GeminiAdvisoryAdapter::from_config(&advisory_config(&server)).unwrap();
    assert_eq!(adapter.generate("prompt").await, GenerationOutcome::Empty);
}

#[tokio::test]
async fn full_pipeline_uses_generated_advisory_and_caches_it() {
    let power = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POWER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(power_body()))
        .expect(1)
        .mount(&power)
        .await;

    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("Stay shaded.")))
        .expect(1)
        .mount(&gemini)
        .await;

    let config = advisory_config(&gemini);
    let series_cache = Arc::new(MokaCache::for_series(16, Duration::from_secs(60)));
    let advisory_cache: Arc<dyn CachePort> =
        Arc::new(MokaCache::for_advisories(16, Duration::from_secs(60)));

    let series: Arc<dyn HistoricalSeriesPort> = Arc::new(CachedSeriesAdapter::new(
        power_adapter(&power),
        series_cache,
        Duration::from_secs(60),
    ));
    let generator: Arc<dyn AdvisoryGeneratorPort> =
        Arc::new(GeminiAdvisoryAdapter::from_config(&config).unwrap());
    let advisory = Arc::new(AdvisoryService::new(
        generator,
        advisory_cache,
        config.engine_config(Duration::from_secs(60)),
    ));
    let service = WeatherRiskService::new(series, advisory);

    let request = RiskRequest::new(28.61, 77.21).with_years(2023, 2023);
    let first = service.handle(request).await.unwrap();
    let second = service.handle(request).await.unwrap();

    assert_eq!(first.start, "20230101");
    assert_eq!(first.end, "20231231");
    assert_eq!(first.result.advisory, "Stay shaded.");
    assert_eq!(second.result.advisory, "Stay shaded.");
    assert_eq!(first.result.summary.avg_temp_c, Some(31.0));
    assert_eq!(first.result.summary.avg_rain_mm, Some(1.0));
    assert_eq!(first.result.summary.avg_wind_kmh, Some(9.0));
    assert_eq!(first.result.summary.avg_humidity_pct, Some(65.0));
}

#[tokio::test]
async fn full_pipeline_without_key_uses_rules() {
    let power = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POWER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(power_body()))
        .mount(&power)
        .await;

    let config = AdvisoryAppConfig::default();
    let series: Arc<dyn HistoricalSeriesPort> = Arc::new(power_adapter(&power));
    let generator: Arc<dyn AdvisoryGeneratorPort> =
        Arc::new(GeminiAdvisoryAdapter::from_config(&config).unwrap());
    let advisory = Arc::new(AdvisoryService::new(
        generator,
        Arc::new(MokaCache::for_advisories(16, Duration::from_secs(60))),
        config.engine_config(Duration::from_secs(60)),
    ));
    let service = WeatherRiskService::new(series, advisory);

    let report = service
        .handle(RiskRequest::new(28.61, 77.21).with_years(2023, 2023))
        .await
        .unwrap();

    assert!(!report.result.advisory.is_empty());
    assert_ne!(report.result.advisory, "Stay shaded.");
}
