use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use geodb_core::{CacheState, Country, DatasetCache, LoadError};
use geodb_server::web::{router, AppState};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

fn dataset() -> Value {
    json!([
        {"id": 1, "name": "Afghanistan", "iso2": "AF", "iso3": "AFG",
         "region": "Asia", "subregion": "Southern Asia", "capital": "Kabul",
         "states": [
            {"id": 3901, "name": "Badakhshan", "cities": [
                {"id": 52, "name": "Ashkāsham", "latitude": "36.68333000"},
                {"id": 68, "name": "Fayzabad"}
            ]},
            {"id": 130, "name": "Badghis", "state_code": "BDG", "cities": [
                {"id": 78, "name": "Qala i Naw"}
            ]}
         ]},
        {"id": 2, "name": "Aland Islands", "iso2": "AX", "iso3": "ALA",
         "region": "Europe", "subregion": "Northern Europe"},
        {"id": 3, "name": "Albania", "iso2": "AL", "iso3": "ALB",
         "region": "Europe", "subregion": "Southern Europe", "states": []},
        {"id": 8, "name": "Antarctica", "iso2": "AQ", "iso3": "ATA",
         "region": "Polar", "subregion": ""}
    ])
}

struct TestApp {
    app: Router,
    cache: DatasetCache,
    // Keeps the fixture files alive for the app's lifetime.
    _dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("countries_states_cities.json");
    std::fs::write(&data, dataset().to_string()).unwrap();
    let demo = dir.path().join("demo.json");
    std::fs::write(&demo, r#"{"demo": true, "items": [1, 2, 3]}"#).unwrap();

    let cache = DatasetCache::from_path(&data);
    let app = router(AppState::new(cache.clone(), demo));
    TestApp {
        app,
        cache,
        _dir: dir,
    }
}

fn broken_app() -> (Router, DatasetCache) {
    let cache = DatasetCache::from_path("/definitely/not/here/countries.json");
    let app = router(AppState::new(cache.clone(), "/definitely/not/here/demo.json"));
    (app, cache)
}

// Helper function to send requests to the app
async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn root_returns_message() {
    let t = test_app();
    let (status, body) = get(&t.app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Country Data API"}));
}

#[tokio::test]
async fn countries_list_is_summaries_in_dataset_order() {
    let t = test_app();
    let (status, body) = get(&t.app, "/countries").await;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    let ids: Vec<_> = list.iter().map(|c| c["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3, 8]);
    assert_eq!(
        list[0],
        json!({"id": 1, "name": "Afghanistan", "iso2": "AF", "iso3": "AFG",
               "region": "Asia", "subregion": "Southern Asia"})
    );
    assert!(list[0].get("states").is_none());
}

#[tokio::test]
async fn id_and_iso_lookups_return_the_same_object() {
    let t = test_app();
    let (s1, by_id) = get(&t.app, "/countries/1").await;
    let (s2, by_iso2) = get(&t.app, "/countries/iso/af").await;
    let (s3, by_iso3) = get(&t.app, "/countries/iso/AFG").await;

    assert_eq!((s1, s2, s3), (StatusCode::OK, StatusCode::OK, StatusCode::OK));
    assert_eq!(by_id, by_iso2);
    assert_eq!(by_id, by_iso3);
    assert_eq!(by_id["capital"], "Kabul");
    assert_eq!(by_id["states"][1]["cities"][0]["name"], "Qala i Naw");
}

#[tokio::test]
async fn country_errors() {
    let t = test_app();
    assert_eq!(
        get(&t.app, "/countries/99999").await,
        (StatusCode::NOT_FOUND, json!({"error": "Country not found"}))
    );
    assert_eq!(
        get(&t.app, "/countries/abc").await,
        (StatusCode::BAD_REQUEST, json!({"error": "Invalid country ID"}))
    );
    assert_eq!(
        get(&t.app, "/countries/iso/ABCD").await,
        (StatusCode::BAD_REQUEST, json!({"error": "Invalid ISO code format"}))
    );
    assert_eq!(
        get(&t.app, "/countries/iso/ZZ").await,
        (StatusCode::NOT_FOUND, json!({"error": "Country not found"}))
    );
}

#[tokio::test]
async fn out_of_range_ids_are_not_found() {
    let t = test_app();
    for uri in [
        "/countries/99999999999999999999",
        "/countries/-9223372036854775808",
        "/countries/99999999999999999999/cities",
    ] {
        assert_eq!(
            get(&t.app, uri).await,
            (StatusCode::NOT_FOUND, json!({"error": "Country not found"})),
            "{uri}"
        );
    }
    assert_eq!(
        get(&t.app, "/states/-9223372036854775808").await,
        (StatusCode::NOT_FOUND, json!({"error": "State not found"}))
    );
}

#[tokio::test]
async fn non_utf8_path_segments_get_json_answers() {
    let t = test_app();
    assert_eq!(
        get(&t.app, "/countries/%FF").await,
        (StatusCode::BAD_REQUEST, json!({"error": "Invalid country ID"}))
    );
    assert_eq!(
        get(&t.app, "/states/%FF/cities").await,
        (StatusCode::BAD_REQUEST, json!({"error": "Invalid state ID"}))
    );
    assert_eq!(
        get(&t.app, "/countries/iso/%FF%FF").await,
        (StatusCode::NOT_FOUND, json!({"error": "Country not found"}))
    );
    assert_eq!(get(&t.app, "/countries/search/%FF").await, (StatusCode::OK, json!([])));
    assert_eq!(get(&t.app, "/regions/%C3/countries").await, (StatusCode::OK, json!([])));
    assert_eq!(get(&t.app, "/subregions/%C3/countries").await, (StatusCode::OK, json!([])));
}

#[tokio::test]
async fn country_states_and_cities() {
    let t = test_app();
    let (status, states) = get(&t.app, "/countries/1/states").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(states.as_array().unwrap().len(), 2);

    let (status, empty) = get(&t.app, "/countries/2/states").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));

    let (status, cities) = get(&t.app, "/countries/1/cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cities,
        json!([
            {"id": 52, "name": "Ashkāsham", "latitude": "36.68333000", "state_name": "Badakhshan"},
            {"id": 68, "name": "Fayzabad", "state_name": "Badakhshan"},
            {"id": 78, "name": "Qala i Naw", "state_name": "Badghis"}
        ])
    );

    assert_eq!(get(&t.app, "/countries/42/cities").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&t.app, "/countries/x/states").await.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn state_lookup_includes_country_name() {
    let t = test_app();
    let (status, state) = get(&t.app, "/states/130").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["name"], "Badghis");
    assert_eq!(state["state_code"], "BDG");
    assert_eq!(state["country_name"], "Afghanistan");

    let (status, cities) = get(&t.app, "/states/130/cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cities, json!([{"id": 78, "name": "Qala i Naw", "state_name": "Badghis"}]));

    assert_eq!(
        get(&t.app, "/states/5").await,
        (StatusCode::NOT_FOUND, json!({"error": "State not found"}))
    );
    assert_eq!(
        get(&t.app, "/states/abc/cities").await,
        (StatusCode::BAD_REQUEST, json!({"error": "Invalid state ID"}))
    );
}

#[tokio::test]
async fn search_and_region_filters() {
    let t = test_app();
    let (status, found) = get(&t.app, "/countries/search/AL").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Aland Islands", "Albania"]);

    assert_eq!(get(&t.app, "/countries/search/atlantis").await, (StatusCode::OK, json!([])));

    let (_, lower) = get(&t.app, "/regions/asia/countries").await;
    let (_, upper) = get(&t.app, "/regions/ASIA/countries").await;
    assert_eq!(lower, upper);
    assert_eq!(lower.as_array().unwrap().len(), 1);

    let (_, europe) = get(&t.app, "/subregions/northern%20europe/countries").await;
    assert_eq!(europe[0]["name"], "Aland Islands");
}

#[tokio::test]
async fn region_lists_are_sorted() {
    let t = test_app();
    assert_eq!(
        get(&t.app, "/regions").await,
        (StatusCode::OK, json!(["Asia", "Europe", "Polar"]))
    );
    assert_eq!(
        get(&t.app, "/subregions").await,
        (
            StatusCode::OK,
            json!(["Northern Europe", "Southern Asia", "Southern Europe"])
        )
    );
}

#[tokio::test]
async fn health_reports_cache_lifecycle() {
    let t = test_app();
    let (status, before) = get(&t.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["status"], "ok");
    assert_eq!(before["cache_initialized"], false);
    assert_eq!(before["cache_state"], "uninitialized");
    assert_eq!(before["countries_count"], 0);
    assert!(before["uptime"].as_f64().unwrap() >= 0.0);
    assert!(before["memory"]["rss"].is_u64());

    get(&t.app, "/countries").await;

    let (_, after) = get(&t.app, "/health").await;
    assert_eq!(after["cache_initialized"], true);
    assert_eq!(after["cache_state"], "ready");
    assert_eq!(after["countries_count"], 4);
    assert_eq!(t.cache.state(), CacheState::Ready);
}

#[tokio::test]
async fn load_failures_are_generic_500s_and_validation_still_works() {
    let (app, cache) = broken_app();

    assert_eq!(
        get(&app, "/countries").await,
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Failed to retrieve countries"})
        )
    );
    assert_eq!(
        get(&app, "/countries/1").await,
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Failed to retrieve country data"})
        )
    );
    assert_eq!(
        get(&app, "/regions").await.1,
        json!({"error": "Failed to retrieve regions data"})
    );
    assert_eq!(
        get(&app, "/countries/abc").await,
        (StatusCode::BAD_REQUEST, json!({"error": "Invalid country ID"}))
    );

    let (status, health) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["cache_initialized"], false);
    assert_eq!(cache.state(), CacheState::Uninitialized);
    // Every failed request retried the build.
    assert_eq!(cache.build_attempts(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_requests_build_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let source = move || -> Result<Vec<Country>, LoadError> {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(50));
        Ok(serde_json::from_value(dataset()).unwrap())
    };
    let cache = DatasetCache::new(Arc::new(source));
    let app = router(AppState::new(cache.clone(), "demo.json"));

    let requests: Vec<_> = ["/countries", "/countries/1", "/regions", "/states/130"]
        .into_iter()
        .cycle()
        .take(24)
        .map(|uri| {
            let app = app.clone();
            tokio::spawn(async move { get(&app, uri).await.0 })
        })
        .collect();
    for request in requests {
        assert_eq!(request.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.build_attempts(), 1);
}

#[tokio::test]
async fn demo_files_endpoint() {
    let t = test_app();
    assert_eq!(
        get(&t.app, "/files").await,
        (StatusCode::OK, json!({"demo": true, "items": [1, 2, 3]}))
    );

    let (app, _) = broken_app();
    let (status, body) = get(&app, "/files").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to read file");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_routes_are_json_404s() {
    let t = test_app();
    assert_eq!(
        get(&t.app, "/planets").await,
        (StatusCode::NOT_FOUND, json!({"error": "Not found"}))
    );
}

#[test]
fn fixture_is_valid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(dataset().to_string().as_bytes()).unwrap();
    assert!(geodb_core::load_countries(file.path()).is_ok());
}
