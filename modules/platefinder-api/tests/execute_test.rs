use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foursquare_client::FoursquareClient;
use llm_client::LlmClient;
use platefinder_api::{router, AppState};

fn app(llm: &MockServer, places: &MockServer) -> Router {
    let state = Arc::new(AppState {
        llm: LlmClient::new("test-key").with_base_url(&llm.uri()),
        places: FoursquareClient::new(Some("fsq-test-key".to_string()))
            .with_base_url(&places.uri()),
        model: "test-model".to_string(),
    });
    router(state)
}

fn app_with_unreachable_places(llm: &MockServer) -> Router {
    let state = Arc::new(AppState {
        llm: LlmClient::new("test-key").with_base_url(&llm.uri()),
        places: FoursquareClient::new(Some("fsq-test-key".to_string()))
            .with_base_url("http://127.0.0.1:9"),
        model: "test-model".to_string(),
    });
    router(state)
}

/// Chat completion body carrying one restaurant_search tool call with the
/// given argument payload.
fn tool_call_body(arguments: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "restaurant_search", "arguments": arguments}
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}

async fn mock_llm_tool_call(server: &MockServer, arguments: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_body(arguments)))
        .mount(server)
        .await;
}

async fn post_message(app: Router, message: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/execute")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({"message": message}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn end_to_end_success_relays_results_verbatim() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(
        &llm,
        "{\"query\": \"sushi\", \"near\": \"downtown Seattle\"}",
    )
    .await;

    let results = serde_json::json!({
        "results": [{"name": "Sushi Kashiba", "location": {"locality": "Seattle"}}]
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results.clone()))
        .expect(1)
        .mount(&places)
        .await;

    let (status, body) = post_message(
        app(&llm, &places),
        "find sushi near downtown Seattle",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, results);

    // The outbound search carried exactly the two extracted parameters.
    let requests = places.received_requests().await.unwrap();
    let mut query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    query.sort();
    assert_eq!(
        query,
        [
            ("near".to_string(), "downtown Seattle".to_string()),
            ("query".to_string(), "sushi".to_string()),
        ]
    );
}

#[tokio::test]
async fn missing_location_is_a_400_with_prompting_message() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"query\": \"sushi\"}").await;

    let (status, body) = post_message(app(&llm, &places), "find sushi").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Please specify a location for the search (e.g., 'near downtown LA', or provide coordinates)."
    );
    // Validation failed before any search round trip.
    assert!(places.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_sort_is_a_400_naming_the_field() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"near\": \"Seattle\", \"sort\": \"RATING\"}").await;

    let (status, body) = post_message(app(&llm, &places), "best rated sushi in Seattle").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("'sort'"));
    assert!(detail.contains("RELEVANCE, DISTANCE"));
}

#[tokio::test]
async fn free_text_reply_surfaces_as_400() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Which city should I search?"}
            }]
        })))
        .mount(&llm)
        .await;

    let (status, body) = post_message(app(&llm, &places), "find food").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Which city should I search?");
}

#[tokio::test]
async fn malformed_tool_arguments_are_a_500() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{not json").await;

    let (status, body) = post_message(app(&llm, &places), "find sushi in Seattle").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "LLM returned invalid JSON for tool arguments.");
}

#[tokio::test]
async fn llm_failure_is_a_generic_500() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "bad key"})),
        )
        .mount(&llm)
        .await;

    let (status, body) = post_message(app(&llm, &places), "find sushi in Seattle").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "An internal server error occurred.");
}

#[tokio::test]
async fn upstream_401_passes_through_with_upstream_message() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"near\": \"Seattle\"}").await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Invalid API key"})),
        )
        .mount(&places)
        .await;

    let (status, body) = post_message(app(&llm, &places), "food in Seattle").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Restaurant search failed: Invalid API key");
}

#[tokio::test]
async fn upstream_400_names_the_unrecognized_location() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"near\": \"Atlantis\"}").await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"message": "geocode failed"})),
        )
        .mount(&places)
        .await;

    let (status, body) = post_message(app(&llm, &places), "food in Atlantis").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Could not find results for the location: 'Atlantis'. Please check the location name or try a different one."
    );
}

#[tokio::test]
async fn upstream_500_is_a_fixed_502() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"near\": \"Seattle\"}").await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&places)
        .await;

    let (status, body) = post_message(app(&llm, &places), "food in Seattle").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["detail"],
        "The restaurant service is currently unavailable. Please try again later."
    );
}

#[tokio::test]
async fn unreachable_search_service_is_a_503() {
    let llm = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"near\": \"Seattle\"}").await;

    let (status, body) = post_message(app_with_unreachable_places(&llm), "food in Seattle").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Could not connect to the restaurant service:"));
}

#[tokio::test]
async fn missing_foursquare_credential_is_a_500() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    mock_llm_tool_call(&llm, "{\"near\": \"Seattle\"}").await;

    let state = Arc::new(AppState {
        llm: LlmClient::new("test-key").with_base_url(&llm.uri()),
        places: FoursquareClient::new(None).with_base_url(&places.uri()),
        model: "test-model".to_string(),
    });

    let (status, body) = post_message(router(state), "food in Seattle").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Foursquare API key is not configured.");
    assert!(places.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn health_check_responds_ok() {
    let llm = MockServer::start().await;
    let places = MockServer::start().await;

    let response = app(&llm, &places)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
