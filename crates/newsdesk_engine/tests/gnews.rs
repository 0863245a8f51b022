use std::sync::Arc;
use std::time::Duration;

use newsdesk_core::Category;
use newsdesk_engine::{ArticleSource, DeskConfig, GNewsSource, IngestError, IngestionService};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> DeskConfig {
    DeskConfig {
        endpoint_base_url: format!("{}/api/v4", server.uri()),
        api_key: Some("test-key".into()),
        request_timeout_ms: 2_000,
        ..DeskConfig::default()
    }
}

fn service_for(config: DeskConfig) -> IngestionService {
    IngestionService::from_config(config).expect("valid config")
}

async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_returns_normalized_articles_in_api_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .and(query_param("q", "quantum"))
        .and(query_param("token", "test-key"))
        .and(query_param("lang", "en"))
        .and(query_param("max", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalArticles": 2,
            "articles": [
                {
                    "title": "New qubit design",
                    "description": "A quantum leap",
                    "content": "quantum computing at scale",
                    "url": "https://example.com/qubits",
                    "image": "https://example.com/q.png",
                    "publishedAt": "2020-01-01T00:00:00Z",
                    "source": { "name": "Example", "url": "https://example.com" }
                },
                { "title": "", "url": "" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(config_for(&server));
    let articles = service.fetch_articles(Some("quantum")).await.expect("articles");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "New qubit design");
    assert_eq!(articles[0].category, Category::Quantum);
    assert_eq!(articles[0].source.name, "Example");
    assert_eq!(articles[0].image.as_deref(), Some("https://example.com/q.png"));
    assert_eq!(articles[0].published_at, "Jan 1");

    assert_eq!(articles[1].title, "Untitled");
    assert_eq!(articles[1].url, "#");
    assert_eq!(articles[1].source.name, "Unknown Source");
    assert_eq!(articles[1].published_at, "Recent");
    assert!(articles[0].id != articles[1].id);
}

#[tokio::test]
async fn blank_query_uses_default_query() {
    let server = MockServer::start().await;
    let config = DeskConfig {
        default_query: "robots".into(),
        ..config_for(&server)
    };
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .and(query_param("q", "robots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{ "title": "Robot arm automation" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = service_for(config).fetch_articles(Some("   ")).await.unwrap();
    assert_eq!(articles[0].category, Category::Robotics);
}

#[tokio::test]
async fn unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    mount_status(&server, 401).await;
    let result = service_for(config_for(&server)).fetch_articles(None).await;
    assert_eq!(result, Err(IngestError::Auth));
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    mount_status(&server, 429).await;
    let result = service_for(config_for(&server)).fetch_articles(None).await;
    assert_eq!(result, Err(IngestError::RateLimited));
}

#[tokio::test]
async fn server_error_keeps_status_code() {
    let server = MockServer::start().await;
    mount_status(&server, 500).await;
    let result = service_for(config_for(&server)).fetch_articles(None).await;
    assert_eq!(result, Err(IngestError::Http(500)));
}

#[tokio::test]
async fn errors_envelope_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": ["The request quota has been reached."]
        })))
        .mount(&server)
        .await;

    let result = service_for(config_for(&server)).fetch_articles(None).await;
    assert_eq!(
        result,
        Err(IngestError::Api("The request quota has been reached.".into()))
    );
}

#[tokio::test]
async fn empty_article_list_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "totalArticles": 0, "articles": [] })),
        )
        .mount(&server)
        .await;

    let result = service_for(config_for(&server)).fetch_articles(None).await;
    assert_eq!(result, Err(IngestError::EmptyResult));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "articles": [{ "title": "late" }] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = DeskConfig {
        request_timeout_ms: 200,
        ..config_for(&server)
    };
    let result = service_for(config).fetch_articles(None).await;
    assert_eq!(result, Err(IngestError::Timeout));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
        .mount(&server)
        .await;

    let config = DeskConfig {
        max_body_bytes: 1024,
        ..config_for(&server)
    };
    let result = service_for(config).fetch_articles(None).await;
    assert!(matches!(result, Err(IngestError::Network(_))));
}

#[tokio::test]
async fn probe_asks_for_a_single_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .and(query_param("q", "test"))
        .and(query_param("max", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "articles": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(config_for(&server));
    assert_eq!(service.test_connection().await, Ok(()));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let config = DeskConfig {
        endpoint_base_url: "http://127.0.0.1:9/api/v4".into(),
        api_key: Some("test-key".into()),
        ..DeskConfig::default()
    };
    let source: Arc<dyn ArticleSource> = Arc::new(GNewsSource::from_config(&config).unwrap());
    let result = source.search("anything", 1).await;
    assert!(matches!(
        result,
        Err(IngestError::Network(_)) | Err(IngestError::Timeout)
    ));
}
