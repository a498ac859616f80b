use serde_json::json;
use vidwatch_core::{ContentIdentifier, MediaType};
use vidwatch_metadata::{ClientConfig, HttpMetadataClient, MetadataError, MetadataSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpMetadataClient {
    HttpMetadataClient::new(ClientConfig {
        base_url: format!("{}/", server.uri()),
        ..Default::default()
    })
}

#[tokio::test]
async fn fetches_series_content_and_seasons() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tv/1399"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Game of Thrones",
            "overview": "Seven noble families fight for control...",
            "seasons": [
                { "season_number": 1, "name": "Season 1", "episode_count": 10 },
                { "season_number": 2, "name": "Season 2", "episode_count": 10 }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let meta = client
        .content(ContentIdentifier::series(1399))
        .await
        .unwrap();
    assert_eq!(meta.title, "Game of Thrones");
    assert_eq!(meta.seasons.len(), 2);

    let seasons = client.seasons(1399).await.unwrap();
    assert_eq!(seasons[1].number, 2);
}

#[tokio::test]
async fn fetches_season_episodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tv/1399/season/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "episodes": [
                { "episode_number": 1, "name": "Valar Dohaeris", "runtime": 55, "air_date": "2013-03-31" },
                { "episode_number": 2, "name": "Dark Wings, Dark Words" }
            ]
        })))
        .mount(&server)
        .await;

    let episodes = client_for(&server).season_episodes(1399, 3).await.unwrap();
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].name, "Valar Dohaeris");
    assert_eq!(episodes[1].runtime_minutes, None);
}

#[tokio::test]
async fn fetches_recommendations_untruncated() {
    let server = MockServer::start().await;
    let results: Vec<_> = (1..=14)
        .map(|i| json!({ "id": i, "title": format!("Movie {i}") }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/movie/550/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(&server)
        .await;

    let recs = client_for(&server)
        .recommendations(ContentIdentifier::movie(550))
        .await
        .unwrap();
    assert_eq!(recs.len(), 14);
    assert!(recs.iter().all(|r| r.media_type == MediaType::Movie));
}

#[tokio::test]
async fn maps_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movie/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/movie/500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/movie/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.content(ContentIdentifier::movie(404)).await,
        Err(MetadataError::NotFound)
    ));
    assert!(matches!(
        client.content(ContentIdentifier::movie(500)).await,
        Err(MetadataError::Status(500))
    ));
    assert!(matches!(
        client.content(ContentIdentifier::movie(1)).await,
        Err(MetadataError::Malformed(_))
    ));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = HttpMetadataClient::new(ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    });
    assert!(matches!(
        client.seasons(1).await,
        Err(MetadataError::Network(_))
    ));
}
