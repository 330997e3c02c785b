//! Tests for the HTTP playlist provider.
//!
//! These use a mock server to verify fetch, validation, retry, and
//! caching behavior without a real station.

use chrono::NaiveDate;
use serde_json::json;
use unison_core::{PlaylistProvider, ProviderError};
use unison_provider::{HttpPlaylistProvider, ProviderConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn march_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn document() -> serde_json::Value {
    json!([
        {
            "id": "t1",
            "title": "Opener",
            "artist": "Band A",
            "duration": 180,
            "mediaUri": "https://cdn.example.com/t1.mp3",
            "artworkUri": "https://cdn.example.com/t1.jpg"
        },
        {
            "id": "t2",
            "title": "Closer",
            "artist": "Band B",
            "duration": 120,
            "mediaUri": "https://cdn.example.com/t2.mp3",
            "artworkUri": "https://cdn.example.com/t2.jpg"
        }
    ])
}

fn provider_for(server: &MockServer) -> HttpPlaylistProvider {
    let config = ProviderConfig {
        retry_base_ms: 1,
        ..ProviderConfig::new(server.uri())
    };
    HttpPlaylistProvider::new(config).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

mod construction {
    use super::*;

    #[test]
    fn valid_urls_accepted() {
        assert!(HttpPlaylistProvider::new(ProviderConfig::new("https://example.com")).is_ok());
        assert!(HttpPlaylistProvider::new(ProviderConfig::new("http://localhost:8080")).is_ok());
    }

    #[test]
    fn empty_url_rejected() {
        let result = HttpPlaylistProvider::new(ProviderConfig::new(""));
        assert!(matches!(result, Err(ProviderError::InvalidUrl(_))));
    }

    #[test]
    fn url_without_scheme_rejected() {
        let result = HttpPlaylistProvider::new(ProviderConfig::new("example.com"));
        assert!(matches!(result, Err(ProviderError::InvalidUrl(_))));
    }
}

// =============================================================================
// Fetch
// =============================================================================

mod fetch {
    use super::*;

    #[tokio::test]
    async fn valid_document_becomes_a_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/2024-03-01.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let playlist = provider.fetch(march_first()).await.unwrap();

        assert_eq!(playlist.rotation_date, march_first());
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.total_duration_secs(), 300);
        // Document order is the shuffle input ordering; preserved exactly
        assert_eq!(playlist.tracks()[0].id, "t1");
        assert_eq!(playlist.tracks()[1].id, "t2");
    }

    #[tokio::test]
    async fn missing_playlist_is_not_found_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch(march_first()).await.unwrap_err();

        assert!(matches!(err, ProviderError::NotFound(date) if date == march_first()));
    }

    #[tokio::test]
    async fn server_errors_are_retried_to_the_attempt_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch(march_first()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn transient_failure_recovers_within_one_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document()))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let playlist = provider.fetch(march_first()).await.unwrap();

        assert_eq!(playlist.len(), 2);
    }

    #[tokio::test]
    async fn malformed_body_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch(march_first()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn invalid_playlist_is_rejected() {
        let server = MockServer::start().await;
        let zero_duration = json!([
            {
                "id": "t1",
                "title": "Broken",
                "artist": "Band",
                "duration": 0,
                "mediaUri": "https://cdn.example.com/t1.mp3",
                "artworkUri": "https://cdn.example.com/t1.jpg"
            }
        ]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(zero_duration))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.fetch(march_first()).await.unwrap_err();

        assert!(matches!(err, ProviderError::InvalidPlaylist(_)));
    }
}

// =============================================================================
// Caching
// =============================================================================

mod caching {
    use super::*;

    #[tokio::test]
    async fn last_good_playlist_survives_an_outage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/2024-03-01.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlists/2024-03-02.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        assert!(provider.cached().await.is_none());

        let playlist = provider.fetch(march_first()).await.unwrap();
        assert_eq!(provider.cached().await.unwrap(), playlist);

        // The next day's fetch fails; the cached playlist is untouched
        let next_day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert!(provider.fetch(next_day).await.is_err());
        assert_eq!(provider.cached().await.unwrap(), playlist);
    }
}
