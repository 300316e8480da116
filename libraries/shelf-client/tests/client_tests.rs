//! Tests for the Shelf HTTP client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real API or real metadata providers.

use shelf_client::{
    AlbumProvider, ApiConfig, ClientError, MovieProvider, ProviderClients, ProviderEndpoints,
    SeriesProvider, ShelfApiClient,
};
use shelf_core::{
    CancellationToken, ListId, ListRegistry, MediaDetails, MediaKind, MediaProvider, OwnerId,
    ShelfError,
};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test_token";

fn authed_client(server: &MockServer) -> ShelfApiClient {
    ShelfApiClient::new(ApiConfig::with_token(server.uri(), TOKEN)).unwrap()
}

fn providers(server: &MockServer) -> ProviderClients {
    ProviderClients::new(&ProviderEndpoints::gateway(server.uri())).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let result = ShelfApiClient::new(ApiConfig::new(""));

        match result {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_url_normalization_trailing_slash() {
        let client = ShelfApiClient::new(ApiConfig::new("https://example.com///")).unwrap();
        assert_eq!(client.url().await, "https://example.com");
    }

    #[tokio::test]
    async fn test_missing_token_never_reaches_network() {
        let mock_server = MockServer::start().await;
        let client = ShelfApiClient::new(ApiConfig::new(mock_server.uri())).unwrap();

        let result = client.lists_for_owner(OwnerId::new(1)).await;

        assert!(matches!(result, Err(ShelfError::AuthRequired)));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}

// =============================================================================
// List Registry Tests
// =============================================================================

mod lists {
    use super::*;

    #[tokio::test]
    async fn test_lists_for_owner() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lists/7"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "owner_id": 7, "name": "Noir", "description": "Rain and smoke"},
                {"id": 2, "owner_id": 7, "name": "Road trip", "description": ""}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let lists = client.lists_for_owner(OwnerId::new(7)).await.unwrap();

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].name, "Noir");
        assert_eq!(lists[1].id, ListId::new(2));
    }

    #[tokio::test]
    async fn test_create_list_sends_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/lists"))
            .and(body_json(serde_json::json!({
                "owner_id": 7,
                "name": "Noir",
                "description": "Rain and smoke"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 11, "owner_id": 7, "name": "Noir", "description": "Rain and smoke"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let list = client
            .create_list(OwnerId::new(7), "Noir", "Rain and smoke")
            .await
            .unwrap();

        assert_eq!(list.id, ListId::new(11));
    }

    #[tokio::test]
    async fn test_update_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/lists/11"))
            .and(body_json(serde_json::json!({"name": "Neo-noir", "description": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 11, "owner_id": 7, "name": "Neo-noir", "description": ""
            })))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let list = client
            .update_list(ListId::new(11), "Neo-noir", "")
            .await
            .unwrap();

        assert_eq!(list.name, "Neo-noir");
    }

    #[tokio::test]
    async fn test_delete_missing_list_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/lists/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let result = client.delete_list(ListId::new(99)).await;

        assert!(matches!(result, Err(ShelfError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_server_error_is_surfaced() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lists/7"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        match client.lists_for_owner(OwnerId::new(7)).await {
            Err(ShelfError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected server error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_expired_token_maps_to_auth_required() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lists/7"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let result = client.lists_for_owner(OwnerId::new(7)).await;

        assert!(matches!(result, Err(ShelfError::AuthRequired)));
    }
}

// =============================================================================
// Membership Tests
// =============================================================================

mod memberships {
    use super::*;

    #[tokio::test]
    async fn test_memberships_skip_undecodable_rows() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lists/7/content"))
            .and(query_param("list_name", "Road trip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"membership_id": 1, "owner_id": 7, "list_name": "Road trip",
                 "media_id": "550", "media_kind": "movie"},
                {"membership_id": 2, "owner_id": 7, "list_name": "Road trip",
                 "media_id": "x", "media_kind": "podcast"},
                {"membership_id": 3, "owner_id": 7, "list_name": "Road trip",
                 "media_id": 1399, "media_kind": "series"}
            ])))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let records = client
            .memberships_for_list(OwnerId::new(7), "Road trip", &CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<i64> = records.iter().map(|r| r.membership_id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(records[1].media_id(), Some("1399"));
    }

    #[tokio::test]
    async fn test_memberships_cancelled_mid_flight() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lists/7/content"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let result = client
            .memberships_for_list(OwnerId::new(7), "Road trip", &cancel)
            .await;

        assert!(matches!(result, Err(ShelfError::Cancelled)));
    }

    #[tokio::test]
    async fn test_add_membership_success_and_conflict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/lists/content"))
            .and(body_json(serde_json::json!({
                "owner_id": 7, "media_id": "550", "media_kind": "movie", "list_name": "Noir"
            })))
            .respond_with(ResponseTemplate::new(201))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/lists/content"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already in list"))
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);

        client
            .add_membership(OwnerId::new(7), "Noir", "550", MediaKind::Movie)
            .await
            .unwrap();

        let second = client
            .add_membership(OwnerId::new(7), "Noir", "550", MediaKind::Movie)
            .await;
        match second {
            Err(ShelfError::Conflict(msg)) => assert_eq!(msg, "already in list"),
            other => panic!("Expected conflict, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remove_membership_sends_identity() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/lists/content"))
            .and(header("Authorization", "Bearer test_token"))
            .and(body_json(serde_json::json!({
                "owner_id": 7,
                "media_id": "4aawyAB9vmqN3uQ7FjRGTy",
                "media_kind": "album",
                "list_name": "Noir"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = authed_client(&mock_server);
        client
            .remove_membership(
                OwnerId::new(7),
                "Noir",
                "4aawyAB9vmqN3uQ7FjRGTy",
                MediaKind::Album,
            )
            .await
            .unwrap();
    }
}

// =============================================================================
// Provider Tests
// =============================================================================

mod providers {
    use super::*;

    #[tokio::test]
    async fn test_movie_provider_sends_locale() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .and(query_param("locale", "fr-FR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Fight Club",
                "poster_path": "/fc.jpg",
                "release_date": "1999-10-15"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider: MovieProvider = providers(&mock_server).movie;
        let details = provider
            .fetch("550", "fr-FR", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(details.kind(), MediaKind::Movie);
        assert_eq!(details.display_title(), "Fight Club");
    }

    #[tokio::test]
    async fn test_series_provider() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/series/1399"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Game of Thrones",
                "poster_path": null,
                "first_air_date": "2011-04-17"
            })))
            .mount(&mock_server)
            .await;

        let provider: SeriesProvider = providers(&mock_server).series;
        let details = provider
            .fetch("1399", "en-US", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            details,
            MediaDetails::Series {
                name: "Game of Thrones".into(),
                poster_path: None,
                first_air_date: Some("2011-04-17".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_album_provider_ignores_locale() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/album/4aawyAB9vmqN3uQ7FjRGTy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Global Warming",
                "artists": [{"name": "Pitbull"}],
                "images": [{"url": "https://img.example/gw.jpg", "width": 640, "height": 640}],
                "release_date": "2012-11-16"
            })))
            .mount(&mock_server)
            .await;

        let provider: AlbumProvider = providers(&mock_server).album;
        let details = provider
            .fetch("4aawyAB9vmqN3uQ7FjRGTy", "de-DE", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(details.kind(), MediaKind::Album);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_provider_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/0"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider = providers(&mock_server).movie;
        let result = provider.fetch("0", "en-US", &CancellationToken::new()).await;

        assert!(matches!(result, Err(ShelfError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_provider_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let provider = providers(&mock_server).movie;
        let result = provider.fetch("550", "en-US", &CancellationToken::new()).await;

        assert!(matches!(result, Err(ShelfError::Parse(_))));
    }
}
