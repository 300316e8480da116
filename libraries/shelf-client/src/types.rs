//! Types for Shelf API requests and responses.

use serde::{Deserialize, Serialize};
use shelf_core::{MediaDetails, MediaKind, OwnerId};

/// Configuration for connecting to the Shelf list API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://api.shelf.example")
    pub url: String,
    /// Bearer credential supplied by the session layer
    pub access_token: Option<String>,
}

impl ApiConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// Base URLs of the three metadata providers.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub movies_url: String,
    pub series_url: String,
    pub albums_url: String,
    /// Optional bearer key sent to every provider
    pub api_key: Option<String>,
}

impl ProviderEndpoints {
    /// All three providers served from one gateway.
    pub fn gateway(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            movies_url: url.clone(),
            series_url: url.clone(),
            albums_url: url,
            api_key: None,
        }
    }
}

// =============================================================================
// List Types
// =============================================================================

/// Request body for list creation.
#[derive(Debug, Serialize)]
pub struct CreateListRequest<'a> {
    pub owner_id: OwnerId,
    pub name: &'a str,
    pub description: &'a str,
}

/// Request body for list update.
#[derive(Debug, Serialize)]
pub struct UpdateListRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Request body for membership add and remove.
#[derive(Debug, Serialize)]
pub struct MembershipRequest<'a> {
    pub owner_id: OwnerId,
    pub media_id: &'a str,
    pub media_kind: MediaKind,
    pub list_name: &'a str,
}

// =============================================================================
// Provider Types
// =============================================================================

/// Movie as returned by the movie provider.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePayload {
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
}

impl From<MoviePayload> for MediaDetails {
    fn from(p: MoviePayload) -> Self {
        MediaDetails::Movie {
            title: p.title,
            poster_path: p.poster_path,
            release_date: non_empty(p.release_date),
        }
    }
}

/// Series as returned by the series provider.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesPayload {
    pub name: String,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
}

impl From<SeriesPayload> for MediaDetails {
    fn from(p: SeriesPayload) -> Self {
        MediaDetails::Series {
            name: p.name,
            poster_path: p.poster_path,
            first_air_date: non_empty(p.first_air_date),
        }
    }
}

/// Album as returned by the album provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumPayload {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
    pub release_date: Option<String>,
}

/// Artist credit on an album.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumArtist {
    pub name: String,
}

/// Cover image variant; providers list the largest first.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<AlbumPayload> for MediaDetails {
    fn from(p: AlbumPayload) -> Self {
        MediaDetails::Album {
            name: p.name,
            artist: p.artists.into_iter().next().map(|a| a.name),
            cover_url: p.images.into_iter().next().map(|i| i.url),
            release_date: non_empty(p.release_date),
        }
    }
}

// Providers send "" for unknown dates.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_payload_takes_first_artist_and_image() {
        let payload: AlbumPayload = serde_json::from_value(serde_json::json!({
            "name": "Kid A",
            "artists": [{"name": "Radiohead"}, {"name": "Guest"}],
            "images": [
                {"url": "https://img.example/640.jpg", "width": 640, "height": 640},
                {"url": "https://img.example/64.jpg", "width": 64, "height": 64}
            ],
            "release_date": "2000-10-02"
        }))
        .unwrap();

        let details = MediaDetails::from(payload);
        assert_eq!(
            details,
            MediaDetails::Album {
                name: "Kid A".into(),
                artist: Some("Radiohead".into()),
                cover_url: Some("https://img.example/640.jpg".into()),
                release_date: Some("2000-10-02".into()),
            }
        );
    }

    #[test]
    fn empty_release_date_is_dropped() {
        let payload = MoviePayload {
            title: "Untitled".into(),
            poster_path: None,
            release_date: Some(String::new()),
        };
        assert_eq!(MediaDetails::from(payload).date(), None);
    }

    #[test]
    fn membership_request_serializes_kind_lowercase() {
        let body = MembershipRequest {
            owner_id: OwnerId::new(4),
            media_id: "550",
            media_kind: MediaKind::Movie,
            list_name: "Noir",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "owner_id": 4,
                "media_id": "550",
                "media_kind": "movie",
                "list_name": "Noir"
            })
        );
    }
}
