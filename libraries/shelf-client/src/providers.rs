//! Metadata providers for movies, series and albums.
//!
//! Each provider is an independent HTTP service. They share nothing but the
//! connection pool of the underlying `reqwest::Client`.

use crate::error::Result;
use crate::http::{
    build_http_client, cancellable, check_status, endpoint, normalize_base_url, read_json, send,
};
use crate::types::{AlbumPayload, MoviePayload, ProviderEndpoints, SeriesPayload};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shelf_core::{MediaDetails, MediaKind, MediaProvider};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Connection settings shared by the provider clients.
#[derive(Debug, Clone)]
struct ProviderHttp {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ProviderHttp {
    fn new(http: Client, base_url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            api_key,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        kind: MediaKind,
        media_id: &str,
        locale: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = endpoint(&self.base_url, &[kind.as_str(), media_id])?;
        debug!(url = %url, media_kind = %kind, media_id = %media_id, "Fetching media metadata");

        let mut request = self.http.get(url);
        if let Some(locale) = locale {
            request = request.query(&[("locale", locale)]);
        }
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let what = format!("{} {}", kind, media_id);
        cancellable(cancel, async {
            let response = send(request).await?;
            let response = check_status(response, &what).await?;
            read_json(response, &what).await
        })
        .await
    }
}

/// Movie metadata provider.
#[derive(Debug, Clone)]
pub struct MovieProvider {
    inner: ProviderHttp,
}

impl MovieProvider {
    /// Create a movie provider rooted at `base_url`.
    pub fn new(http: Client, base_url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            inner: ProviderHttp::new(http, base_url, api_key)?,
        })
    }
}

#[async_trait]
impl MediaProvider for MovieProvider {
    fn kind(&self) -> MediaKind {
        MediaKind::Movie
    }

    async fn fetch(
        &self,
        media_id: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> shelf_core::Result<MediaDetails> {
        let payload: MoviePayload = self
            .inner
            .get(MediaKind::Movie, media_id, Some(locale), cancel)
            .await?;
        Ok(payload.into())
    }
}

/// Series metadata provider.
#[derive(Debug, Clone)]
pub struct SeriesProvider {
    inner: ProviderHttp,
}

impl SeriesProvider {
    /// Create a series provider rooted at `base_url`.
    pub fn new(http: Client, base_url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            inner: ProviderHttp::new(http, base_url, api_key)?,
        })
    }
}

#[async_trait]
impl MediaProvider for SeriesProvider {
    fn kind(&self) -> MediaKind {
        MediaKind::Series
    }

    async fn fetch(
        &self,
        media_id: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> shelf_core::Result<MediaDetails> {
        let payload: SeriesPayload = self
            .inner
            .get(MediaKind::Series, media_id, Some(locale), cancel)
            .await?;
        Ok(payload.into())
    }
}

/// Album metadata provider.
///
/// The album service has no localized data; the locale is not sent.
#[derive(Debug, Clone)]
pub struct AlbumProvider {
    inner: ProviderHttp,
}

impl AlbumProvider {
    /// Create an album provider rooted at `base_url`.
    pub fn new(http: Client, base_url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            inner: ProviderHttp::new(http, base_url, api_key)?,
        })
    }
}

#[async_trait]
impl MediaProvider for AlbumProvider {
    fn kind(&self) -> MediaKind {
        MediaKind::Album
    }

    async fn fetch(
        &self,
        media_id: &str,
        _locale: &str,
        cancel: &CancellationToken,
    ) -> shelf_core::Result<MediaDetails> {
        let payload: AlbumPayload = self
            .inner
            .get(MediaKind::Album, media_id, None, cancel)
            .await?;
        Ok(payload.into())
    }
}

/// The three providers built from one set of endpoints.
#[derive(Debug, Clone)]
pub struct ProviderClients {
    pub movie: MovieProvider,
    pub series: SeriesProvider,
    pub album: AlbumProvider,
}

impl ProviderClients {
    /// Build all providers on a shared HTTP client.
    pub fn new(endpoints: &ProviderEndpoints) -> Result<Self> {
        let http = build_http_client()?;

        Ok(Self {
            movie: MovieProvider::new(http.clone(), &endpoints.movies_url, endpoints.api_key.clone())?,
            series: SeriesProvider::new(
                http.clone(),
                &endpoints.series_url,
                endpoints.api_key.clone(),
            )?,
            album: AlbumProvider::new(http, &endpoints.albums_url, endpoints.api_key.clone())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_report_their_kind() {
        let clients = ProviderClients::new(&ProviderEndpoints::gateway("https://meta.example.com"))
            .expect("valid endpoints");

        assert_eq!(clients.movie.kind(), MediaKind::Movie);
        assert_eq!(clients.series.kind(), MediaKind::Series);
        assert_eq!(clients.album.kind(), MediaKind::Album);
    }

    #[test]
    fn invalid_provider_url_rejected() {
        let mut endpoints = ProviderEndpoints::gateway("https://meta.example.com");
        endpoints.albums_url = "albums.example.com".into();

        assert!(ProviderClients::new(&endpoints).is_err());
    }
}
