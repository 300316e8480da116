/// Shelf CLI configuration
use serde::{Deserialize, Serialize};
use shelf_client::{ApiConfig, ProviderEndpoints};
use shelf_core::{OwnerId, Result, ShelfError};
use std::path::{Path, PathBuf};

/// File read when no `--config` is given, if present
pub const DEFAULT_CONFIG_FILE: &str = "shelf.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShelfConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_providers")]
    pub providers: ProviderSettings,

    #[serde(default = "default_display")]
    pub display: DisplaySettings,

    /// Owner whose lists are managed, overridable per command
    #[serde(default)]
    pub owner: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_url")]
    pub movies_url: String,

    #[serde(default = "default_provider_url")]
    pub series_url: String,

    #[serde(default = "default_provider_url")]
    pub albums_url: String,

    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl ShelfConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `shelf.toml` in the working
    /// directory is used when present. `SHELF_`-prefixed variables override
    /// both, with `__` between nested keys (`SHELF_API__ACCESS_TOKEN`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SHELF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ShelfError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ShelfError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.api.url) {
            return Err(ShelfError::Config(format!(
                "API URL must start with http:// or https:// (got {:?})",
                self.api.url
            )));
        }

        for (name, url) in [
            ("movies", &self.providers.movies_url),
            ("series", &self.providers.series_url),
            ("albums", &self.providers.albums_url),
        ] {
            if !is_http_url(url) {
                return Err(ShelfError::Config(format!(
                    "{} provider URL must start with http:// or https:// (got {:?})",
                    name, url
                )));
            }
        }

        if self.display.locale.trim().is_empty() {
            return Err(ShelfError::Config("Display locale cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Owner to act as; `--owner` wins over the configured one
    pub fn owner_id(&self, override_owner: Option<i64>) -> Result<OwnerId> {
        override_owner
            .or(self.owner)
            .map(OwnerId::new)
            .ok_or_else(|| {
                ShelfError::Config("No owner given (use --owner or set SHELF_OWNER)".to_string())
            })
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            url: self.api.url.clone(),
            access_token: self.api.access_token.clone(),
        }
    }

    pub fn provider_endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            movies_url: self.providers.movies_url.clone(),
            series_url: self.providers.series_url.clone(),
            albums_url: self.providers.albums_url.clone(),
            api_key: self.providers.api_key.clone(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_api_url(),
        access_token: None,
    }
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_providers() -> ProviderSettings {
    ProviderSettings {
        movies_url: default_provider_url(),
        series_url: default_provider_url(),
        albums_url: default_provider_url(),
        api_key: None,
    }
}

fn default_provider_url() -> String {
    "http://localhost:8080/meta".to_string()
}

fn default_display() -> DisplaySettings {
    DisplaySettings {
        locale: default_locale(),
    }
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            providers: default_providers(),
            display: default_display(),
            owner: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write config");
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = ShelfConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.locale, "en-US");
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn loads_file_with_partial_sections() {
        let file = write_config(
            r#"
            owner = 42

            [api]
            url = "https://api.shelf.example"
            access_token = "secret"

            [providers]
            albums_url = "https://music.example"
            "#,
        );

        let config = ShelfConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.api.url, "https://api.shelf.example");
        assert_eq!(config.api.access_token.as_deref(), Some("secret"));
        assert_eq!(config.providers.albums_url, "https://music.example");
        assert_eq!(config.providers.movies_url, default_provider_url());
        assert_eq!(config.owner_id(None).unwrap(), OwnerId::new(42));
        assert_eq!(config.owner_id(Some(7)).unwrap(), OwnerId::new(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = ShelfConfig::load(Some(&missing));

        assert!(matches!(result, Err(ShelfError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_urls_and_locale() {
        let mut config = ShelfConfig::default();
        config.api.url = "localhost:8080".to_string();
        assert!(config.validate().is_err());

        let mut config = ShelfConfig::default();
        config.providers.series_url = "ftp://series".to_string();
        assert!(config.validate().is_err());

        let mut config = ShelfConfig::default();
        config.display.locale = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn owner_is_required() {
        let config = ShelfConfig::default();
        assert!(matches!(config.owner_id(None), Err(ShelfError::Config(_))));
    }

    #[test]
    fn converts_to_client_settings() {
        let mut config = ShelfConfig::default();
        config.api.access_token = Some("t".to_string());
        config.providers.api_key = Some("k".to_string());

        let api = config.api_config();
        let endpoints = config.provider_endpoints();

        assert_eq!(api.access_token.as_deref(), Some("t"));
        assert_eq!(endpoints.api_key.as_deref(), Some("k"));
        assert_eq!(endpoints.albums_url, config.providers.albums_url);
    }
}
