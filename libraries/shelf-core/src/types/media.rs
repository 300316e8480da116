/// Resolved media types
use crate::types::{MediaKind, MembershipId};
use serde::{Deserialize, Serialize};

/// Display metadata returned by a media provider
///
/// The variant is chosen by the provider that produced the value, never
/// inferred later from which fields happen to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaDetails {
    /// Movie metadata
    Movie {
        /// Localized title
        title: String,
        /// Poster image path or URL
        poster_path: Option<String>,
        /// Release date (YYYY-MM-DD)
        release_date: Option<String>,
    },
    /// Series metadata
    Series {
        /// Localized series name
        name: String,
        /// Poster image path or URL
        poster_path: Option<String>,
        /// First air date (YYYY-MM-DD)
        first_air_date: Option<String>,
    },
    /// Album metadata
    Album {
        /// Album name
        name: String,
        /// Primary artist
        artist: Option<String>,
        /// Cover image URL
        cover_url: Option<String>,
        /// Release date, precision varies by provider
        release_date: Option<String>,
    },
}

impl MediaDetails {
    /// Media kind of this value
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaDetails::Movie { .. } => MediaKind::Movie,
            MediaDetails::Series { .. } => MediaKind::Series,
            MediaDetails::Album { .. } => MediaKind::Album,
        }
    }

    /// Title or name shown to the user
    pub fn display_title(&self) -> &str {
        match self {
            MediaDetails::Movie { title, .. } => title,
            MediaDetails::Series { name, .. } | MediaDetails::Album { name, .. } => name,
        }
    }

    /// Poster or cover image
    pub fn image_url(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie { poster_path, .. } | MediaDetails::Series { poster_path, .. } => {
                poster_path.as_deref()
            }
            MediaDetails::Album { cover_url, .. } => cover_url.as_deref(),
        }
    }

    /// Release or first-air date
    pub fn date(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie { release_date, .. } | MediaDetails::Album { release_date, .. } => {
                release_date.as_deref()
            }
            MediaDetails::Series { first_air_date, .. } => first_air_date.as_deref(),
        }
    }
}

/// A list member ready for display
///
/// Derived from a membership record plus provider metadata; recomputable and
/// never the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMediaItem {
    /// Membership id of the record this item was resolved from
    pub internal_id: MembershipId,

    /// Provider-specific media identifier
    pub media_id: String,

    /// Provider metadata
    pub details: MediaDetails,
}

impl ResolvedMediaItem {
    /// Create a resolved item
    pub fn new(internal_id: MembershipId, media_id: impl Into<String>, details: MediaDetails) -> Self {
        Self {
            internal_id,
            media_id: media_id.into(),
            details,
        }
    }

    /// Media kind of this item
    pub fn kind(&self) -> MediaKind {
        self.details.kind()
    }
}
