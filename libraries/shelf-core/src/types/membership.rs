/// Membership domain types
use crate::types::{MembershipId, OwnerId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media a membership points at; selects the resolving provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Movie, resolved by the movie provider
    Movie,
    /// Series, resolved by the series provider (numeric ids)
    Series,
    /// Album, resolved by the album provider
    Album,
}

impl MediaKind {
    /// All kinds, in provider registration order
    pub const ALL: [MediaKind; 3] = [MediaKind::Movie, MediaKind::Series, MediaKind::Album];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Album => "album",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "series" => Ok(MediaKind::Series),
            "album" => Ok(MediaKind::Album),
            other => Err(format!("unknown media kind: {}", other)),
        }
    }
}

/// "This media item belongs to this list"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Stable membership handle
    pub membership_id: MembershipId,

    /// Owner user ID
    pub owner_id: OwnerId,

    /// Name of the list the item belongs to
    pub list_name: String,

    /// Provider-specific media identifier (absent in corrupt records)
    #[serde(default, deserialize_with = "deserialize_media_id")]
    pub media_id: Option<String>,

    /// Which provider resolves `media_id`
    pub media_kind: MediaKind,
}

impl MembershipRecord {
    /// Create a membership record
    pub fn new(
        membership_id: MembershipId,
        owner_id: OwnerId,
        list_name: impl Into<String>,
        media_id: impl Into<String>,
        media_kind: MediaKind,
    ) -> Self {
        Self {
            membership_id,
            owner_id,
            list_name: list_name.into(),
            media_id: Some(media_id.into()),
            media_kind,
        }
    }

    /// Media id as a string slice, if present
    pub fn media_id(&self) -> Option<&str> {
        self.media_id.as_deref()
    }
}

// Series ids arrive as JSON numbers from some endpoints.
fn deserialize_media_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_string_conversion() {
        assert_eq!(MediaKind::Series.as_str(), "series");
        assert_eq!("Album".parse::<MediaKind>(), Ok(MediaKind::Album));
        assert!("podcast".parse::<MediaKind>().is_err());
    }

    #[test]
    fn record_accepts_numeric_media_id() {
        let record: MembershipRecord = serde_json::from_str(
            r#"{"membership_id": 5, "owner_id": 1, "list_name": "Comfort",
                "media_id": 1399, "media_kind": "series"}"#,
        )
        .unwrap();

        assert_eq!(record.media_id(), Some("1399"));
        assert_eq!(record.media_kind, MediaKind::Series);
    }

    #[test]
    fn record_tolerates_missing_media_id() {
        let record: MembershipRecord = serde_json::from_str(
            r#"{"membership_id": 5, "owner_id": 1, "list_name": "Comfort",
                "media_id": null, "media_kind": "movie"}"#,
        )
        .unwrap();

        assert_eq!(record.media_id(), None);
    }
}
