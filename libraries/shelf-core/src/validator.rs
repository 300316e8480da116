//! Structural checks applied before any network work.
//!
//! Membership validation is a filter, not an error source: a corrupt or
//! stale record is dropped so the rest of the list still loads.

use crate::error::{Result, ShelfError};
use crate::types::{MediaKind, MembershipRecord, LIST_DESCRIPTION_MAX_LEN, LIST_NAME_MAX_LEN};
use tracing::debug;

/// Length of the identifiers the album provider issues
const ALBUM_ID_LEN: usize = 22;

/// Check a membership record for structural soundness.
///
/// - the media id is present, non-empty and not the literal `"null"`
/// - series ids are unsigned decimal integers
/// - movie ids do not look like album ids (22 ASCII alphanumerics)
pub fn is_valid_membership(record: &MembershipRecord) -> bool {
    let Some(media_id) = record.media_id() else {
        return false;
    };

    if media_id.is_empty() || media_id == "null" {
        return false;
    }

    match record.media_kind {
        MediaKind::Series => is_series_id(media_id),
        MediaKind::Movie => !looks_like_album_id(media_id),
        MediaKind::Album => true,
    }
}

// Signs are rejected: `+12` or `-5` would still reach the provider verbatim.
fn is_series_id(media_id: &str) -> bool {
    media_id.bytes().all(|b| b.is_ascii_digit()) && media_id.parse::<i64>().is_ok()
}

fn looks_like_album_id(media_id: &str) -> bool {
    media_id.len() == ALBUM_ID_LEN && media_id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Drop invalid records, keeping the relative order of the rest.
pub fn retain_valid(records: Vec<MembershipRecord>) -> Vec<MembershipRecord> {
    let total = records.len();

    let valid: Vec<MembershipRecord> = records
        .into_iter()
        .filter(|record| {
            let ok = is_valid_membership(record);
            if !ok {
                debug!(
                    membership_id = %record.membership_id,
                    media_kind = %record.media_kind,
                    media_id = ?record.media_id,
                    "Dropping malformed membership record"
                );
            }
            ok
        })
        .collect();

    if valid.len() < total {
        debug!(kept = valid.len(), dropped = total - valid.len(), "Filtered memberships");
    }

    valid
}

/// Validate list name and description before a create or update call.
///
/// The registry never truncates, so oversized input must be rejected here.
/// Returns the trimmed name.
pub fn validate_list_input<'a>(name: &'a str, description: &str) -> Result<&'a str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ShelfError::invalid_input("List name cannot be empty"));
    }

    if name.chars().count() > LIST_NAME_MAX_LEN {
        return Err(ShelfError::invalid_input(format!(
            "List name exceeds {} characters",
            LIST_NAME_MAX_LEN
        )));
    }

    if description.chars().count() > LIST_DESCRIPTION_MAX_LEN {
        return Err(ShelfError::invalid_input(format!(
            "List description exceeds {} characters",
            LIST_DESCRIPTION_MAX_LEN
        )));
    }

    Ok(name)
}
