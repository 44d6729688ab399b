//! Media attachment record.
//!
//! # Invariants
//! - `kind` is one of the closed `MediaType` variants or absent.
//! - Storage keeps the variant name (`IMAGE`), the wire keeps the value (`image`).

use super::post::PostId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type MediaId = i64;

/// Closed set of attachment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Gif,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Image, MediaType::Video, MediaType::Gif];

    /// Wire value of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
        }
    }

    /// Parses a wire value (`image`, `video`, `gif`).
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: MediaId,
    pub url: Option<String>,
    /// Persisted in the `type` column.
    pub kind: Option<MediaType>,
    pub post_id: PostId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub url: Option<String>,
    pub kind: Option<MediaType>,
    pub post_id: PostId,
}

#[cfg(test)]
mod tests {
    use super::MediaType;

    #[test]
    fn parse_accepts_only_wire_values() {
        assert_eq!(MediaType::parse("gif"), Some(MediaType::Gif));
        assert_eq!(MediaType::parse("GIF"), None);
        assert_eq!(MediaType::parse("audio"), None);
    }

    #[test]
    fn as_str_round_trips_every_variant() {
        for kind in MediaType::ALL {
            assert_eq!(MediaType::parse(kind.as_str()), Some(kind));
        }
    }
}
