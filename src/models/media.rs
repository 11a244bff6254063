use serde::{Deserialize, Serialize};

/// What a reward locator points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Gif,
    Video,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "picture",
            MediaKind::Gif => "gif",
            MediaKind::Video => "video",
        }
    }
}

/// A reward shown after a correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub locator: String,
    pub kind: MediaKind,
    pub label: String,
}

pub const PLACEHOLDER_LOCATOR: &str = "https://placedog.net/400?id=1";
pub const PLACEHOLDER_LABEL: &str = "Good job!";

impl MediaItem {
    pub fn new(locator: impl Into<String>, kind: MediaKind, label: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            kind,
            label: label.into(),
        }
    }

    /// Stand-in used when a slot could not be fetched.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_LOCATOR, MediaKind::Image, PLACEHOLDER_LABEL)
    }

    pub fn is_placeholder(&self) -> bool {
        self.locator == PLACEHOLDER_LOCATOR && self.label == PLACEHOLDER_LABEL
    }
}
