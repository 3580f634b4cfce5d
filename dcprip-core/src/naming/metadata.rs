//! The structured record recovered from a standardized composition title.

use super::tags::{AspectRatio, AudioLayout, ContentType, PackageVariant, Resolution};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Placeholder for an unset language or territory code.
pub const UNKNOWN_LOCALE: &str = "XX";

/// Everything the naming convention reveals about a composition.
///
/// Built once by [`classify`](super::classify) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionMetadata {
    /// The standardized title exactly as shown on the playout server.
    pub standard_title: String,
    /// Free-form title recovered from the unclassified tokens.
    pub title: String,
    pub content_type: ContentType,
    /// Unconventional content modifiers, joined with ", ".
    pub modifiers: String,
    pub aspect_ratio: AspectRatio,
    /// Content language, [`UNKNOWN_LOCALE`] when absent.
    pub language: String,
    /// Distribution territory, [`UNKNOWN_LOCALE`] when absent.
    pub territory: String,
    pub audio: AudioLayout,
    pub resolution: Resolution,
    /// Content creator.
    pub studio: String,
    pub creation_date: Option<NaiveDate>,
    /// DCP creator.
    pub facility: String,
    /// Packaging standard, upper-cased (e.g. "SMPTE", "IOP").
    pub standard: String,
    pub package_variant: PackageVariant,
}

impl CompositionMetadata {
    /// Content type name followed by the modifiers.
    pub fn material(&self) -> String {
        format!("{} {}", self.content_type, self.modifiers)
            .trim_end()
            .to_string()
    }

    /// Checks if two compositions carry the same content, ignoring language,
    /// territory, studio, facility and creation date.
    pub fn same_content(&self, other: &Self) -> bool {
        self.title == other.title
            && self.content_type == other.content_type
            && self.modifiers == other.modifiers
            && self.aspect_ratio == other.aspect_ratio
            && self.audio == other.audio
            && self.resolution == other.resolution
    }

    /// Whether the language code carries no burnt-in subtitle language.
    pub fn is_unsubtitled(&self) -> bool {
        self.language.ends_with(UNKNOWN_LOCALE)
    }
}

impl fmt::Display for CompositionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.material())
    }
}
