// ============================================================================
// dcprip-core/src/naming/classifier.rs
// ============================================================================
//
// TITLE CLASSIFIER: Token-by-token recovery of composition metadata
//
// The standardized title is split on underscores and every token runs through
// a fixed chain of recognizers. The first recognizer that accepts a token
// consumes it. Tokens nobody accepts become the facility, the studio or part
// of the free title depending on what was seen before them.
//
// KEY COMPONENTS:
// - classify: Entry point, folds the tokens through `TitleState::step`
// - TitleState: The carried state (partial fields plus ordering flags)
// - LanguageSlot: Language-then-territory tracking
//
// AI-ASSISTANT-INFO: Naming convention classifier for DCP composition titles

// ---- Internal crate imports ----
use super::metadata::{CompositionMetadata, UNKNOWN_LOCALE};
use super::tags::{AspectRatio, AudioLayout, ContentType, PackageVariant, Resolution};
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use chrono::NaiveDate;
use log::trace;

/// Token delimiter of the naming convention.
pub const TOKEN_DELIMITER: char = '_';

/// Where the language/territory pair stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LanguageSlot {
    /// No language token seen yet.
    #[default]
    Empty,
    /// A language token was just seen; the next token reaching the language
    /// step is the territory.
    AwaitingTerritory,
    /// Both filled. A further language-shaped token replaces the territory.
    Filled,
}

/// Partially classified title, threaded through the token fold.
#[derive(Debug, Clone, Default)]
struct TitleState {
    title: String,
    content_type: ContentType,
    modifiers: String,
    aspect_ratio: AspectRatio,
    language: String,
    territory: String,
    audio: AudioLayout,
    resolution: Resolution,
    studio: String,
    creation_date: Option<NaiveDate>,
    facility: String,
    standard: String,
    package_variant: PackageVariant,
    language_slot: LanguageSlot,
}

impl TitleState {
    /// Classifies one token. Only an unrecoverable creation date fails.
    fn step(mut self, token: &str) -> CoreResult<Self> {
        if is_date_token(token) {
            self.creation_date = Some(parse_creation_date(token)?);
        } else if let Some(resolution) = Resolution::from_tag(token) {
            self.resolution = resolution;
        } else if is_standard_tag(token) {
            self.standard = token.to_uppercase();
        } else if let Some(variant) = PackageVariant::from_token(token) {
            self.package_variant = variant;
        } else if let Some(audio) = AudioLayout::from_token(token) {
            if audio.is_immersive() || !self.audio.is_immersive() {
                self.audio = audio;
            }
        } else if let Some((content_type, modifiers)) = parse_content_type(token) {
            self.content_type = content_type;
            self.modifiers = modifiers;
        } else if let Some(aspect_ratio) = AspectRatio::from_token(token) {
            self.aspect_ratio = aspect_ratio;
        } else if !self.take_locale(token) {
            self.take_unclassified(token);
        }
        Ok(self)
    }

    /// Language/territory step. Returns false when the token is not a locale.
    fn take_locale(&mut self, token: &str) -> bool {
        match self.language_slot {
            LanguageSlot::AwaitingTerritory => {
                self.territory = token.to_string();
                self.language_slot = LanguageSlot::Filled;
                true
            }
            LanguageSlot::Empty if is_language_shaped(token) => {
                self.language = token.to_string();
                self.language_slot = LanguageSlot::AwaitingTerritory;
                true
            }
            LanguageSlot::Filled if is_language_shaped(token) => {
                self.territory = token.to_string();
                true
            }
            _ => false,
        }
    }

    fn take_unclassified(&mut self, token: &str) {
        if self.creation_date.is_some() && self.facility.is_empty() {
            self.facility = token.to_string();
        } else if self.content_type != ContentType::Unknown {
            append_token(&mut self.studio, token);
        } else {
            append_token(&mut self.title, token);
        }
    }

    fn finish(self, standard_title: &str) -> CompositionMetadata {
        let title = if self.title.is_empty() {
            standard_title
                .split(TOKEN_DELIMITER)
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            self.title
        };

        CompositionMetadata {
            standard_title: standard_title.to_string(),
            title,
            content_type: self.content_type,
            modifiers: self.modifiers,
            aspect_ratio: self.aspect_ratio,
            language: or_unknown_locale(self.language),
            territory: or_unknown_locale(self.territory),
            audio: self.audio,
            resolution: self.resolution,
            studio: self.studio,
            creation_date: self.creation_date,
            facility: self.facility,
            standard: self.standard,
            package_variant: self.package_variant,
        }
    }
}

/// Recovers the metadata encoded in a standardized composition title.
///
/// Malformed tokens never fail the classification; they end up in the free
/// title, the studio or the facility. The only error is a creation date that
/// stays invalid after decrementing its day once.
///
/// # Examples
///
/// ```rust
/// use dcprip_core::naming::{classify, AudioLayout, ContentType};
///
/// let metadata = classify("MyMovie_FTR-1_F_71-Atmos_2K_20230229_XX_STUDIO").unwrap();
/// assert_eq!(metadata.content_type, ContentType::Feature);
/// assert_eq!(metadata.audio, AudioLayout::Atmos);
/// assert_eq!(metadata.language, "XX");
/// ```
pub fn classify(standard_title: &str) -> CoreResult<CompositionMetadata> {
    let state = standard_title
        .split(TOKEN_DELIMITER)
        .try_fold(TitleState::default(), |state, token| {
            trace!("Classifying title token '{}'", token);
            state.step(token)
        })?;
    Ok(state.finish(standard_title))
}

fn append_token(field: &mut String, token: &str) {
    if !field.is_empty() {
        field.push(TOKEN_DELIMITER);
    }
    field.push_str(token);
}

fn or_unknown_locale(code: String) -> String {
    if code.is_empty() {
        UNKNOWN_LOCALE.to_string()
    } else {
        code
    }
}

fn is_date_token(token: &str) -> bool {
    token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a `YYYYMMDD` token. A day past the end of its month is retried once
/// with the day decremented, which fixes titles like `20230931`.
fn parse_creation_date(token: &str) -> CoreResult<NaiveDate> {
    let value: u32 = token
        .parse()
        .map_err(|_| CoreError::InvalidDate(token.to_string()))?;
    let year = (value / 10_000) as i32;
    let month = value % 10_000 / 100;
    let day = value % 100;

    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| {
            day.checked_sub(1)
                .and_then(|previous| NaiveDate::from_ymd_opt(year, month, previous))
        })
        .ok_or_else(|| CoreError::InvalidDate(token.to_string()))
}

fn is_standard_tag(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.starts_with("iop") || lower.starts_with("smpte")
}

/// Matches the 3-letter stamp at the start of the token. The rest of the token,
/// split on hyphens, becomes the modifier list.
fn parse_content_type(token: &str) -> Option<(ContentType, String)> {
    let content_type = ContentType::from_stamp(token.get(..3)?)?;
    let mut modifiers = String::new();
    for modifier in token[3..].split('-') {
        if !modifiers.is_empty() {
            modifiers.push_str(", ");
        }
        modifiers.push_str(modifier);
    }
    Some((content_type, modifiers))
}

/// A locale token has its first hyphen within the first four characters and at
/// most four characters between that hyphen and the next one (or the end).
fn is_language_shaped(token: &str) -> bool {
    let Some(first) = token.find('-') else {
        return false;
    };
    let next = token[first + 1..]
        .find('-')
        .map_or(token.len(), |offset| first + 1 + offset);
    first <= 3 && next - first <= 4
}
