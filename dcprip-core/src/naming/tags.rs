//! Tag vocabularies of the composition naming convention.
//!
//! Each enum here is one field of the naming convention. The hyphen-suffix
//! tags (package variant and aspect ratio) are matched through alias tables
//! built once on first use.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::fmt;

/// Category of a composition, encoded as a 3-letter stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentType {
    /// No content type in the title.
    #[default]
    Unknown,
    /// Full movie.
    Feature,
    /// Short movie.
    Short,
    /// Movie trailer. TV trailers are advertisements.
    Trailer,
    /// Test clip.
    Test,
    /// Transitional clip, including digital black for spacing.
    Transitional,
    /// Pre-content rating tag.
    RatingTag,
    /// Short movie trailer.
    Teaser,
    /// Local theatre rules.
    Policy,
    /// Government or charity announcement.
    PublicServiceAnnouncement,
    /// Promotion other than a trailer, teaser or promotion.
    Advertisement,
    /// Non-trailer promotion, usually shown at conventions.
    Promotion,
}

impl ContentType {
    pub const ALL: [ContentType; 12] = [
        ContentType::Unknown,
        ContentType::Feature,
        ContentType::Short,
        ContentType::Trailer,
        ContentType::Test,
        ContentType::Transitional,
        ContentType::RatingTag,
        ContentType::Teaser,
        ContentType::Policy,
        ContentType::PublicServiceAnnouncement,
        ContentType::Advertisement,
        ContentType::Promotion,
    ];

    /// The 3-letter stamp that opens the content type token.
    pub fn stamp(self) -> &'static str {
        match self {
            ContentType::Unknown => "UNK",
            ContentType::Feature => "FTR",
            ContentType::Short => "SHR",
            ContentType::Trailer => "TLR",
            ContentType::Test => "TST",
            ContentType::Transitional => "XSN",
            ContentType::RatingTag => "RTG",
            ContentType::Teaser => "TSR",
            ContentType::Policy => "POL",
            ContentType::PublicServiceAnnouncement => "PSA",
            ContentType::Advertisement => "ADV",
            ContentType::Promotion => "PRO",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContentType::Unknown => "Unknown",
            ContentType::Feature => "Feature",
            ContentType::Short => "Short",
            ContentType::Trailer => "Trailer",
            ContentType::Test => "Test",
            ContentType::Transitional => "Transitional",
            ContentType::RatingTag => "RatingTag",
            ContentType::Teaser => "Teaser",
            ContentType::Policy => "Policy",
            ContentType::PublicServiceAnnouncement => "PublicServiceAnnouncement",
            ContentType::Advertisement => "Advertisement",
            ContentType::Promotion => "Promotion",
        }
    }

    /// Exact, case-sensitive stamp lookup.
    pub fn from_stamp(stamp: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.stamp() == stamp)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picture aspect ratio ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    Unknown,
    /// 1.19
    Ratio119,
    /// 4:3 = 1.33
    Ratio133,
    /// 1.375
    Academy,
    /// 1.66
    Ratio166,
    /// 16:9 = 1.78
    Ratio178,
    /// 1.85, written as 185
    Flat185,
    /// 2.35, written as 235
    Scope235,
    /// 2.39, written as 239
    Scope239,
    /// 1.85, written as F
    Flat,
    /// 2.35 or 2.39, written as S
    Scope,
    /// 1.9, written as C
    FullContainer,
}

impl AspectRatio {
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Unknown => "N/A",
            AspectRatio::Ratio119 => "1.19:1",
            AspectRatio::Ratio133 => "1.33:1",
            AspectRatio::Academy => "1.37:1 (Academy)",
            AspectRatio::Ratio166 => "1.66:1",
            AspectRatio::Ratio178 => "1.78:1",
            AspectRatio::Flat185 => "1.85:1 (Flat)",
            AspectRatio::Scope235 => "2.35 (Scope)",
            AspectRatio::Scope239 => "2.39 (Scope)",
            AspectRatio::Flat => "Flat",
            AspectRatio::Scope => "Scope",
            AspectRatio::FullContainer => "Full container",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Frame width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    Unknown,
    /// 2048 pixels wide.
    TwoK,
    /// 4096 pixels wide.
    FourK,
}

impl Resolution {
    /// Exact, case-sensitive tag lookup.
    pub fn from_tag(token: &str) -> Option<Self> {
        match token {
            "2K" => Some(Resolution::TwoK),
            "4K" => Some(Resolution::FourK),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resolution::Unknown => "N/A",
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        })
    }
}

/// Master audio track format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioLayout {
    #[default]
    Unknown,
    Stereo,
    Surround51,
    Surround71,
    /// Sony Dynamic Digital Sound, 7.1 with front/side layout.
    Sdds,
    /// Dolby Atmos companion track next to a 5.1 or 7.1 bed.
    Atmos,
    /// Barco Auro embedded in a 5.1 or 7.1 track.
    Auro,
    /// Barco AuroMax companion track next to an Auro 11.1 or 13.1 track.
    AuroMax,
    DtsX,
    /// Raw Cavern 9.1.
    Cavern,
    /// Raw Cavern 10.1 with bottom surround.
    CavernXl,
    Imax5,
    Imax6,
    Imax12,
}

impl AudioLayout {
    pub fn label(self) -> &'static str {
        match self {
            AudioLayout::Unknown => "N/A",
            AudioLayout::Stereo => "Stereo",
            AudioLayout::Surround51 => "5.1 Surround",
            AudioLayout::Surround71 => "7.1 Surround",
            AudioLayout::Sdds => "SDDS",
            AudioLayout::Atmos => "Dolby Atmos",
            AudioLayout::Auro => "Barco Auro",
            AudioLayout::AuroMax => "Barco AuroMax",
            AudioLayout::DtsX => "DTS:X",
            AudioLayout::Cavern => "Cavern",
            AudioLayout::CavernXl => "Cavern XL",
            AudioLayout::Imax5 => "IMAX 5-track",
            AudioLayout::Imax6 => "IMAX 6-track",
            AudioLayout::Imax12 => "IMAX 12-track",
        }
    }

    /// Layouts whose height channels sit in the Auro positions of the PCM stream.
    pub fn is_auro_family(self) -> bool {
        matches!(self, AudioLayout::Auro | AudioLayout::AuroMax)
    }

    /// Immersive layouts set by a marker inside a token. A plain channel
    /// count seen later never replaces them.
    pub fn is_immersive(self) -> bool {
        matches!(
            self,
            AudioLayout::Atmos | AudioLayout::Auro | AudioLayout::AuroMax | AudioLayout::DtsX
        )
    }

    /// Recognizes an audio token. Prefix tags set a base layout, then immersive
    /// markers anywhere in the token override it, so `71-Atmos` yields Atmos.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        let mut layout = if token.starts_with("20") {
            AudioLayout::Stereo
        } else if token.starts_with("51") {
            AudioLayout::Surround51
        } else if token.starts_with("71") {
            AudioLayout::Surround71
        } else if token.starts_with("sdds") {
            AudioLayout::Sdds
        } else if token.starts_with("cavern") {
            if token.contains("xl") {
                AudioLayout::CavernXl
            } else {
                AudioLayout::Cavern
            }
        } else if token.starts_with("imax5") {
            AudioLayout::Imax5
        } else if token.starts_with("imax6") {
            AudioLayout::Imax6
        } else if token.starts_with("imax12") {
            AudioLayout::Imax12
        } else {
            AudioLayout::Unknown
        };

        if token.contains("atmos") {
            layout = AudioLayout::Atmos;
        }
        if token.contains("auro") {
            layout = AudioLayout::Auro;
        }
        if token.contains("auromax") {
            layout = AudioLayout::AuroMax;
        }
        if token.contains("dtsx") {
            layout = AudioLayout::DtsX;
        }

        (layout != AudioLayout::Unknown).then_some(layout)
    }
}

impl fmt::Display for AudioLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base package or supplemental package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PackageVariant {
    #[default]
    OriginalVersion,
    VersionFile,
}

impl fmt::Display for PackageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PackageVariant::OriginalVersion => "Original version",
            PackageVariant::VersionFile => "Version file",
        })
    }
}

// Keys are lowercase; lookups lowercase the token suffix.
static PACKAGE_VARIANT_ALIASES: Lazy<HashMap<&'static str, PackageVariant>> = Lazy::new(|| {
    HashMap::from([
        ("ov", PackageVariant::OriginalVersion),
        ("vf", PackageVariant::VersionFile),
    ])
});

static ASPECT_RATIO_ALIASES: Lazy<HashMap<&'static str, AspectRatio>> = Lazy::new(|| {
    HashMap::from([
        ("unknown", AspectRatio::Unknown),
        ("119", AspectRatio::Ratio119),
        ("133", AspectRatio::Ratio133),
        ("137", AspectRatio::Academy),
        ("166", AspectRatio::Ratio166),
        ("178", AspectRatio::Ratio178),
        ("185", AspectRatio::Flat185),
        ("235", AspectRatio::Scope235),
        ("239", AspectRatio::Scope239),
        ("f", AspectRatio::Flat),
        ("s", AspectRatio::Scope),
        ("c", AspectRatio::FullContainer),
    ])
});

/// The part of a token a hyphen-suffix tag is matched on: everything after the
/// first hyphen, or the whole token when there is none.
fn tag_suffix(token: &str) -> String {
    match token.split_once('-') {
        Some((_, suffix)) => suffix.to_lowercase(),
        None => token.to_lowercase(),
    }
}

impl PackageVariant {
    pub fn from_token(token: &str) -> Option<Self> {
        PACKAGE_VARIANT_ALIASES.get(tag_suffix(token).as_str()).copied()
    }
}

impl AspectRatio {
    pub fn from_token(token: &str) -> Option<Self> {
        ASPECT_RATIO_ALIASES.get(tag_suffix(token).as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_prefixes() {
        assert_eq!(AudioLayout::from_token("20"), Some(AudioLayout::Stereo));
        assert_eq!(AudioLayout::from_token("51"), Some(AudioLayout::Surround51));
        assert_eq!(AudioLayout::from_token("71-HI"), Some(AudioLayout::Surround71));
        assert_eq!(AudioLayout::from_token("SDDS"), Some(AudioLayout::Sdds));
        assert_eq!(AudioLayout::from_token("Cavern"), Some(AudioLayout::Cavern));
        assert_eq!(AudioLayout::from_token("CavernXL"), Some(AudioLayout::CavernXl));
        assert_eq!(AudioLayout::from_token("IMAX12"), Some(AudioLayout::Imax12));
        assert_eq!(AudioLayout::from_token("XX"), None);
    }

    #[test]
    fn test_audio_overrides() {
        assert_eq!(AudioLayout::from_token("71-Atmos"), Some(AudioLayout::Atmos));
        assert_eq!(AudioLayout::from_token("51-Auro"), Some(AudioLayout::Auro));
        assert_eq!(AudioLayout::from_token("AuroMax"), Some(AudioLayout::AuroMax));
        assert_eq!(AudioLayout::from_token("71-DTSX"), Some(AudioLayout::DtsX));
    }

    #[test]
    fn test_hyphen_suffix_tags() {
        assert_eq!(AspectRatio::from_token("F"), Some(AspectRatio::Flat));
        assert_eq!(AspectRatio::from_token("s"), Some(AspectRatio::Scope));
        assert_eq!(AspectRatio::from_token("F-239"), Some(AspectRatio::Scope239));
        assert_eq!(AspectRatio::from_token("137"), Some(AspectRatio::Academy));
        assert_eq!(AspectRatio::from_token("EN-XX"), None);
        assert_eq!(PackageVariant::from_token("OV"), Some(PackageVariant::OriginalVersion));
        assert_eq!(PackageVariant::from_token("DE-VF"), Some(PackageVariant::VersionFile));
        assert_eq!(PackageVariant::from_token("OVX"), None);
    }

    #[test]
    fn test_content_stamps() {
        assert_eq!(ContentType::from_stamp("FTR"), Some(ContentType::Feature));
        assert_eq!(ContentType::from_stamp("PSA"), Some(ContentType::PublicServiceAnnouncement));
        assert_eq!(ContentType::from_stamp("ftr"), None);
        for content_type in ContentType::ALL {
            assert_eq!(ContentType::from_stamp(content_type.stamp()), Some(content_type));
        }
    }
}
