// ============================================================================
// dcprip-core/src/playlist/mod.rs
// ============================================================================
//
// PLAYLIST RESOLVER: Composition playlist to ordered reel descriptors
//
// The composition playlist is streamed once. Picture and sound track elements
// open a context that decides where identifiers and entry points go; each
// closed Reel element appends one descriptor. Identifiers are resolved through
// the asset map of the folder, or by file size when the map cannot help.
//
// KEY COMPONENTS:
// - resolve_playlist: Reads a playlist next to its asset map
// - resolve_playlist_with_assets: Same with a caller-supplied asset map
// - Reel, Composition: The resolved descriptors
//
// AI-ASSISTANT-INFO: Streaming CPL reader built on quick-xml

pub mod reel;

pub use reel::{Composition, DEFAULT_FRAME_RATE, Reel};

// ---- Internal crate imports ----
use crate::assetmap::{AssetMap, resolve_asset_map};
use crate::discovery::find_media_assets;
use crate::error::{CoreError, CoreResult};
use crate::utils::get_filename_safe;

// ---- External crate imports ----
use log::{debug, trace, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::name::QName;

// ---- Standard library imports ----
use std::fmt::Display;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Blocks that carry no picture or sound essence and are skipped whole.
const SKIPPED_BLOCKS: [&[u8]; 5] = [
    b"MainSubtitle",
    b"MainCaption",
    b"MainClosedCaption",
    b"ClosedCaption",
    b"AuxData",
];

/// Track context the reader is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Track {
    None,
    Picture,
    Sound,
}

/// Text-bearing element the reader is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Other,
    Id,
    EntryPoint,
    Duration,
    FrameRate,
    ContentTitle,
}

/// Resolves a composition playlist using the asset map of its folder.
///
/// A broken asset map is not fatal: it is logged and identifiers are then
/// resolved by file size.
pub fn resolve_playlist(path: &Path) -> CoreResult<Composition> {
    let directory = playlist_directory(path);
    let assets = resolve_asset_map(&directory).unwrap_or_else(|e| {
        warn!("Ignoring asset map of {}: {}", directory.display(), e);
        AssetMap::empty(&directory)
    });
    resolve_playlist_with_assets(path, &assets)
}

/// Resolves a composition playlist against an already built asset map.
pub fn resolve_playlist_with_assets(path: &Path, assets: &AssetMap) -> CoreResult<Composition> {
    let directory = playlist_directory(path);
    let file = File::open(path)?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    reader.config_mut().trim_text(true);

    let mut resolver = ReelResolver::new(&directory, assets);
    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(malformed(path))? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if SKIPPED_BLOCKS.contains(&name.as_slice()) {
                    let qualified = e.name().as_ref().to_vec();
                    trace!("Skipping {} block", String::from_utf8_lossy(&name));
                    reader
                        .read_to_end_into(QName(&qualified), &mut skip_buf)
                        .map_err(malformed(path))?;
                    skip_buf.clear();
                } else {
                    resolver.open(&name);
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"KeyId" {
                    resolver.reel.needs_key = true;
                }
            }
            Event::End(e) => resolver.close(e.local_name().as_ref()),
            Event::Text(e) => {
                let text = e.unescape().map_err(malformed(path))?;
                resolver.text(text.trim()).map_err(malformed(path))?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let title = resolver
        .title
        .take()
        .unwrap_or_else(|| get_filename_safe(path).unwrap_or_default());
    let composition = Composition::new(title, resolver.reels);
    debug!(
        "Resolved {} with {} reel(s)",
        composition.title,
        composition.reels.len()
    );
    Ok(composition)
}

/// Reel assembly state of a single playlist read.
struct ReelResolver<'a> {
    directory: &'a Path,
    assets: &'a AssetMap,
    /// Media files of the folder, listed on first use.
    media_files: Option<Vec<PathBuf>>,
    track: Track,
    field: Field,
    reel: Reel,
    reels: Vec<Reel>,
    title: Option<String>,
}

impl<'a> ReelResolver<'a> {
    fn new(directory: &'a Path, assets: &'a AssetMap) -> Self {
        Self {
            directory,
            assets,
            media_files: None,
            track: Track::None,
            field: Field::Other,
            reel: Reel::default(),
            reels: Vec::new(),
            title: None,
        }
    }

    fn open(&mut self, name: &[u8]) {
        self.field = Field::Other;
        match name {
            b"Reel" => self.reel = Reel::default(),
            b"MainPicture" => self.track = Track::Picture,
            b"MainStereoscopicPicture" => {
                self.track = Track::Picture;
                self.reel.stereoscopic = true;
            }
            b"MainSound" => self.track = Track::Sound,
            b"KeyId" => self.reel.needs_key = true,
            b"Id" => self.field = Field::Id,
            b"EntryPoint" => self.field = Field::EntryPoint,
            b"Duration" => self.field = Field::Duration,
            b"FrameRate" => self.field = Field::FrameRate,
            b"ContentTitleText" => self.field = Field::ContentTitle,
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        self.field = Field::Other;
        match name {
            b"Reel" => self.reels.push(std::mem::take(&mut self.reel)),
            b"MainPicture" | b"MainStereoscopicPicture" | b"MainSound" => {
                self.track = Track::None
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) -> Result<(), String> {
        match (self.field, self.track) {
            (Field::ContentTitle, _) => self.title = Some(text.to_string()),
            (_, Track::None) | (Field::Other, _) => {}
            (Field::Id, track) => self.resolve_asset(text, track),
            (Field::EntryPoint, Track::Picture) => {
                self.reel.video_start_frame = parse_frames(text)?
            }
            (Field::EntryPoint, Track::Sound) => {
                self.reel.audio_start_frame = parse_frames(text)?
            }
            (Field::Duration, _) => self.reel.duration = parse_frames(text)?,
            (Field::FrameRate, _) => {
                if let Some(rate) = parse_frame_rate(text)? {
                    self.reel.frame_rate = if self.reel.stereoscopic {
                        rate * 0.5
                    } else {
                        rate
                    };
                }
            }
        }
        Ok(())
    }

    fn resolve_asset(&mut self, id: &str, track: Track) {
        let file = match self.assets.resolve(id) {
            Some(file) => Some(file),
            None => self.infer_by_size(track),
        };
        if let Some(file) = file {
            trace!("{:?} asset {} -> {}", track, id, file.display());
            match track {
                Track::Picture => self.reel.video_file = Some(file),
                Track::Sound => self.reel.audio_file = Some(file),
                Track::None => {}
            }
        }
    }

    /// With exactly two media files in the folder the larger one is the
    /// picture and the smaller one the sound. Equal sizes resolve nothing.
    fn infer_by_size(&mut self, track: Track) -> Option<PathBuf> {
        if self.media_files.is_none() {
            self.media_files = Some(find_media_assets(self.directory).unwrap_or_else(|e| {
                warn!("Cannot list media files in {}: {}", self.directory.display(), e);
                Vec::new()
            }));
        }
        let [first, second] = self.media_files.as_deref()? else {
            return None;
        };

        let first_size = fs::metadata(first).ok()?.len();
        let second_size = fs::metadata(second).ok()?.len();
        if first_size == second_size {
            warn!(
                "Cannot tell picture from sound in {}: both media files are {} bytes",
                self.directory.display(),
                first_size
            );
            return None;
        }

        let (larger, smaller) = if first_size > second_size {
            (first, second)
        } else {
            (second, first)
        };
        match track {
            Track::Picture => Some(larger.clone()),
            Track::Sound => Some(smaller.clone()),
            Track::None => None,
        }
    }
}

fn playlist_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn parse_frames(text: &str) -> Result<u64, String> {
    text.parse()
        .map_err(|e| format!("invalid frame count '{}': {}", text, e))
}

/// Parses a `"numerator denominator"` rate. Empty text yields no rate.
fn parse_frame_rate(text: &str) -> Result<Option<f64>, String> {
    let mut parts = text.split_whitespace();
    let Some(numerator) = parts.next() else {
        return Ok(None);
    };
    let invalid = || format!("invalid frame rate '{}'", text);
    let numerator: f64 = numerator.parse().map_err(|_| invalid())?;
    let denominator: f64 = match parts.next() {
        Some(denominator) => denominator.parse().map_err(|_| invalid())?,
        None => 1.0,
    };
    if denominator == 0.0 {
        return Err(invalid());
    }
    Ok(Some(numerator / denominator))
}

fn malformed<E: Display>(path: &Path) -> impl Fn(E) -> CoreError + '_ {
    move |e| CoreError::MalformedPlaylist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
