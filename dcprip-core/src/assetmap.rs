// ============================================================================
// dcprip-core/src/assetmap.rs
// ============================================================================
//
// ASSET MAP: Identifier to file resolution for a composition folder
//
// A composition folder may carry an asset map listing every essence file under
// an opaque identifier. The map is optional; a missing map yields an empty
// mapping and callers fall back to other ways of locating the essence.
//
// KEY COMPONENTS:
// - AssetMap: Identifier to relative path mapping
// - resolve_asset_map: Locates and streams the map file of a folder
//
// AI-ASSISTANT-INFO: Streaming asset map reader built on quick-xml

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use log::{debug, trace};
use quick_xml::Reader;
use quick_xml::events::Event;

// ---- Standard library imports ----
use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Asset map file names, in lookup order.
pub const ASSET_MAP_NAMES: [&str; 2] = ["ASSETMAP", "ASSETMAP.xml"];

/// Identifier to file mapping of a single composition folder.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    directory: PathBuf,
    entries: HashMap<String, PathBuf>,
}

impl AssetMap {
    /// Creates an empty map rooted at `directory`.
    pub fn empty(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            entries: HashMap::new(),
        }
    }

    /// The path recorded for `id`, relative to the composition folder.
    pub fn get(&self, id: &str) -> Option<&Path> {
        self.entries.get(id).map(PathBuf::as_path)
    }

    /// The full path of the asset recorded for `id`.
    pub fn resolve(&self, id: &str) -> Option<PathBuf> {
        self.get(id).map(|relative| self.directory.join(relative))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records an asset unless the identifier is already known.
    fn insert_first(&mut self, id: String, path: &str) {
        self.entries
            .entry(id)
            .or_insert_with(|| PathBuf::from(path));
    }
}

/// Finds the asset map file of a folder, if any.
pub fn find_asset_map_file(directory: &Path) -> Option<PathBuf> {
    ASSET_MAP_NAMES
        .iter()
        .map(|name| directory.join(name))
        .find(|candidate| candidate.is_file())
}

/// Builds the asset map of a composition folder.
///
/// `ASSETMAP` is tried first, then `ASSETMAP.xml`. When neither exists the
/// result is an empty map. Each `Path` element is paired with the most recent
/// `Id` element before it; when an identifier appears twice the first path is
/// kept.
pub fn resolve_asset_map(directory: &Path) -> CoreResult<AssetMap> {
    let mut map = AssetMap::empty(directory);
    let Some(path) = find_asset_map_file(directory) else {
        debug!("No asset map in {}", directory.display());
        return Ok(map);
    };

    let file = File::open(&path)?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = MapElement::Other;
    let mut pending_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf).map_err(malformed(&path))? {
            Event::Start(e) => {
                current = match e.local_name().as_ref() {
                    b"Id" => MapElement::Id,
                    b"Path" => MapElement::Path,
                    _ => MapElement::Other,
                };
            }
            Event::End(_) => current = MapElement::Other,
            Event::Text(e) => {
                let text = e.unescape().map_err(malformed(&path))?;
                let text = text.trim();
                match current {
                    MapElement::Id => pending_id = Some(text.to_string()),
                    MapElement::Path => match pending_id.take() {
                        Some(id) => {
                            trace!("Asset {} -> {}", id, text);
                            map.insert_first(id, text);
                        }
                        None => debug!("Asset map path '{}' has no identifier", text),
                    },
                    MapElement::Other => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!("Asset map {} lists {} assets", path.display(), map.len());
    Ok(map)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapElement {
    Id,
    Path,
    Other,
}

fn malformed<E: Display>(path: &Path) -> impl Fn(E) -> CoreError + '_ {
    move |e| CoreError::MalformedAssetMap {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
