//! Composition discovery.
//!
//! Walks a folder tree for composition playlists and lists the essence files
//! of a single composition folder. A playlist is any `.xml` file whose root
//! element is `CompositionPlaylist`; folders that can't be read are skipped.

use crate::error::{CoreError, CoreResult};
use crate::utils::{get_filename_safe, has_extension, is_essence_file};

use log::debug;
use quick_xml::Reader;
use quick_xml::events::Event;
use walkdir::WalkDir;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Root element name of a composition playlist.
pub const PLAYLIST_ROOT: &[u8] = b"CompositionPlaylist";

/// Finds every composition playlist under `root`, recursively.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Sorted playlist paths
/// * `Err(CoreError::PathError)` - If `root` is not a directory
/// * `Err(CoreError::NoCompositionsFound)` - If no playlist was found
///
/// # Examples
///
/// ```rust,no_run
/// use dcprip_core::find_compositions;
/// use std::path::Path;
///
/// match find_compositions(Path::new("/mnt/ingest")) {
///     Ok(playlists) => {
///         for playlist in playlists {
///             println!("{}", playlist.display());
///         }
///     }
///     Err(e) => println!("Error finding compositions: {}", e),
/// }
/// ```
pub fn find_compositions(root: &Path) -> CoreResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CoreError::PathError(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut playlists: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_composition_playlist(path))
        .collect();

    if playlists.is_empty() {
        return Err(CoreError::NoCompositionsFound);
    }
    playlists.sort();
    debug!("Found {} composition playlist(s) under {}", playlists.len(), root.display());
    Ok(playlists)
}

/// Checks if a file is a composition playlist: an `.xml` file whose first
/// element, after the declaration and any comments, is `CompositionPlaylist`.
/// Unreadable or malformed files are not playlists.
pub fn is_composition_playlist(path: &Path) -> bool {
    if !has_extension(path, "xml") {
        return false;
    }
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut reader = Reader::from_reader(BufReader::new(file));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return e.local_name().as_ref() == PLAYLIST_ROOT;
            }
            Ok(Event::Eof) | Err(_) => return false,
            Ok(_) => buf.clear(),
        }
    }
}

/// The standardized title of a playlist: its `ContentTitleText`, or the file
/// name when the playlist has none or can't be read.
pub fn content_title(path: &Path) -> String {
    read_content_title(path)
        .or_else(|| get_filename_safe(path).ok())
        .unwrap_or_default()
}

fn read_content_title(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_title = false;
    loop {
        match reader.read_event_into(&mut buf).ok()? {
            Event::Start(e) => in_title = e.local_name().as_ref() == b"ContentTitleText",
            Event::Text(e) if in_title => return Some(e.unescape().ok()?.trim().to_string()),
            Event::End(_) => in_title = false,
            Event::Eof => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Lists the essence files directly inside a composition folder, sorted.
pub fn find_media_assets(directory: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut assets: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| is_essence_file(path))
        .collect();
    assets.sort();
    Ok(assets)
}
