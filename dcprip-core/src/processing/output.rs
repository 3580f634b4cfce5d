//! Output folder resolution.

use crate::config::OutputLocation;
use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Folder the outputs of the composition at `playlist` are written to.
///
/// Fails for [`OutputLocation::Parent`] when the composition folder has no
/// parent.
pub fn resolve_output_dir(playlist: &Path, location: &OutputLocation) -> CoreResult<PathBuf> {
    let source = non_empty_parent(playlist).unwrap_or_else(|| Path::new("."));
    match location {
        OutputLocation::NextToSource => Ok(source.to_path_buf()),
        OutputLocation::Parent => non_empty_parent(source)
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "cannot output {} above a root folder",
                    playlist.display()
                ))
            }),
        OutputLocation::Directory(dir) => Ok(dir.clone()),
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}
