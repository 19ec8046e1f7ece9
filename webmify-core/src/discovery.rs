//! File discovery module for finding video files to process.
//!
//! Walks the input directory tree with an explicit stack of pending
//! directories, collecting regular files whose extension is a supported
//! video container. Files using the `._` sidecar prefix are ignored.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extensions accepted as video input, compared case-insensitively.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "avi", "m4v", "webm"];

/// Prefix of the metadata sidecar files some filesystems leave next to media.
const SIDECAR_PREFIX: &str = "._";

/// Suffix appended to the source stem for output files.
pub const OUTPUT_SUFFIX: &str = "_720p";

/// Container extension of every output file.
pub const OUTPUT_EXTENSION: &str = "webm";

/// Returns true when `path` names a supported video file that is not a sidecar.
pub fn is_video_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    if name.to_string_lossy().starts_with(SIDECAR_PREFIX) {
        return false;
    }
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Computes `{dir}/{stem}_720p.webm` for a source file.
pub fn output_path_for(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}");
    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Finds every supported video file below `input_dir`, recursively.
///
/// Entries of each directory are visited in name order so repeated runs see
/// the same sequence. Subdirectories that cannot be read are logged and
/// skipped; only a failure to read `input_dir` itself is an error. Symbolic
/// links are not followed.
///
/// An empty result is not an error.
///
/// # Examples
///
/// ```rust,no_run
/// use webmify_core::find_processable_files;
/// use std::path::Path;
///
/// let files = find_processable_files(Path::new("/path/to/videos")).unwrap();
/// println!("Found {} video files", files.len());
/// ```
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(CoreError::NotADirectory(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![input_dir.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read_dir = match std::fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) if dir == input_dir => {
                return Err(CoreError::PathError(format!(
                    "Cannot read directory {}: {}",
                    dir.display(),
                    e
                )));
            }
            Err(e) => {
                log::warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
        };

        let mut entries: Vec<_> = read_dir
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Failed to read entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if file_type.is_dir() {
                subdirs.push(path);
            } else if file_type.is_file() && is_video_file(&path) {
                files.push(path);
            }
        }

        // Reversed so the stack pops subdirectories in name order.
        pending.extend(subdirs.into_iter().rev());
    }

    log::debug!("Discovered {} video files under {}", files.len(), input_dir.display());
    Ok(files)
}
