// Source-directory discovery: groups *.png files into logical cursors.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CursorError, CursorResult};

/// One logical cursor found in the bitmaps directory, before any
/// validation of the frame images themselves. A single frame is a
/// static cursor, several frames an animated group.
#[derive(Clone, Debug)]
pub struct DiscoveredCursor {
    pub key: String,
    pub frames: Vec<PathBuf>,
}

/// Scans a flat bitmaps directory. Files with a `<key>-<digits>.png`
/// name are collected into one animated group per key; every other
/// `*.png` is a static cursor of its own. A numbered group with only
/// one frame cannot animate and falls back to a static cursor under
/// its full stem. Cursors come back sorted by key, frames sorted by
/// filename.
pub fn scan_bitmaps_dir(dir: &Path) -> CursorResult<Vec<DiscoveredCursor>> {
    if !dir.is_dir() {
        return Err(CursorError::NotFound(dir.to_path_buf()));
    }

    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut statics: BTreeMap<String, PathBuf> = BTreeMap::new();

    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry.map_err(|e| {
            CursorError::Io(e.into_io_error().unwrap_or_else(|| std::io::Error::other("walkdir")))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match animated_key(&stem) {
            Some(key) => groups
                .entry(key.to_string())
                .or_default()
                .push(path.to_path_buf()),
            None => {
                statics.insert(stem, path.to_path_buf());
            }
        }
    }

    if groups.is_empty() && statics.is_empty() {
        return Err(CursorError::EmptyDirectory(dir.to_path_buf()));
    }

    let mut animated: Vec<(String, Vec<PathBuf>)> = Vec::new();
    for (key, mut frames) in groups {
        frames.sort();
        if frames.len() > 1 {
            animated.push((key, frames));
            continue;
        }
        for path in frames {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            statics.insert(stem, path);
        }
    }

    let mut cursors: Vec<DiscoveredCursor> = Vec::new();
    for (key, path) in statics {
        cursors.push(DiscoveredCursor {
            key,
            frames: vec![path],
        });
    }
    for (key, frames) in animated {
        cursors.push(DiscoveredCursor { key, frames });
    }
    cursors.sort_by(|a, b| a.key.cmp(&b.key));

    Ok(cursors)
}

/// `wait-001` -> `wait`; stems without a trailing `-<digits>` are static.
fn animated_key(stem: &str) -> Option<&str> {
    let (key, seq) = stem.rsplit_once('-')?;
    if key.is_empty() || seq.is_empty() || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::tempdir;

    fn touch_png(dir: &Path, name: &str) {
        RgbaImage::new(8, 8).save(dir.join(name)).unwrap();
    }

    #[test]
    fn groups_static_and_animated_cursors() {
        let dir = tempdir().unwrap();
        touch_png(dir.path(), "left_ptr.png");
        touch_png(dir.path(), "wait-001.png");
        touch_png(dir.path(), "wait-000.png");
        touch_png(dir.path(), "notes.txt.png"); // still a png, still static

        let cursors = scan_bitmaps_dir(dir.path()).unwrap();
        let keys: Vec<&str> = cursors.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["left_ptr", "notes.txt", "wait"]);

        let wait = cursors.iter().find(|c| c.key == "wait").unwrap();
        assert_eq!(
            wait.frames,
            vec![
                dir.path().join("wait-000.png"),
                dir.path().join("wait-001.png")
            ]
        );
    }

    #[test]
    fn dashed_name_without_digit_suffix_is_static() {
        let dir = tempdir().unwrap();
        touch_png(dir.path(), "all-scroll.png");

        let cursors = scan_bitmaps_dir(dir.path()).unwrap();
        assert_eq!(cursors.len(), 1);
        assert_eq!(cursors[0].key, "all-scroll");
        assert_eq!(cursors[0].frames.len(), 1);
    }

    #[test]
    fn lone_numbered_frame_falls_back_to_a_static_cursor() {
        let dir = tempdir().unwrap();
        touch_png(dir.path(), "wait-001.png");

        let cursors = scan_bitmaps_dir(dir.path()).unwrap();
        assert_eq!(cursors.len(), 1);
        assert_eq!(cursors[0].key, "wait-001");
        assert_eq!(cursors[0].frames, vec![dir.path().join("wait-001.png")]);
    }

    #[test]
    fn non_png_files_are_ignored() {
        let dir = tempdir().unwrap();
        touch_png(dir.path(), "left_ptr.png");
        std::fs::write(dir.path().join("README.md"), b"hi").unwrap();

        let cursors = scan_bitmaps_dir(dir.path()).unwrap();
        assert_eq!(cursors.len(), 1);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = scan_bitmaps_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CursorError::EmptyDirectory(_)));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = scan_bitmaps_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CursorError::NotFound(_)));
    }
}
