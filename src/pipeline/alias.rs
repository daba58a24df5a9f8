// Alias/config generation: the per-cursor text file the external
// cursor compiler consumes.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{CursorError, CursorResult};
use crate::model::BitmapSet;

/// Owns one logical cursor's bitmap set plus a scoped config directory
/// that holds the per-size resized copies and the generated `.alias`
/// file. The directory is removed when the value drops, on every exit
/// path.
pub struct CursorAlias {
    bitmap: BitmapSet,
    prefix: TempDir,
    alias_file: Option<PathBuf>,
}

impl CursorAlias {
    pub fn new(bitmap: BitmapSet) -> CursorResult<Self> {
        let prefix = TempDir::with_prefix("cursorgen_alias_")?;
        Ok(Self {
            bitmap,
            prefix,
            alias_file: None,
        })
    }

    /// Opens the frame group and wraps it in a fresh config directory.
    pub fn open(frames: &[PathBuf], hotspot: (u32, u32), key: Option<&str>) -> CursorResult<Self> {
        Self::new(BitmapSet::open(frames, hotspot, key)?)
    }

    pub fn bitmap(&self) -> &BitmapSet {
        &self.bitmap
    }

    /// Directory that config lines' relative frame paths resolve against.
    pub fn prefix(&self) -> &Path {
        self.prefix.path()
    }

    pub fn alias_file(&self) -> Option<&Path> {
        self.alias_file.as_deref()
    }

    /// Generates the config file for the requested sizes. Each size
    /// gets a resized copy under `<s>x<s>/` (the caller's source frames
    /// are never touched) and one record per frame:
    /// `<size> <xhot> <yhot> <s>x<s>/<frame>.png[ <delay>]`. Records
    /// are ordered by size then path; the delay field is present
    /// exactly when the cursor is animated. Repeat calls with the same
    /// inputs produce byte-identical output.
    pub fn create(&mut self, sizes: &[u32], delay: u32) -> CursorResult<PathBuf> {
        if sizes.is_empty() {
            return Err(CursorError::invalid_size("no sizes requested"));
        }
        if let Some(bad) = sizes.iter().find(|&&s| s == 0) {
            return Err(CursorError::invalid_size(format!("size {bad} is not positive")));
        }

        let mut records: Vec<(u32, String)> = Vec::new();

        for &size in sizes {
            let size_dir = self.prefix.path().join(format!("{size}x{size}"));

            let mut copy = self.bitmap.copy(&size_dir)?;
            copy.resize(size)?;
            let (xhot, yhot) = copy.hotspot();

            let mut frame_files: Vec<String> = fs::read_dir(&size_dir)?
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .filter(|n| n.ends_with(".png"))
                .collect();
            if frame_files.is_empty() {
                return Err(CursorError::EmptyDirectory(size_dir));
            }
            frame_files.sort();

            for file in frame_files {
                let mut line = format!("{size} {xhot} {yhot} {size}x{size}/{file}");
                if self.bitmap.animated() {
                    line.push(' ');
                    line.push_str(&delay.to_string());
                }
                records.push((size, line));
            }
        }

        records.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        let content = records
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n");

        let path = self.prefix.path().join(format!("{}.alias", self.bitmap.key()));
        fs::write(&path, content)?;
        debug!(key = self.bitmap.key(), file = %path.display(), "wrote alias config");

        self.alias_file = Some(path.clone());
        Ok(path)
    }
}
