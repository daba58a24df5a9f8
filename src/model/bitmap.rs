// On-disk frame group for one logical cursor.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::error::{CursorError, CursorResult};

/// Placement of the resized content on the larger canvas in `reproduce`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Anchor {
    /// Top-left paste offset for content leaving `span` spare pixels on
    /// each axis. Center rounds down on odd spans.
    fn offset(self, span: u32) -> (u32, u32) {
        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopRight => (span, 0),
            Anchor::BottomLeft => (0, span),
            Anchor::BottomRight => (span, span),
            Anchor::Center => (span / 2, span / 2),
        }
    }
}

/// One logical cursor's source frames: a single PNG for static cursors,
/// an ordered group `<key>-<seq>.png` for animated ones. Frames are
/// square, equally sized, and share one hotspot.
#[derive(Clone, Debug)]
pub struct BitmapSet {
    key: String,
    frames: Vec<PathBuf>,
    animated: bool,
    size: u32,
    hotspot: (u32, u32),
}

impl BitmapSet {
    /// Opens a frame group. A single path yields a static set; several
    /// paths yield an animated set ordered by filename.
    pub fn open(paths: &[PathBuf], hotspot: (u32, u32), key: Option<&str>) -> CursorResult<Self> {
        if paths.is_empty() {
            return Err(CursorError::shape("bitmap group is empty"));
        }

        let animated = paths.len() > 1;
        let mut frames: Vec<PathBuf> = paths.to_vec();
        frames.sort();

        let mut set_key: Option<String> = key.map(|k| k.to_string());
        let mut size: Option<u32> = None;

        for frame in &frames {
            check_bitmap(frame)?;

            let frame_key = derive_key(frame, animated)?;
            if let Some(k) = &set_key {
                if *k != frame_key {
                    return Err(CursorError::KeyMismatch {
                        frame: frame.file_name().unwrap_or_default().to_string_lossy().into_owned(),
                        key: k.clone(),
                    });
                }
            } else {
                set_key = Some(frame_key);
            }

            let (w, h) = image::image_dimensions(frame)?;
            if w != h {
                return Err(CursorError::shape(format!(
                    "frame '{}' must have equal width and height, got {}x{}",
                    frame.display(),
                    w,
                    h
                )));
            }
            if let Some(s) = size {
                if s != w {
                    return Err(CursorError::shape(format!(
                        "frame '{}' is {}x{} but the group is {}x{}",
                        frame.display(),
                        w,
                        h,
                        s,
                        s
                    )));
                }
            } else {
                size = Some(w);
            }
        }

        // both are set after at least one frame passed the checks
        let key = set_key.unwrap_or_default();
        let size = size.unwrap_or_default();

        Ok(Self {
            key,
            frames,
            animated,
            size,
            hotspot,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Current square frame size in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn hotspot(&self) -> (u32, u32) {
        self.hotspot
    }

    /// Stretch-resizes every frame in place to `size` x `size` and
    /// rescales the hotspot against the pre-resize dimensions. Aspect
    /// ratio is not preserved. No-op if already at `size`.
    pub fn resize(&mut self, size: u32) -> CursorResult<()> {
        if size == 0 {
            return Err(CursorError::invalid_size("size must be positive"));
        }
        if size == self.size {
            return Ok(());
        }

        for frame in &self.frames {
            let img = image::open(frame)?.to_rgba8();
            let resized = imageops::resize(&img, size, size, FilterType::Nearest);
            resized.save(frame)?;
        }

        let old = self.size;
        self.hotspot = (
            scale_hotspot(self.hotspot.0, old, size),
            scale_hotspot(self.hotspot.1, old, size),
        );
        self.size = size;
        debug!(key = %self.key, from = old, to = size, xhot = self.hotspot.0, yhot = self.hotspot.1, "resized");
        Ok(())
    }

    /// Resizes frame content to `content` x `content` with smooth
    /// interpolation, then pastes it onto a transparent `canvas` x
    /// `canvas` image at `anchor`. The hotspot is rescaled against the
    /// canvas size and clamped to stay inside it.
    pub fn reproduce(&mut self, content: u32, canvas: u32, anchor: Anchor) -> CursorResult<()> {
        if content == 0 || canvas == 0 {
            return Err(CursorError::invalid_size("sizes must be positive"));
        }
        if content > canvas {
            return Err(CursorError::invalid_size(format!(
                "content size {content} exceeds canvas size {canvas}"
            )));
        }

        let (ox, oy) = anchor.offset(canvas - content);
        for frame in &self.frames {
            let img = image::open(frame)?.to_rgba8();
            let scaled = imageops::resize(&img, content, content, FilterType::CatmullRom);
            let mut out = RgbaImage::new(canvas, canvas);
            imageops::overlay(&mut out, &scaled, i64::from(ox), i64::from(oy));
            out.save(frame)?;
        }

        let old = self.size;
        self.hotspot = (
            scale_hotspot(self.hotspot.0, old, canvas).min(canvas - 1),
            scale_hotspot(self.hotspot.1, old, canvas).min(canvas - 1),
        );
        self.size = canvas;
        Ok(())
    }

    /// Deep-copies all frame files into `dir` and returns an
    /// independent set over the copies.
    pub fn copy(&self, dir: &Path) -> CursorResult<Self> {
        if dir.is_file() {
            return Err(CursorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("'{}' is not a directory", dir.display()),
            )));
        }
        fs::create_dir_all(dir)?;

        let mut frames = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let file_name = frame
                .file_name()
                .ok_or_else(|| CursorError::NotFound(frame.clone()))?;
            let dst = dir.join(file_name);
            fs::copy(frame, &dst)?;
            frames.push(dst);
        }

        Ok(Self {
            key: self.key.clone(),
            frames,
            animated: self.animated,
            size: self.size,
            hotspot: self.hotspot,
        })
    }

    /// Renames every frame file on disk, replacing the old key with
    /// `key` in each filename. Returns self unchanged on equal key.
    pub fn rename(self, key: &str) -> CursorResult<Self> {
        if key == self.key {
            return Ok(self);
        }

        let mut frames = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let name = frame
                .file_name()
                .ok_or_else(|| CursorError::NotFound(frame.clone()))?
                .to_string_lossy()
                .replace(&self.key, key);
            let dst = frame.with_file_name(name);
            fs::rename(frame, &dst)?;
            frames.push(dst);
        }

        Ok(Self {
            key: key.to_string(),
            frames,
            animated: self.animated,
            size: self.size,
            hotspot: self.hotspot,
        })
    }
}

fn scale_hotspot(hot: u32, from: u32, to: u32) -> u32 {
    (f64::from(to) * f64::from(hot) / f64::from(from)).round() as u32
}

fn check_bitmap(path: &Path) -> CursorResult<()> {
    if !path.exists() {
        return Err(CursorError::NotFound(path.to_path_buf()));
    }
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(CursorError::UnsupportedFormat(path.to_path_buf()));
    }
    Ok(())
}

/// Static frames keep their full stem as the key. Animated frames must
/// carry a `<key>-<digits>` stem; the digit suffix is stripped.
fn derive_key(path: &Path, animated: bool) -> CursorResult<String> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !animated {
        return Ok(stem);
    }

    match stem.rsplit_once('-') {
        Some((key, seq))
            if !key.is_empty() && !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Ok(key.to_string())
        }
        _ => Err(CursorError::Naming(
            path.file_name().unwrap_or_default().to_string_lossy().into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, size: u32) -> PathBuf {
        let mut img = RgbaImage::new(size, size);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]);
        }
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn static_set_uses_stem_as_key() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "left_ptr.png", 32);

        let set = BitmapSet::open(&[png], (4, 6), None).unwrap();
        assert_eq!(set.key(), "left_ptr");
        assert!(!set.animated());
        assert_eq!(set.size(), 32);
        assert_eq!(set.hotspot(), (4, 6));
    }

    #[test]
    fn animated_frames_sort_by_filename() {
        let dir = tempdir().unwrap();
        let f0 = write_png(dir.path(), "wait-000.png", 32);
        let f2 = write_png(dir.path(), "wait-002.png", 32);
        let f1 = write_png(dir.path(), "wait-001.png", 32);

        let set = BitmapSet::open(&[f0.clone(), f2.clone(), f1.clone()], (0, 0), None).unwrap();
        assert!(set.animated());
        assert_eq!(set.key(), "wait");
        assert_eq!(set.frames(), &[f0, f1, f2]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = BitmapSet::open(&[dir.path().join("nope.png")], (0, 0), None).unwrap_err();
        assert!(matches!(err, CursorError::NotFound(_)));
    }

    #[test]
    fn non_png_is_unsupported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cursor.svg");
        fs::write(&path, b"<svg/>").unwrap();

        let err = BitmapSet::open(&[path], (0, 0), None).unwrap_err();
        assert!(matches!(err, CursorError::UnsupportedFormat(_)));
    }

    #[test]
    fn non_square_frame_is_shape_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::new(32, 16).save(&path).unwrap();

        let err = BitmapSet::open(&[path], (0, 0), None).unwrap_err();
        assert!(matches!(err, CursorError::Shape(_)));
    }

    #[test]
    fn mismatched_frame_sizes_are_shape_error() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "spin-000.png", 32);
        let b = write_png(dir.path(), "spin-001.png", 24);

        let err = BitmapSet::open(&[a, b], (0, 0), None).unwrap_err();
        assert!(matches!(err, CursorError::Shape(_)));
    }

    #[test]
    fn animated_frame_without_sequence_is_naming_error() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "spin-000.png", 32);
        let b = write_png(dir.path(), "spin.png", 32);

        let err = BitmapSet::open(&[a, b], (0, 0), None).unwrap_err();
        assert!(matches!(err, CursorError::Naming(_)));
    }

    #[test]
    fn foreign_frame_is_key_mismatch() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "spin-000.png", 32);
        let b = write_png(dir.path(), "whirl-001.png", 32);

        let err = BitmapSet::open(&[a, b], (0, 0), None).unwrap_err();
        assert!(matches!(err, CursorError::KeyMismatch { .. }));
    }

    #[test]
    fn resize_updates_dimensions_and_hotspot() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "ptr.png", 64);

        let mut set = BitmapSet::open(&[png.clone()], (16, 48), None).unwrap();
        set.resize(32).unwrap();

        assert_eq!(set.size(), 32);
        assert_eq!(set.hotspot(), (8, 24));
        assert_eq!(image::image_dimensions(&png).unwrap(), (32, 32));
    }

    #[test]
    fn resize_to_current_size_is_noop() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "ptr.png", 32);

        let mut set = BitmapSet::open(&[png], (5, 5), None).unwrap();
        set.resize(32).unwrap();
        assert_eq!(set.hotspot(), (5, 5));
    }

    #[test]
    fn hotspot_stays_within_bounds_after_resize() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "edge.png", 50);

        let mut set = BitmapSet::open(&[png], (49, 0), None).unwrap();
        set.resize(24).unwrap();

        let (x, y) = set.hotspot();
        assert!(x <= 24);
        assert!(y <= 24);
    }

    #[test]
    fn hotspot_scaling_is_linear_within_rounding() {
        let dir = tempdir().unwrap();

        let direct_png = write_png(dir.path(), "direct.png", 96);
        let mut direct = BitmapSet::open(&[direct_png], (31, 17), None).unwrap();
        direct.resize(24).unwrap();

        let stepped_png = write_png(dir.path(), "stepped.png", 96);
        let mut stepped = BitmapSet::open(&[stepped_png], (31, 17), None).unwrap();
        stepped.resize(48).unwrap();
        stepped.resize(24).unwrap();

        let (dx, dy) = direct.hotspot();
        let (sx, sy) = stepped.hotspot();
        assert!(dx.abs_diff(sx) <= 1);
        assert!(dy.abs_diff(sy) <= 1);
    }

    #[test]
    fn reproduce_pastes_onto_canvas_and_clamps_hotspot() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "win.png", 64);

        let mut set = BitmapSet::open(&[png.clone()], (63, 63), None).unwrap();
        set.reproduce(20, 32, Anchor::TopLeft).unwrap();

        assert_eq!(set.size(), 32);
        assert_eq!(image::image_dimensions(&png).unwrap(), (32, 32));
        let (x, y) = set.hotspot();
        assert!(x < 32);
        assert!(y < 32);

        // content sits top-left, so the far corner stays transparent
        let img = image::open(&png).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(31, 31)[3], 0);
    }

    #[test]
    fn reproduce_center_rounds_offset_down() {
        assert_eq!(Anchor::Center.offset(13), (6, 6));
        assert_eq!(Anchor::Center.offset(12), (6, 6));
    }

    #[test]
    fn copy_is_independent_of_the_original() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "ptr.png", 32);
        let set = BitmapSet::open(&[png.clone()], (8, 8), None).unwrap();

        let copy_dir = dir.path().join("copy");
        let mut copied = set.copy(&copy_dir).unwrap();
        assert_ne!(copied.frames(), set.frames());

        copied.resize(16).unwrap();
        assert_eq!(image::image_dimensions(&png).unwrap(), (32, 32));
        assert_eq!(image::image_dimensions(&copied.frames()[0]).unwrap(), (16, 16));
    }

    #[test]
    fn rename_moves_frames_to_new_key() {
        let dir = tempdir().unwrap();
        let a = write_png(dir.path(), "spin-000.png", 32);
        let b = write_png(dir.path(), "spin-001.png", 32);

        let set = BitmapSet::open(&[a.clone(), b], (0, 0), None).unwrap();
        let renamed = set.rename("wait").unwrap();

        assert_eq!(renamed.key(), "wait");
        assert!(dir.path().join("wait-000.png").exists());
        assert!(dir.path().join("wait-001.png").exists());
        assert!(!a.exists());
    }

    #[test]
    fn rename_to_same_key_keeps_paths() {
        let dir = tempdir().unwrap();
        let png = write_png(dir.path(), "ptr.png", 32);
        let set = BitmapSet::open(&[png.clone()], (0, 0), None).unwrap();

        let renamed = set.rename("ptr").unwrap();
        assert_eq!(renamed.frames(), &[png]);
    }
}
