// Theme assembly: sequences discovery, validation, config generation,
// external compilation, symlink expansion and packaging for every
// logical cursor in a source directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::{info, warn};

use crate::config::{BuildSettings, ThemeInfo};
use crate::error::CursorResult;
use crate::model::{Anchor, BitmapSet, names};
use crate::pipeline::alias::CursorAlias;
use crate::pipeline::compiler::ExternalCompiler;
use crate::pipeline::fs_ops;
use crate::pipeline::packager;
use crate::pipeline::scan::{self, DiscoveredCursor};
use crate::pipeline::symlinks;

/// Windows cursors always build on a 32px canvas.
const WIN_CANVAS_SIZE: u32 = 32;
/// Content size pasted onto the Windows canvas.
const WIN_CONTENT_SIZE: u32 = 20;
/// Frame delay for animated Windows cursors, in jiffies.
const WIN_ANIMATION_DELAY: u32 = 3;

struct WinCursor {
    name: &'static str,
    xcursor: &'static str,
    /// Anchored roles paste reduced content onto the canvas; roles
    /// without a placement stretch across the full canvas instead.
    placement: Option<Anchor>,
}

/// Fixed mapping of Windows scheme roles onto X11 cursor roles.
static WINDOWS_CURSORS: &[WinCursor] = &[
    WinCursor { name: "Alternate", xcursor: "right_ptr", placement: Some(Anchor::TopLeft) },
    WinCursor { name: "Busy", xcursor: "wait", placement: None },
    WinCursor { name: "Cross", xcursor: "cross", placement: None },
    WinCursor { name: "Default", xcursor: "left_ptr", placement: Some(Anchor::TopLeft) },
    WinCursor { name: "Diagonal_1", xcursor: "fd_double_arrow", placement: None },
    WinCursor { name: "Diagonal_2", xcursor: "bd_double_arrow", placement: None },
    WinCursor { name: "Handwriting", xcursor: "pencil", placement: None },
    WinCursor { name: "Help", xcursor: "help", placement: Some(Anchor::TopLeft) },
    WinCursor { name: "Horizontal", xcursor: "sb_h_double_arrow", placement: None },
    WinCursor { name: "IBeam", xcursor: "xterm", placement: Some(Anchor::TopLeft) },
    WinCursor { name: "Link", xcursor: "hand2", placement: Some(Anchor::TopLeft) },
    WinCursor { name: "Move", xcursor: "hand1", placement: None },
    WinCursor { name: "Unavailiable", xcursor: "circle", placement: Some(Anchor::TopLeft) },
    WinCursor { name: "Vertical", xcursor: "sb_v_double_arrow", placement: None },
    WinCursor { name: "Work", xcursor: "left_ptr_watch", placement: Some(Anchor::TopLeft) },
];

#[derive(Clone, Debug)]
pub struct FailedCursor {
    pub key: String,
    pub reason: String,
}

/// Outcome of one assembly run. A cursor is either built (both
/// platforms) or failed; a failed cursor never aborts the run.
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    pub built: Vec<String>,
    pub failed: Vec<FailedCursor>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ThemeAssembler {
    info: ThemeInfo,
    settings: BuildSettings,
}

impl ThemeAssembler {
    pub fn new(info: ThemeInfo, settings: BuildSettings) -> Self {
        Self { info, settings }
    }

    /// Builds the full theme. Per-cursor failures are collected in the
    /// report; resource-setup failures (temp dir, output dir) are
    /// fatal. The working directory is removed on every exit path.
    pub fn assemble(&self) -> Result<BuildReport> {
        let cursors = scan::scan_bitmaps_dir(&self.settings.bitmaps_dir)
            .context("scan bitmaps directory")?;
        info!(count = cursors.len(), "discovered logical cursors");

        let work = TempDir::with_prefix("cursorgen_build_").context("create working directory")?;
        let staging = work.path().join("staging");
        let x_root = work.path().join("x11");
        let x_cursors = x_root.join("cursors");
        let win_root = work.path().join("windows");
        fs_ops::ensure_dir(&staging)?;
        fs_ops::ensure_dir(&x_cursors)?;
        fs_ops::ensure_dir(&win_root)?;

        let x_compiler =
            ExternalCompiler::new(self.settings.x_compiler.as_str(), self.settings.compiler_timeout);
        let win_compiler =
            ExternalCompiler::new(self.settings.win_compiler.as_str(), self.settings.compiler_timeout);

        let mut report = BuildReport::default();
        let mut win_artifacts: Vec<(String, String)> = Vec::new();

        for cursor in &cursors {
            match self.build_cursor(
                cursor,
                &staging,
                &x_cursors,
                &win_root,
                &x_compiler,
                &win_compiler,
                &mut win_artifacts,
            ) {
                Ok(name) => {
                    info!(cursor = %name, "built");
                    report.built.push(name);
                }
                Err(e) => {
                    warn!(cursor = %cursor.key, error = %e, "failed");
                    report.failed.push(FailedCursor {
                        key: cursor.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        packager::write_x11_theme(&x_root, &self.info)?;
        win_artifacts.sort();
        packager::write_install_inf(&win_root, &self.info, &win_artifacts)?;
        packager::write_uninstall_bat(&win_root, &self.info)?;

        self.install(&x_root, &win_root)?;

        Ok(report)
    }

    /// One cursor end-to-end: resolve name, open and stage the frames,
    /// emit the alias config, compile, expand symlinks, then the same
    /// for the Windows side when the role maps to a scheme cursor.
    #[allow(clippy::too_many_arguments)]
    fn build_cursor(
        &self,
        cursor: &DiscoveredCursor,
        staging: &Path,
        x_cursors: &Path,
        win_root: &Path,
        x_compiler: &ExternalCompiler,
        win_compiler: &ExternalCompiler,
        win_artifacts: &mut Vec<(String, String)>,
    ) -> CursorResult<String> {
        let resolution = names::resolve(&cursor.key);
        if !resolution.known {
            warn!(name = %cursor.key, "unknown cursor name, keeping it as-is");
        }
        let canonical = resolution.name;

        let (width, _) = image::image_dimensions(&cursor.frames[0])?;
        let hotspot = self.settings.hotspots.get_or_center(&cursor.key, width);

        let source = BitmapSet::open(&cursor.frames, hotspot, Some(&cursor.key))?;
        let staged = source
            .copy(&staging.join(&canonical))?
            .rename(&canonical)?;

        // keep an untouched copy for the Windows build before the X11
        // alias takes ownership
        let win_source = staged.copy(&staging.join(format!("{canonical}.win")))?;

        let mut alias = CursorAlias::new(staged)?;
        let config = alias.create(&self.settings.sizes, self.settings.animation_delay)?;
        let artifact = x_cursors.join(&canonical);
        x_compiler.compile(&config, alias.prefix(), &artifact)?;

        let aliases = names::aliases_of(&canonical);
        symlinks::expand(&canonical, &aliases, x_cursors)?;

        if let Some(win) = windows_cursor_for(&canonical) {
            let file = self.build_windows_cursor(win, win_source, win_root, win_compiler)?;
            win_artifacts.push((win.name.to_string(), file));
        }

        Ok(canonical)
    }

    fn build_windows_cursor(
        &self,
        win: &WinCursor,
        set: BitmapSet,
        win_root: &Path,
        compiler: &ExternalCompiler,
    ) -> CursorResult<String> {
        let mut set = set.rename(win.name)?;
        match win.placement {
            Some(anchor) => set.reproduce(WIN_CONTENT_SIZE, WIN_CANVAS_SIZE, anchor)?,
            None => set.resize(WIN_CANVAS_SIZE)?,
        }

        let animated = set.animated();
        let mut alias = CursorAlias::new(set)?;
        let config = alias.create(&[WIN_CANVAS_SIZE], WIN_ANIMATION_DELAY)?;

        let ext = if animated { "ani" } else { "cur" };
        let file = format!("{}.{}", win.name, ext);
        compiler.compile(&config, alias.prefix(), &win_root.join(&file))?;
        Ok(file)
    }

    /// Copies the finished trees into the output directory, replacing
    /// any previous build of the same theme.
    fn install(&self, x_root: &Path, win_root: &Path) -> Result<()> {
        let out = &self.settings.out_dir;
        fs_ops::ensure_dir(out).with_context(|| format!("create '{}'", out.display()))?;

        let x_dir = out.join(&self.info.name);
        let win_dir = out.join(format!("{}-Windows", self.info.name));

        remove_existing(&x_dir)?;
        remove_existing(&win_dir)?;

        fs_ops::copy_dir_all(x_root, &x_dir)
            .with_context(|| format!("install '{}'", x_dir.display()))?;
        fs_ops::copy_dir_all(win_root, &win_dir)
            .with_context(|| format!("install '{}'", win_dir.display()))?;

        info!(x11 = %x_dir.display(), windows = %win_dir.display(), "theme installed");
        Ok(())
    }
}

fn windows_cursor_for(canonical: &str) -> Option<&'static WinCursor> {
    WINDOWS_CURSORS.iter().find(|w| {
        w.xcursor == canonical || names::aliases_of(canonical).contains(&w.xcursor)
    })
}

fn remove_existing(dir: &PathBuf) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("remove '{}'", dir.display()))?;
    }
    Ok(())
}
