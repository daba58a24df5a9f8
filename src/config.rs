use std::path::PathBuf;
use std::time::Duration;

use crate::model::HotspotMap;

/// Metadata stamped into the generated theme descriptors.
#[derive(Clone, Debug)]
pub struct ThemeInfo {
    pub name: String,
    pub author: String,
    pub comment: String,
    pub url: String,
}

impl ThemeInfo {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        comment: Option<String>,
        url: Option<String>,
    ) -> Self {
        let name = name.into();
        let author = author.into();
        let comment = comment.unwrap_or_else(|| format!("{name} By {author}"));
        let url = url.unwrap_or_else(|| "Unknown Source!".to_string());
        Self {
            name,
            author,
            comment,
            url,
        }
    }
}

/// Settings for one theme build run.
#[derive(Clone, Debug)]
pub struct BuildSettings {
    pub bitmaps_dir: PathBuf,
    pub out_dir: PathBuf,
    /// X11 output sizes; the Windows side always builds on a 32px canvas.
    pub sizes: Vec<u32>,
    /// Frame display duration for animated X11 cursors, in milliseconds.
    pub animation_delay: u32,
    pub hotspots: HotspotMap,
    /// Upper bound on a single external compiler invocation.
    pub compiler_timeout: Duration,
    /// External compiler producing native X11 cursors.
    pub x_compiler: String,
    /// External compiler producing Windows `.cur`/`.ani` cursors.
    pub win_compiler: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            bitmaps_dir: PathBuf::from("."),
            out_dir: PathBuf::from("./out"),
            sizes: vec![24, 28, 32],
            animation_delay: 50,
            hotspots: HotspotMap::default(),
            compiler_timeout: Duration::from_secs(60),
            x_compiler: crate::pipeline::compiler::XCURSORGEN.to_string(),
            win_compiler: crate::pipeline::compiler::ANICURSORGEN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_info_fills_default_comment_and_url() {
        let info = ThemeInfo::new("foo", "bar", None, None);
        assert_eq!(info.comment, "foo By bar");
        assert_eq!(info.url, "Unknown Source!");
    }

    #[test]
    fn theme_info_keeps_explicit_comment() {
        let info = ThemeInfo::new("foo", "bar", Some("hi".into()), Some("https://x".into()));
        assert_eq!(info.comment, "hi");
        assert_eq!(info.url, "https://x");
    }

    #[test]
    fn default_settings_match_the_documented_defaults() {
        let s = BuildSettings::default();
        assert_eq!(s.animation_delay, 50);
        assert!(!s.sizes.is_empty());
    }
}
