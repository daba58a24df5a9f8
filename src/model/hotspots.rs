// Hotspot map: logical key -> click point in source pixel space.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Hotspot {
    pub xhot: u32,
    pub yhot: u32,
}

/// External hotspot input, loaded from a JSON object of the form
/// `{"left_ptr": {"xhot": 4, "yhot": 2}, ...}`. Keys absent from the
/// map default to the geometric center of the source frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HotspotMap(HashMap<String, Hotspot>);

impl HotspotMap {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read hotspots file '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parse hotspots file '{}'", path.display()))
    }

    pub fn insert(&mut self, key: impl Into<String>, hotspot: Hotspot) {
        self.0.insert(key.into(), hotspot);
    }

    pub fn get(&self, key: &str) -> Option<Hotspot> {
        self.0.get(key).copied()
    }

    /// Hotspot for `key`, or the center of a `size` x `size` frame.
    pub fn get_or_center(&self, key: &str, size: u32) -> (u32, u32) {
        match self.get(key) {
            Some(h) => (h.xhot, h.yhot),
            None => (size / 2, size / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_entries_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hotspots.json");
        fs::write(&path, r#"{"left_ptr": {"xhot": 4, "yhot": 2}}"#).unwrap();

        let map = HotspotMap::load(&path).unwrap();
        assert_eq!(map.get_or_center("left_ptr", 32), (4, 2));
    }

    #[test]
    fn missing_key_defaults_to_center() {
        let map = HotspotMap::default();
        assert_eq!(map.get_or_center("wait", 32), (16, 16));
        assert_eq!(map.get_or_center("wait", 25), (12, 12));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hotspots.json");
        fs::write(&path, "{nope").unwrap();
        assert!(HotspotMap::load(&path).is_err());
    }
}
