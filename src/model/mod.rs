pub mod bitmap;
pub mod hotspots;
pub mod names;

pub use bitmap::{Anchor, BitmapSet};
pub use hotspots::{Hotspot, HotspotMap};
