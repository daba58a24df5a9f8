// Library exports for cursorgen

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;

pub use config::{BuildSettings, ThemeInfo};
pub use error::{CursorError, CursorResult};
pub use model::{Anchor, BitmapSet, Hotspot, HotspotMap};
pub use pipeline::assembler::{BuildReport, ThemeAssembler};
