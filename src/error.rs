use std::path::PathBuf;

pub type CursorResult<T> = Result<T, CursorError>;

#[derive(thiserror::Error, Debug)]
pub enum CursorError {
    #[error("bitmap not found: '{0}'")]
    NotFound(PathBuf),

    #[error("unsupported bitmap '{0}': only '.png' files are accepted")]
    UnsupportedFormat(PathBuf),

    #[error("shape error: {0}")]
    Shape(String),

    #[error("invalid frame name '{0}': grouped bitmaps need a frame number after '-', like 'bitmap-000.png'")]
    Naming(String),

    #[error("frame '{frame}' does not match group key '{key}'")]
    KeyMismatch { frame: String, key: String },

    #[error("invalid size request: {0}")]
    InvalidSize(String),

    #[error("no frames found in '{0}'")]
    EmptyDirectory(PathBuf),

    #[error("cursor compiler failed: {0}")]
    Compiler(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl CursorError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    pub fn compiler(msg: impl Into<String>) -> Self {
        Self::Compiler(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CursorError::shape("x")
                .to_string()
                .contains("shape error:")
        );
        assert!(
            CursorError::invalid_size("x")
                .to_string()
                .contains("invalid size request:")
        );
        assert!(
            CursorError::compiler("x")
                .to_string()
                .contains("cursor compiler failed:")
        );
    }

    #[test]
    fn io_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CursorError::from(base);
        assert!(err.to_string().contains("boom"));
    }
}
