//! Error types for loading and viewing WAV files

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wavmark operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Structural problems found while decoding a RIFF/WAVE stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("truncated header")]
    TruncatedHeader,

    #[error("not a valid WAV file")]
    NotWav,

    #[error("no data chunk found")]
    NoDataChunk,

    /// Only raised when strict format checking is enabled
    #[error(
        "unsupported format {audio_format}, {channels} channel(s), {bits_per_sample}-bit \
         (expected 16-bit mono PCM)"
    )]
    Unsupported {
        audio_format: u16,
        channels: u16,
        bits_per_sample: u16,
    },
}

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("no WAV file given")]
    Argument,

    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl ViewerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViewerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Coarse error category, as reported to the user
    pub fn kind(&self) -> &'static str {
        match self {
            ViewerError::Argument => "ArgumentError",
            ViewerError::Io { .. } | ViewerError::Read(_) => "IOError",
            ViewerError::Format(_) => "FormatError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_messages() {
        assert_eq!(FormatError::TruncatedHeader.to_string(), "truncated header");
        assert_eq!(FormatError::NotWav.to_string(), "not a valid WAV file");
        assert_eq!(FormatError::NoDataChunk.to_string(), "no data chunk found");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ViewerError::Argument.kind(), "ArgumentError");
        let io = ViewerError::io(
            "missing.wav",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(io.kind(), "IOError");
        assert!(io.to_string().contains("missing.wav"));
        let format: ViewerError = FormatError::NotWav.into();
        assert_eq!(format.kind(), "FormatError");
        assert_eq!(format.to_string(), "not a valid WAV file");
    }
}
