use std::path::PathBuf;

use crate::input::DecodeOptions;
use crate::markers::MarkerTrigger;

pub const DEFAULT_WIDTH: f32 = 1200.0;
pub const DEFAULT_HEIGHT: f32 = 900.0;

/// Startup configuration for the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub input: PathBuf,
    pub decode: DecodeOptions,
    pub trigger: MarkerTrigger,
    pub window_size: [f32; 2],
}

impl ViewerConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            decode: DecodeOptions::default(),
            trigger: MarkerTrigger::default(),
            window_size: [DEFAULT_WIDTH, DEFAULT_HEIGHT],
        }
    }

    pub fn window_title(&self) -> String {
        format!("Waveform Viewer - {}", self.input.display())
    }
}
