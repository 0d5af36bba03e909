//! wavmark - waveform viewer for 16-bit PCM WAV files
//!
//! Decodes a RIFF/WAVE file into normalized samples, plots them in an egui
//! window and lets the user drop sample-index markers on the plot.
//!
//! Everything except painting (`viewer`) runs headless: `input` decodes,
//! `state` holds the interaction handler and `render` produces draw commands.

pub mod config;
pub mod error;
pub mod input;
pub mod markers;
pub mod render;
pub mod state;
pub mod view;
pub mod viewer;

pub use error::{FormatError, Result, ViewerError};
