//! Headless frame rendering.
//!
//! `render` turns the viewer state into a flat list of draw commands in plot
//! space. The GUI shell maps them onto the screen; nothing here knows about
//! egui, so the output can be checked in plain unit tests.

use crate::input::DecodedAudio;
use crate::markers::MarkerList;
use crate::state::ViewerState;
use crate::view::PlotView;

/// Read-only view of what a frame needs
#[derive(Debug, Clone, Copy)]
pub struct FrameState<'a> {
    pub audio: &'a DecodedAudio,
    pub markers: &'a MarkerList,
    pub view: &'a PlotView,
    pub hover_index: Option<i64>,
}

impl<'a> From<&'a ViewerState> for FrameState<'a> {
    fn from(state: &'a ViewerState) -> Self {
        Self {
            audio: &state.audio,
            markers: &state.markers,
            view: &state.view,
            hover_index: state.hover_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Polyline of (sample index, amplitude) points
    Waveform(Vec<[f64; 2]>),
    /// Vertical line under the pointer
    Cursor { x: f64 },
    /// Vertical line at a placed marker
    Marker { index: u64 },
    /// One line of text below the plot
    Text(String),
}

/// Build the draw list for one frame. `columns` is the plot width in pixels
/// and caps the waveform at two points per column.
pub fn render(frame: &FrameState<'_>, columns: usize) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(frame.markers.len() * 2 + 4);

    commands.push(DrawCommand::Waveform(visible_points(
        &frame.audio.samples,
        frame.view,
        columns,
    )));

    if let Some(index) = frame.hover_index {
        commands.push(DrawCommand::Cursor { x: index as f64 });
    }

    commands.extend(frame.markers.iter().map(|index| DrawCommand::Marker { index }));

    commands.extend(
        summary_lines(frame.audio, frame.markers)
            .into_iter()
            .map(DrawCommand::Text),
    );

    commands
}

/// Sample-rate, sample-count and per-marker lines
pub fn summary_lines(audio: &DecodedAudio, markers: &MarkerList) -> Vec<String> {
    let mut lines = vec![
        format!("Sample Rate: {} Hz", audio.sample_rate),
        format!("Total Samples: {}", audio.len()),
    ];

    if !markers.is_empty() {
        lines.push("Markers:".to_string());
        lines.extend(markers.iter().enumerate().map(|(i, index)| {
            format!(
                "Marker {}: Sample {} ({:.3} seconds)",
                i + 1,
                index,
                audio.seconds_at(index)
            )
        }));
    }

    lines
}

/// Points of the waveform inside the view, reduced to min/max per column
/// when there are more samples than the plot can show.
pub fn visible_points(samples: &[f64], view: &PlotView, columns: usize) -> Vec<[f64; 2]> {
    let len = samples.len();
    let start = (view.x_min.floor().max(0.0) as usize).min(len);
    let end = (view.x_max.ceil().max(0.0) as usize).clamp(start, len);

    decimate(&samples[start..end], start, columns)
}

fn decimate(samples: &[f64], offset: usize, columns: usize) -> Vec<[f64; 2]> {
    let columns = columns.max(1);
    let n = samples.len();
    let point = |i: usize| [(offset + i) as f64, samples[i]];

    if n <= 2 * columns {
        return (0..n).map(point).collect();
    }

    let mut points = Vec::with_capacity(2 * columns);
    for column in 0..columns {
        let lo = column * n / columns;
        let hi = (column + 1) * n / columns;

        let (mut min_i, mut max_i) = (lo, lo);
        for (i, &s) in samples.iter().enumerate().take(hi).skip(lo) {
            if s < samples[min_i] {
                min_i = i;
            }
            if s > samples[max_i] {
                max_i = i;
            }
        }

        points.push(point(min_i.min(max_i)));
        points.push(point(min_i.max(max_i)));
    }
    points
}
