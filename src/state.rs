use log::debug;

use crate::input::DecodedAudio;
use crate::markers::{MarkerList, MarkerTrigger};
use crate::view::PlotView;

/// Pointer state over the plot for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPointer {
    /// Plot-space X under the pointer
    pub x: f64,
    pub clicked: bool,
}

/// Everything the viewer needs between frames. Built once at startup and
/// mutated only from the frame callback.
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub audio: DecodedAudio,
    pub markers: MarkerList,
    pub view: PlotView,
    pub trigger: MarkerTrigger,
    /// Sample index under the pointer in the last frame
    pub hover_index: Option<i64>,
}

impl ViewerState {
    pub fn new(audio: DecodedAudio, trigger: MarkerTrigger) -> Self {
        let view = PlotView::new(audio.len());
        Self {
            audio,
            markers: MarkerList::new(),
            view,
            trigger,
            hover_index: None,
        }
    }

    /// Feed one frame of pointer state; `None` when the plot is not hovered.
    /// Returns true if a marker was placed.
    pub fn on_plot_pointer(&mut self, pointer: Option<PlotPointer>) -> bool {
        let Some(pointer) = pointer.filter(|p| p.x.is_finite()) else {
            self.hover_index = None;
            return false;
        };

        // `as` truncates toward zero and saturates
        let index = pointer.x as i64;
        self.hover_index = Some(index);

        if !self.trigger.fires(true, pointer.clicked) {
            return false;
        }
        let placed = self.markers.try_insert(index, self.audio.len());
        if placed {
            debug!("marker placed at sample {}", index);
        }
        placed
    }
}
