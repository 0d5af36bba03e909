/// Smallest visible span, in samples
pub const MIN_SPAN: f64 = 10.0;

/// Fixed amplitude range of the plot
pub const Y_RANGE: (f64, f64) = (-1.0, 1.0);

/// Visible X range of the waveform plot, in sample-index units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotView {
    pub x_min: f64,
    pub x_max: f64,
    total: f64,
}

impl PlotView {
    /// Full view over `len` samples
    pub fn new(len: usize) -> Self {
        let total = len as f64;
        Self {
            x_min: 0.0,
            x_max: total.max(1.0),
            total,
        }
    }

    pub fn span(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.total as usize);
    }

    /// Plot X at a horizontal fraction (0 = left edge, 1 = right edge)
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.x_min + fraction * self.span()
    }

    /// Horizontal fraction of a plot X
    pub fn fraction_of(&self, x: f64) -> f64 {
        (x - self.x_min) / self.span()
    }

    /// Vertical fraction of an amplitude (0 = top, 1 = bottom)
    pub fn y_fraction_of(y: f64) -> f64 {
        (Y_RANGE.1 - y) / (Y_RANGE.1 - Y_RANGE.0)
    }

    /// Zoom by `factor` (> 1 zooms in) keeping `anchor` at the same place
    pub fn zoom(&mut self, anchor: f64, factor: f64) {
        if factor <= 0.0 || !anchor.is_finite() {
            return;
        }
        let min_span = MIN_SPAN.min(self.total).max(1.0);
        let max_span = self.total.max(1.0);
        let span = (self.span() / factor).clamp(min_span, max_span);
        let left_share = self.fraction_of(anchor).clamp(0.0, 1.0);

        self.x_min = anchor - left_share * span;
        self.x_max = self.x_min + span;
        self.clamp();
    }

    /// Shift the view by `delta` samples
    pub fn pan(&mut self, delta: f64) {
        self.x_min += delta;
        self.x_max += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        let span = self.span();
        let upper = self.total.max(1.0);
        if self.x_min < 0.0 {
            self.x_min = 0.0;
            self.x_max = span;
        }
        if self.x_max > upper {
            self.x_max = upper;
            self.x_min = (upper - span).max(0.0);
        }
    }
}
