use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};
use log::info;

use crate::config::ViewerConfig;
use crate::render::{render, DrawCommand, FrameState};
use crate::state::{PlotPointer, ViewerState};
use crate::view::PlotView;

const BACKGROUND: Color32 = Color32::from_rgb(115, 140, 153);
const PLOT_FILL: Color32 = Color32::from_gray(30);
const GRID_COLOR: Color32 = Color32::from_gray(70);
const WAVEFORM_COLOR: Color32 = Color32::from_rgb(80, 180, 255);
const CURSOR_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
const MARKER_COLOR: Color32 = Color32::from_rgb(0, 255, 0);
const LABEL_COLOR: Color32 = Color32::WHITE;

/// Room left of and below the plot for axis labels
const AXIS_MARGIN: f32 = 44.0;
const SUMMARY_HEIGHT: f32 = 160.0;

/// Open the viewer window and block until it is closed
pub fn run(config: &ViewerConfig, state: ViewerState) -> eframe::Result<()> {
    let title = config.window_title();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(title.clone())
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(WaveformApp::new(state)))),
    )
}

pub struct WaveformApp {
    state: ViewerState,
    /// Screen area of the plot as laid out in the last frame
    plot_rect: Rect,
    close_logged: bool,
}

impl WaveformApp {
    pub fn new(state: ViewerState) -> Self {
        Self {
            state,
            plot_rect: Rect::NOTHING,
            close_logged: false,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn plot_rect(&self) -> Rect {
        self.plot_rect
    }

    /// One frame of the viewer, independent of the eframe host
    pub fn show(&mut self, ctx: &egui::Context) {
        self.log_host_events(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(BACKGROUND))
            .show(ctx, |ui| self.show_waveform(ui));
    }

    fn log_host_events(&mut self, ctx: &egui::Context) {
        let (dropped, close_requested) = ctx.input(|i| {
            let dropped: Vec<String> = i
                .raw
                .dropped_files
                .iter()
                .map(|f| match &f.path {
                    Some(path) => path.display().to_string(),
                    None => f.name.clone(),
                })
                .collect();
            (dropped, i.viewport().close_requested())
        });

        if !dropped.is_empty() {
            info!("drop triggered: {:?}", dropped);
        }
        if close_requested && !self.close_logged {
            info!("window is closing");
            self.close_logged = true;
        }
    }

    fn show_waveform(&mut self, ui: &mut egui::Ui) {
        let summary_height = SUMMARY_HEIGHT.min(ui.available_height() * 0.5);
        let plot_size = egui::vec2(
            ui.available_width(),
            (ui.available_height() - summary_height).max(AXIS_MARGIN * 3.0),
        );
        let (rect, response) = ui.allocate_exact_size(plot_size, Sense::click_and_drag());
        let plot_rect = Rect::from_min_max(
            rect.min + egui::vec2(AXIS_MARGIN, 0.0),
            rect.max - egui::vec2(0.0, AXIS_MARGIN),
        );
        self.plot_rect = plot_rect;

        self.handle_navigation(ui, &response, plot_rect);

        let pointer = response
            .hover_pos()
            .filter(|pos| plot_rect.contains(*pos))
            .map(|pos| PlotPointer {
                x: self.plot_x(pos, plot_rect),
                clicked: response.clicked_by(egui::PointerButton::Primary),
            });
        self.state.on_plot_pointer(pointer);

        let columns = plot_rect.width().max(1.0) as usize;
        let commands = render(&FrameState::from(&self.state), columns);

        self.paint_axes(&ui.painter_at(rect), plot_rect);
        self.paint_plot(&ui.painter_at(plot_rect), plot_rect, &commands);

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for command in &commands {
                    if let DrawCommand::Text(line) = command {
                        ui.label(egui::RichText::new(line).color(LABEL_COLOR));
                    }
                }
            });
    }

    fn plot_x(&self, pos: Pos2, plot_rect: Rect) -> f64 {
        let fraction = (pos.x - plot_rect.left()) / plot_rect.width();
        self.state.view.x_at(f64::from(fraction))
    }

    /// Ctrl+scroll zooms around the pointer, horizontal scroll or a middle
    /// drag pans, double-click shows everything again.
    fn handle_navigation(&mut self, ui: &egui::Ui, response: &egui::Response, plot_rect: Rect) {
        if response.double_clicked() {
            self.state.view.reset();
        }
        if !response.hovered() {
            return;
        }

        let samples_per_px = self.state.view.span() / f64::from(plot_rect.width().max(1.0));
        let (scroll, ctrl) = ui.input(|i| (i.raw_scroll_delta, i.modifiers.ctrl));

        if ctrl && scroll.y != 0.0 {
            if let Some(pos) = response.hover_pos() {
                let anchor = self.plot_x(pos, plot_rect);
                let factor = if scroll.y > 0.0 { 1.1 } else { 0.9 };
                self.state.view.zoom(anchor, factor);
            }
        } else if scroll.x != 0.0 {
            self.state.view.pan(-f64::from(scroll.x) * samples_per_px);
        }

        if response.dragged_by(egui::PointerButton::Middle) {
            self.state.view.pan(-f64::from(response.drag_delta().x) * samples_per_px);
        }
    }

    fn paint_axes(&self, painter: &egui::Painter, plot_rect: Rect) {
        let font = FontId::proportional(12.0);
        let view = &self.state.view;

        for amplitude in [1.0, 0.0, -1.0] {
            let y =
                plot_rect.top() + PlotView::y_fraction_of(amplitude) as f32 * plot_rect.height();
            painter.text(
                Pos2::new(plot_rect.left() - 4.0, y),
                Align2::RIGHT_CENTER,
                format!("{amplitude}"),
                font.clone(),
                LABEL_COLOR,
            );
        }
        painter.text(
            Pos2::new(plot_rect.left() - 4.0, plot_rect.top() + 14.0),
            Align2::RIGHT_TOP,
            "Amplitude",
            font.clone(),
            LABEL_COLOR,
        );

        let label_y = plot_rect.bottom() + 4.0;
        painter.text(
            Pos2::new(plot_rect.left(), label_y),
            Align2::LEFT_TOP,
            format!("{:.0}", view.x_min),
            font.clone(),
            LABEL_COLOR,
        );
        painter.text(
            Pos2::new(plot_rect.right(), label_y),
            Align2::RIGHT_TOP,
            format!("{:.0}", view.x_max),
            font.clone(),
            LABEL_COLOR,
        );
        painter.text(
            Pos2::new(plot_rect.center().x, label_y + 16.0),
            Align2::CENTER_TOP,
            "Sample Number",
            font,
            LABEL_COLOR,
        );
    }

    fn paint_plot(&self, painter: &egui::Painter, plot_rect: Rect, commands: &[DrawCommand]) {
        let view = &self.state.view;
        let to_screen = |x: f64, y: f64| {
            Pos2::new(
                plot_rect.left() + view.fraction_of(x) as f32 * plot_rect.width(),
                plot_rect.top() + PlotView::y_fraction_of(y) as f32 * plot_rect.height(),
            )
        };
        let vertical_line = |x: f64, color: Color32| {
            if x < view.x_min || x > view.x_max {
                return;
            }
            let screen_x = to_screen(x, 0.0).x;
            painter.line_segment(
                [
                    Pos2::new(screen_x, plot_rect.top()),
                    Pos2::new(screen_x, plot_rect.bottom()),
                ],
                Stroke::new(1.0, color),
            );
        };

        painter.rect_filled(plot_rect, 0.0, PLOT_FILL);
        painter.line_segment(
            [to_screen(view.x_min, 0.0), to_screen(view.x_max, 0.0)],
            Stroke::new(1.0, GRID_COLOR),
        );

        for command in commands {
            match command {
                DrawCommand::Waveform(points) if points.len() == 1 => {
                    let center = to_screen(points[0][0], points[0][1]);
                    painter.circle_filled(center, 1.5, WAVEFORM_COLOR);
                }
                DrawCommand::Waveform(points) => {
                    let screen: Vec<Pos2> = points.iter().map(|p| to_screen(p[0], p[1])).collect();
                    painter.add(Shape::line(screen, Stroke::new(1.0, WAVEFORM_COLOR)));
                }
                DrawCommand::Cursor { x } => vertical_line(*x, CURSOR_COLOR),
                DrawCommand::Marker { index } => vertical_line(*index as f64, MARKER_COLOR),
                DrawCommand::Text(_) => {}
            }
        }
    }
}

impl eframe::App for WaveformApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
