//! The overlay window: an eframe app that renders the mascot and feeds it
//! local pointer input.

use crate::animation::FrameId;
use crate::config::MascotConfig;
use crate::geometry::{Point, Size};
use crate::mascot::Mascot;
use crate::watcher::GlobalInputWatcher;
use eframe::egui;
use std::collections::HashMap;
use std::time::Duration;

/// The subset of [`egui::Context`] the surface drives, so geometry syncing
/// can be checked without a window.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint_after(&self, after: Duration);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint_after(&self, after: Duration) {
        egui::Context::request_repaint_after(self, after);
    }
}

/// Pointer input on the overlay, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalInput {
    LeftPress(Point),
    RightPress(Point),
    Move(Point),
    LeftRelease,
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x.round() as i32, pos.y.round() as i32)
}

/// Translate raw egui events into [`LocalInput`], keeping their order.
pub fn local_inputs(events: &[egui::Event]) -> Vec<LocalInput> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                ..
            } => Some(LocalInput::LeftPress(to_point(*pos))),
            egui::Event::PointerButton {
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } => Some(LocalInput::LeftRelease),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Secondary,
                pressed: true,
                ..
            } => Some(LocalInput::RightPress(to_point(*pos))),
            egui::Event::PointerMoved(pos) => Some(LocalInput::Move(to_point(*pos))),
            _ => None,
        })
        .collect()
}

/// Feed one pointer input to the mascot. `window_origin` is where the OS
/// window currently sits; every local position in a batch is relative to it,
/// even after the mascot has asked to move.
pub fn apply_local_input(mascot: &mut Mascot, window_origin: Point, input: LocalInput) {
    match input {
        LocalInput::LeftPress(local) => {
            mascot.press_left(local);
        }
        LocalInput::RightPress(local) => {
            mascot.press_right(local);
        }
        LocalInput::Move(local) => {
            if mascot.is_dragging() {
                mascot.drag_to(window_origin + local);
            }
        }
        LocalInput::LeftRelease => mascot.release_left(),
    }
}

/// Last geometry pushed to the window, so unchanged values are not resent.
#[derive(Debug, Default)]
pub struct ViewportSync {
    position: Option<Point>,
    size: Option<Size>,
}

impl ViewportSync {
    pub fn sync(&mut self, ctx: &impl ViewportCtx, position: Point, size: Size) {
        if self.position != Some(position) {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                position.x as f32,
                position.y as f32,
            )));
            self.position = Some(position);
        }
        if self.size != Some(size) {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                size.width as f32,
                size.height as f32,
            )));
            self.size = Some(size);
        }
    }
}

pub fn native_options(config: &MascotConfig) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sonic")
            .with_inner_size([1.0, 1.0])
            .with_position([
                config.start_position.x as f32,
                config.start_position.y as f32,
            ])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false),
        ..Default::default()
    }
}

pub struct MascotApp {
    mascot: Mascot,
    watcher: GlobalInputWatcher,
    textures: HashMap<(FrameId, bool), egui::TextureHandle>,
    viewport: ViewportSync,
}

impl MascotApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mascot: Mascot,
        watcher: GlobalInputWatcher,
    ) -> Self {
        // Frames are measured in pixels; keep one egui point per pixel.
        cc.egui_ctx.set_pixels_per_point(1.0);
        Self {
            mascot,
            watcher,
            textures: HashMap::new(),
            viewport: ViewportSync::default(),
        }
    }

    fn texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let id = self.mascot.current_frame_id()?;
        let flip = self.mascot.flip_horizontal();
        let frame = self.mascot.current_frame()?;
        let texture = self.textures.entry((id, flip)).or_insert_with(|| {
            let pixels = frame.pixels(flip);
            let size = [pixels.width() as usize, pixels.height() as usize];
            ctx.load_texture(
                format!("frame-{id}-{flip}"),
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw()),
                egui::TextureOptions::NEAREST,
            )
        });
        Some(texture.clone())
    }
}

impl eframe::App for MascotApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for click in self.watcher.drain_outside(self.mascot.bounds()) {
            self.mascot.set_destination(click);
        }

        let (inputs, outer) = ctx.input(|i| (local_inputs(&i.events), i.viewport().outer_rect));
        let origin = outer
            .map(|rect| to_point(rect.min))
            .unwrap_or_else(|| self.mascot.position());
        for input in inputs {
            apply_local_input(&mut self.mascot, origin, input);
        }

        self.mascot.update();
        self.viewport.sync(ctx, self.mascot.position(), self.mascot.size());

        let texture = self.texture(ctx);
        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            if let Some(texture) = texture {
                let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, texture.size_vec2());
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter().image(texture.id(), rect, uv, egui::Color32::WHITE);
            }
        });

        ViewportCtx::request_repaint_after(ctx, self.mascot.config().motion_interval);
    }
}
