use eframe::egui;
use image::{RgbImage, imageops};
use pdf_slice::{LineId, LineRegistry, LoadedImage};
use std::borrow::Cow;

const LINE_WIDTH: f32 = 3.0;
/// Half-height of the grab band around each line, in screen points
const GRAB_MARGIN: f32 = 5.0;
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 140, 0);

/// Pointer interaction the app applies to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    Select(Option<LineId>),
    DragMoved { line: LineId, x: f64, y: f64 },
    DragFinished { line: LineId },
}

#[derive(Default)]
pub struct CanvasState {
    texture: Option<egui::TextureHandle>,
    pub selected: Option<LineId>,
    /// Image row at the centre of the scrolled viewport
    pub visible_center: Option<f64>,
}

impl CanvasState {
    pub fn set_image(&mut self, ctx: &egui::Context, source: &LoadedImage) {
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let preview = preview_image(&source.image, max_side);
        let color_image = egui::ColorImage::from_rgb(
            [preview.width() as usize, preview.height() as usize],
            preview.as_raw(),
        );

        self.texture = Some(ctx.load_texture(
            "slice_source",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
        self.selected = None;
        self.visible_center = None;
    }
}

/// Downscale `image` so neither side exceeds `max_side`
fn preview_image(image: &RgbImage, max_side: u32) -> Cow<'_, RgbImage> {
    let longest = image.width().max(image.height());
    if max_side == 0 || longest <= max_side {
        return Cow::Borrowed(image);
    }

    let scale = max_side as f64 / longest as f64;
    let width = ((image.width() as f64 * scale) as u32).max(1);
    let height = ((image.height() as f64 * scale) as u32).max(1);
    log::debug!(
        "Preview downscaled from {}x{} to {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );
    Cow::Owned(imageops::resize(
        image,
        width,
        height,
        imageops::FilterType::Triangle,
    ))
}

/// Move a line's image row by a screen-space drag delta, keeping the grab
/// point under the pointer.
fn dragged_row(row: f64, delta: f32, zoom: f32) -> f64 {
    if zoom > 0.0 {
        row + (delta / zoom) as f64
    } else {
        row
    }
}

pub fn show_canvas(
    ui: &mut egui::Ui,
    state: &mut CanvasState,
    registry: Option<&LineRegistry>,
    image_width: u32,
    enabled: bool,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();

    let (Some(texture), Some(registry)) = (state.texture.as_ref(), registry) else {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.heading("No Image");
                ui.label("Open or drop an image to begin");
            });
        });
        return actions;
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Shrink to the panel width, never enlarge
        let zoom = (ui.available_width() / image_width.max(1) as f32).min(1.0);
        let size = egui::vec2(
            image_width as f32 * zoom,
            registry.image_height() as f32 * zoom,
        );
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let to_image = |pos: egui::Pos2| {
            (
                ((pos.x - rect.left()) / zoom) as f64,
                ((pos.y - rect.top()) / zoom) as f64,
            )
        };

        let center = ui.clip_rect().center();
        state.visible_center = Some(to_image(center).1.clamp(0.0, registry.image_height()));

        if enabled && response.clicked() {
            actions.push(CanvasAction::Select(None));
        }

        for line in registry.lines() {
            let y = rect.top() + line.y() as f32 * zoom;
            let band = egui::Rect::from_x_y_ranges(
                rect.x_range(),
                (y - GRAB_MARGIN)..=(y + GRAB_MARGIN),
            );
            let line_response = ui.interact(
                band,
                ui.id().with(("cut_line", line.id().0)),
                egui::Sense::click_and_drag(),
            );

            if enabled {
                if line_response.clicked() || line_response.drag_started() {
                    actions.push(CanvasAction::Select(Some(line.id())));
                }
                if line_response.dragged() {
                    if let Some(pos) = line_response.interact_pointer_pos() {
                        let (x, _) = to_image(pos);
                        let y = dragged_row(line.y(), line_response.drag_delta().y, zoom);
                        actions.push(CanvasAction::DragMoved {
                            line: line.id(),
                            x,
                            y,
                        });
                    }
                }
                if line_response.drag_stopped() {
                    actions.push(CanvasAction::DragFinished { line: line.id() });
                }
                if line_response.hovered() || line_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeVertical);
                }
            }

            let color = if state.selected == Some(line.id()) {
                SELECTED_COLOR
            } else {
                egui::Color32::RED
            };
            ui.painter()
                .hline(rect.x_range(), y, egui::Stroke::new(LINE_WIDTH, color));
        }
    });

    actions
}
