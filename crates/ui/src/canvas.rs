use egui::{pos2, CornerRadius, CursorIcon, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use log::trace;
use storycut_state::geometry::{self, CanvasGesture, DragSession, ResizeHandle, ResizeSession};
use storycut_state::item::MediaItem;
use storycut_state::project::AppState;

use crate::constants;
use crate::theme;
use crate::{PlaybackView, TextureLookup};

/// Where the logical canvas sits on screen and how much it is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub rect: Rect,
    pub scale: f32,
}

impl CanvasView {
    /// Largest uniform scale (never above 1) that fits `canvas` into
    /// `available`, centred.
    pub fn fit(available: Rect, canvas: Vec2) -> Self {
        let scale = (available.width() / canvas.x)
            .min(available.height() / canvas.y)
            .clamp(0.01, 1.0);
        let rect = Rect::from_center_size(available.center(), canvas * scale);
        Self { rect, scale }
    }

    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        pos2(
            (screen.x - self.rect.min.x) / self.scale,
            (screen.y - self.rect.min.y) / self.scale,
        )
    }

    pub fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.rect.min + canvas.to_vec2() * self.scale
    }

    pub fn item_rect(&self, item: &MediaItem) -> Rect {
        Rect::from_min_size(self.to_screen(item.position), item.size * self.scale)
    }
}

/// Letterboxes a picture of `content` size inside `frame`, keeping aspect.
pub fn contain(frame: Rect, content: Vec2) -> Rect {
    if content.x <= 0.0 || content.y <= 0.0 {
        return frame;
    }
    let scale = (frame.width() / content.x).min(frame.height() / content.y);
    Rect::from_center_size(frame.center(), content * scale)
}

fn is_drawn(item: &MediaItem, playback: PlaybackView) -> bool {
    !playback.playing || item.timing.contains(playback.clock)
}

pub fn canvas_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    playback: PlaybackView,
    textures: &dyn TextureLookup,
) {
    let available = ui.available_rect_before_wrap().shrink(8.0);
    let view = CanvasView::fit(available, state.project.canvas());
    let response = ui.allocate_rect(view.rect, Sense::click_and_drag());
    let painter = ui.painter().with_clip_rect(view.rect);

    painter.rect_filled(view.rect, CornerRadius::ZERO, theme::CANVAS_BG);

    for item in state.project.items() {
        if !is_drawn(item, playback) {
            continue;
        }
        let rect = view.item_rect(item);
        match textures.item_texture(item.id) {
            Some(tex) => {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(tex.id(), contain(rect, tex.size_vec2()), uv, egui::Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, CornerRadius::ZERO, theme::ITEM_PLACEHOLDER);
                let label = if textures.is_pending(item.id) {
                    "Loading\u{2026}".to_string()
                } else {
                    item.display_name()
                };
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    label,
                    egui::FontId::proportional(12.0),
                    theme::TEXT_DIM,
                );
            }
        }
    }

    if let Some(item) = state.selected_item().filter(|m| is_drawn(m, playback)) {
        draw_selection(&painter, view.item_rect(item));
    }

    handle_pointer(ui, &response, state, playback, view);
}

fn draw_selection(painter: &egui::Painter, rect: Rect) {
    painter.rect_stroke(
        rect,
        CornerRadius::ZERO,
        Stroke::new(constants::SELECTION_STROKE, theme::SELECTION),
        StrokeKind::Inside,
    );
    for handle in ResizeHandle::CORNERS {
        let center = rect.min + rect.size() * handle.anchor();
        painter.circle(
            center,
            constants::HANDLE_SIZE / 2.0,
            theme::HANDLE_FILL,
            Stroke::new(1.0, theme::SELECTION),
        );
    }
}

fn cursor_for(handle: ResizeHandle) -> CursorIcon {
    match handle {
        ResizeHandle::N => CursorIcon::ResizeNorth,
        ResizeHandle::S => CursorIcon::ResizeSouth,
        ResizeHandle::E => CursorIcon::ResizeEast,
        ResizeHandle::W => CursorIcon::ResizeWest,
        ResizeHandle::NE => CursorIcon::ResizeNorthEast,
        ResizeHandle::NW => CursorIcon::ResizeNorthWest,
        ResizeHandle::SE => CursorIcon::ResizeSouthEast,
        ResizeHandle::SW => CursorIcon::ResizeSouthWest,
    }
}

fn selected_handle_at(state: &AppState, point: Pos2, view: CanvasView) -> Option<ResizeHandle> {
    let item = state.selected_item()?;
    geometry::handle_at(point, item.position, item.size, constants::HANDLE_SIZE / view.scale)
}

fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    state: &mut AppState,
    playback: PlaybackView,
    view: CanvasView,
) {
    if let Some(hover) = response.hover_pos() {
        let point = view.to_canvas(hover);
        let icon = match state.ui.gesture {
            Some(CanvasGesture::Resize { session, .. }) => Some(cursor_for(session.handle())),
            Some(CanvasGesture::Drag { .. }) => Some(CursorIcon::Grabbing),
            None => selected_handle_at(state, point, view).map(cursor_for).or_else(|| {
                state
                    .project
                    .item_at(point, playback.clock, playback.playing)
                    .map(|_| CursorIcon::Move)
            }),
        };
        if let Some(icon) = icon {
            ui.ctx().set_cursor_icon(icon);
        }
    }

    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(origin) = origin {
            let grab = constants::HANDLE_SIZE / view.scale;
            begin_gesture(state, view.to_canvas(origin), playback, grab);
        }
    }

    if response.dragged() {
        let pointer = response.interact_pointer_pos();
        if let (Some(gesture), Some(pointer)) = (state.ui.gesture, pointer) {
            let point = view.to_canvas(pointer);
            let canvas = state.project.canvas();
            match gesture {
                CanvasGesture::Drag { id, session } => {
                    if let Some(size) = state.project.item(id).map(|m| m.size) {
                        let position = session.position_for(point, size, canvas);
                        state.project.set_position(id, position);
                    }
                }
                CanvasGesture::Resize { id, session } => {
                    let (position, size) = session.geometry_for(point, canvas);
                    state.project.set_geometry(id, position, size);
                }
            }
        }
    }

    if response.drag_stopped() {
        if let Some(gesture) = state.ui.gesture.take() {
            trace!("gesture on {} ended", gesture.item());
        }
    }

    if response.clicked() {
        if let Some(pointer) = response.interact_pointer_pos() {
            let point = view.to_canvas(pointer);
            match state.project.item_at(point, playback.clock, playback.playing) {
                Some(id) => state.ui.selection.select(id),
                None => state.ui.selection.clear(),
            }
        }
    }
}

fn begin_gesture(state: &mut AppState, point: Pos2, playback: PlaybackView, grab: f32) {
    let resize = state.selected_item().and_then(|item| {
        geometry::handle_at(point, item.position, item.size, grab).map(|handle| {
            CanvasGesture::Resize {
                id: item.id,
                session: ResizeSession::begin(handle, point, item.position, item.size),
            }
        })
    });
    if resize.is_some() {
        state.ui.gesture = resize;
        return;
    }

    match state.project.item_at(point, playback.clock, playback.playing) {
        Some(id) => {
            let position = state.project.item(id).map(|m| m.position).unwrap_or(point);
            state.ui.selection.select(id);
            state.ui.gesture = Some(CanvasGesture::Drag {
                id,
                session: DragSession::begin(point, position),
            });
        }
        None => {
            state.ui.selection.clear();
            state.ui.gesture = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::vec2;

    use super::*;

    #[test]
    fn canvas_is_scaled_down_and_centred() {
        let available = Rect::from_min_size(pos2(0.0, 0.0), vec2(640.0, 480.0));
        let view = CanvasView::fit(available, vec2(1280.0, 720.0));
        assert_eq!(view.scale, 0.5);
        assert_eq!(view.rect.size(), vec2(640.0, 360.0));
        assert_eq!(view.rect.min, pos2(0.0, 60.0));
    }

    #[test]
    fn canvas_is_never_enlarged() {
        let available = Rect::from_min_size(pos2(0.0, 0.0), vec2(4000.0, 3000.0));
        let view = CanvasView::fit(available, vec2(1280.0, 720.0));
        assert_eq!(view.scale, 1.0);
    }

    #[test]
    fn screen_and_canvas_coordinates_round_trip() {
        let view = CanvasView {
            rect: Rect::from_min_size(pos2(100.0, 40.0), vec2(640.0, 360.0)),
            scale: 0.5,
        };
        let p = pos2(300.0, 200.0);
        assert_eq!(view.to_canvas(view.to_screen(p)), p);
        assert_eq!(view.to_screen(pos2(0.0, 0.0)), pos2(100.0, 40.0));
    }

    #[test]
    fn contain_letterboxes() {
        let frame = Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 300.0));
        let fitted = contain(frame, vec2(1920.0, 1080.0));
        assert_eq!(fitted.width(), 300.0);
        assert!((fitted.height() - 168.75).abs() < 1e-3);
        assert_eq!(fitted.center(), frame.center());
    }
}
