use egui::{pos2, vec2, CornerRadius, Rect, Sense, Stroke};
use storycut_state::project::AppState;
use storycut_state::timeline::{self, TimelineBar};

use crate::constants::{BAR_HEIGHT, RULER_HEIGHT, STRIP_HEIGHT};
use crate::theme;
use crate::{PlaybackView, UiAction};

/// Horizontal position within `rect` as a fraction of its width.
pub fn fraction_at(rect: Rect, x: f32) -> f32 {
    if rect.width() <= 0.0 {
        return 0.0;
    }
    ((x - rect.min.x) / rect.width()).clamp(0.0, 1.0)
}

fn bar_rect(lane: Rect, bar: &TimelineBar) -> Rect {
    let left = lane.min.x + bar.left * lane.width();
    let width = (bar.width * lane.width()).max(2.0);
    Rect::from_min_size(pos2(left, lane.min.y), vec2(width, lane.height()))
}

pub fn timeline_strip(
    ui: &mut egui::Ui,
    state: &mut AppState,
    playback: PlaybackView,
) -> Option<UiAction> {
    let (rect, response) = ui.allocate_exact_size(
        vec2(ui.available_width(), STRIP_HEIGHT),
        Sense::click_and_drag(),
    );
    let painter = ui.painter().with_clip_rect(rect);
    let duration = state.project.duration();

    painter.rect_filled(rect, theme::ROUNDING, theme::STRIP_BG);

    let ruler = Rect::from_min_size(rect.min, vec2(rect.width(), RULER_HEIGHT));
    painter.rect_filled(ruler, CornerRadius::ZERO, theme::RULER_BG);
    for marker in timeline::time_markers(duration) {
        if marker.fraction > 1.0 {
            continue;
        }
        let x = ruler.min.x + marker.fraction * ruler.width();
        painter.line_segment(
            [pos2(x, ruler.max.y - 6.0), pos2(x, ruler.max.y)],
            Stroke::new(1.0, theme::TEXT_DIM),
        );
        painter.text(
            pos2(x + 3.0, ruler.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{}s", marker.seconds),
            egui::FontId::monospace(10.0),
            theme::TEXT_DIM,
        );
    }

    let lane = Rect::from_min_size(
        pos2(rect.min.x, rect.max.y - BAR_HEIGHT - 3.0),
        vec2(rect.width(), BAR_HEIGHT),
    );
    let bars = timeline::bars(&state.project);
    for bar in &bars {
        let color = if state.ui.selection.is_selected(bar.id) {
            theme::SELECTION
        } else {
            theme::BAR
        };
        painter.rect_filled(bar_rect(lane, bar), theme::ROUNDING_SM, color.gamma_multiply(0.7));
    }

    let playhead_x =
        rect.min.x + timeline::playhead_fraction(playback.clock, duration) * rect.width();
    painter.line_segment(
        [pos2(playhead_x, rect.min.y), pos2(playhead_x, rect.max.y)],
        Stroke::new(2.0, theme::PLAYHEAD_COLOR),
    );

    let pointer = response.interact_pointer_pos()?;
    let fraction = fraction_at(rect, pointer.x);

    if response.clicked() {
        if lane.y_range().contains(pointer.y) {
            if let Some(id) = timeline::bar_at(&bars, fraction) {
                state.ui.selection.select(id);
                return None;
            }
        }
        return Some(UiAction::Seek(timeline::time_at_fraction(fraction, duration)));
    }

    if response.dragged() {
        return Some(UiAction::Seek(timeline::time_at_fraction(fraction, duration)));
    }

    None
}
