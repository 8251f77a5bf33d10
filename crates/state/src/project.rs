use egui::{Pos2, Vec2};
use log::debug;

use crate::geometry::{self, CanvasGesture};
use crate::item::{MediaId, MediaItem, MediaKind, TimingWindow};
use crate::selection::Selection;

pub const DEFAULT_PROJECT_DURATION: f64 = 60.0;
pub const MIN_PROJECT_DURATION: f64 = 1.0;
pub const MIN_WINDOW_SPAN: f64 = 0.1;
/// Shortest media length treated as real. Anything shorter is a bogus
/// report and is ignored.
pub const MIN_INTRINSIC_DURATION: f64 = 0.01;
/// Metadata reported by a playing surface only replaces the recorded
/// duration when the two disagree by more than this.
pub const DURATION_RECONCILE_TOLERANCE: f64 = 0.5;

/// The media registry: every placed item in insertion order, plus the
/// project-wide bounds they live in.
#[derive(Debug, Clone)]
pub struct ProjectState {
    items: Vec<MediaItem>,
    duration: f64,
    canvas: Vec2,
}

impl ProjectState {
    pub fn new(canvas: Vec2, duration: f64) -> Self {
        Self {
            items: Vec::new(),
            duration: if duration.is_finite() {
                duration.max(MIN_PROJECT_DURATION)
            } else {
                DEFAULT_PROJECT_DURATION
            },
            canvas: Vec2::new(
                canvas.x.max(geometry::MIN_ITEM_SIZE),
                canvas.y.max(geometry::MIN_ITEM_SIZE),
            ),
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn item(&self, id: MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|m| m.id == id)
    }

    pub fn item_mut(&mut self, id: MediaId) -> Option<&mut MediaItem> {
        self.items.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.items.iter().any(|m| m.id == id)
    }

    pub fn videos(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|m| m.is_video())
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Grows the project so that `required` seconds fit. Never shrinks.
    pub fn ensure_duration(&mut self, required: f64) {
        if required.is_finite() && required > self.duration {
            let extended = required.ceil();
            debug!("project duration {:.1}s -> {:.1}s", self.duration, extended);
            self.duration = extended;
        }
    }

    /// Sets the duration from the project settings form. Windows that no
    /// longer fit are pulled back inside the new bound.
    pub fn set_duration(&mut self, duration: f64) {
        let duration = if duration.is_finite() {
            duration.max(MIN_PROJECT_DURATION)
        } else {
            DEFAULT_PROJECT_DURATION
        };
        self.duration = duration;
        for item in &mut self.items {
            item.timing = clamp_window(
                item.timing.start,
                item.timing.end,
                duration,
                item.intrinsic_duration.filter(|_| item.is_video()),
            );
        }
    }

    /// Inserts a new item, fitting its geometry onto the canvas and its
    /// window into the project (extending the project if needed).
    pub fn insert(&mut self, mut item: MediaItem) -> MediaId {
        let (position, size) = geometry::fit_to_canvas(item.position, item.size, self.canvas);
        item.position = position;
        item.size = size;
        self.ensure_duration(item.timing.end);
        item.timing = clamp_window(
            item.timing.start,
            item.timing.end,
            self.duration,
            item.intrinsic_duration.filter(|_| item.is_video()),
        );
        let id = item.id;
        debug!(
            "registered {} {} window [{:.2}, {:.2}]",
            item.kind.label(),
            id,
            item.timing.start,
            item.timing.end
        );
        self.items.push(item);
        id
    }

    pub fn set_position(&mut self, id: MediaId, position: Pos2) {
        let canvas = self.canvas;
        if let Some(item) = self.item_mut(id) {
            item.position = geometry::clamp_position(position, item.size, canvas);
        }
    }

    /// Applies a geometry computed by a resize session. The result is
    /// re-validated so a stale session can never break the bounds.
    pub fn set_geometry(&mut self, id: MediaId, position: Pos2, size: Vec2) {
        let canvas = self.canvas;
        if let Some(item) = self.item_mut(id) {
            let (position, size) = geometry::fit_to_canvas(position, size, canvas);
            item.position = position;
            item.size = size;
        }
    }

    pub fn set_size(&mut self, id: MediaId, size: Vec2) {
        let canvas = self.canvas;
        if let Some(item) = self.item_mut(id) {
            item.size = geometry::clamp_size(size, item.position, canvas);
        }
    }

    pub fn set_timing(&mut self, id: MediaId, start: f64, end: f64) {
        let duration = self.duration;
        if let Some(item) = self.item_mut(id) {
            let intrinsic = item.intrinsic_duration.filter(|_| item.kind == MediaKind::Video);
            item.timing = clamp_window(start, end, duration, intrinsic);
        }
    }

    pub fn set_volume(&mut self, id: MediaId, volume: f32) {
        if let Some(item) = self.item_mut(id) {
            item.volume = if volume.is_finite() {
                volume.clamp(0.0, 1.0)
            } else {
                1.0
            };
        }
    }

    pub fn set_playing_flag(&mut self, id: MediaId, playing: bool) {
        if let Some(item) = self.item_mut(id) {
            item.is_playing = playing;
        }
    }

    /// Records the playable length reported once a video's metadata has
    /// loaded. Returns `true` when the item changed.
    pub fn apply_intrinsic_duration(&mut self, id: MediaId, intrinsic: f64) -> bool {
        if !intrinsic.is_finite() || intrinsic < MIN_INTRINSIC_DURATION {
            return false;
        }
        let Some(item) = self.item(id) else {
            return false;
        };
        if !item.is_video() {
            return false;
        }
        let unchanged = item
            .intrinsic_duration
            .is_some_and(|d| (d - intrinsic).abs() <= DURATION_RECONCILE_TOLERANCE);
        if unchanged {
            return false;
        }

        let start = item.timing.start;
        self.ensure_duration(start + intrinsic);
        let duration = self.duration;
        if let Some(item) = self.item_mut(id) {
            item.intrinsic_duration = Some(intrinsic);
            item.timing = clamp_window(start, start + intrinsic, duration, Some(intrinsic));
            debug!(
                "{id} metadata: {intrinsic:.2}s, window [{:.2}, {:.2}]",
                item.timing.start, item.timing.end
            );
        }
        true
    }

    /// Topmost item (last in registry order) whose rectangle contains `point`.
    pub fn item_at(&self, point: Pos2, clock: f64, visible_only: bool) -> Option<MediaId> {
        self.items
            .iter()
            .rev()
            .filter(|m| !visible_only || m.timing.contains(clock))
            .find(|m| egui::Rect::from_min_size(m.position, m.size).contains(point))
            .map(|m| m.id)
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0), DEFAULT_PROJECT_DURATION)
    }
}

/// Normalises a requested window against the project duration and, for
/// videos, the intrinsic media length measured from `start`.
pub fn clamp_window(
    start: f64,
    end: f64,
    project_duration: f64,
    intrinsic: Option<f64>,
) -> TimingWindow {
    let start = if start.is_finite() { start } else { 0.0 };
    let end = if end.is_finite() { end } else { project_duration };
    let intrinsic = intrinsic.filter(|d| d.is_finite() && *d >= MIN_INTRINSIC_DURATION);
    let min_span = match intrinsic {
        Some(d) => MIN_WINDOW_SPAN.min(d),
        None => MIN_WINDOW_SPAN,
    };

    let start = start.min(project_duration - min_span).max(0.0);
    let max_end = match intrinsic {
        Some(d) => project_duration.min(start + d),
        None => project_duration,
    };
    let end = end.max(start + min_span).min(max_end);
    TimingWindow::new(start, end)
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selection: Selection,
    pub gesture: Option<CanvasGesture>,
    pub upload_dialog_open: bool,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub project: ProjectState,
    pub ui: UiState,
}

impl AppState {
    pub fn new(project: ProjectState) -> Self {
        Self {
            project,
            ui: UiState::default(),
        }
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.ui
            .selection
            .selected
            .and_then(|id| self.project.item(id))
    }
}
