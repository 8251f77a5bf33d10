use egui::{pos2, vec2, Pos2, Vec2};

use crate::item::MediaId;

pub const MIN_ITEM_SIZE: f32 = 50.0;

pub fn clamp_position(position: Pos2, size: Vec2, canvas: Vec2) -> Pos2 {
    pos2(
        position.x.min(canvas.x - size.x).max(0.0),
        position.y.min(canvas.y - size.y).max(0.0),
    )
}

/// Size requested from the dimension inputs, bounded by the space left to
/// the right of and below `position`.
pub fn clamp_size(size: Vec2, position: Pos2, canvas: Vec2) -> Vec2 {
    vec2(
        size.x.min(canvas.x - position.x).max(MIN_ITEM_SIZE),
        size.y.min(canvas.y - position.y).max(MIN_ITEM_SIZE),
    )
}

/// Fits a freshly created item onto the canvas: size first, then position.
pub fn fit_to_canvas(position: Pos2, size: Vec2, canvas: Vec2) -> (Pos2, Vec2) {
    let size = vec2(
        size.x.min(canvas.x).max(MIN_ITEM_SIZE),
        size.y.min(canvas.y).max(MIN_ITEM_SIZE),
    );
    (clamp_position(position, size, canvas), size)
}

#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pointer_origin: Pos2,
    item_origin: Pos2,
}

impl DragSession {
    pub fn begin(pointer: Pos2, item_position: Pos2) -> Self {
        Self {
            pointer_origin: pointer,
            item_origin: item_position,
        }
    }

    pub fn position_for(&self, pointer: Pos2, size: Vec2, canvas: Vec2) -> Pos2 {
        let delta = pointer - self.pointer_origin;
        clamp_position(self.item_origin + delta, size, canvas)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SW,
        ResizeHandle::SE,
    ];

    pub const EDGES: [ResizeHandle; 4] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
    ];

    pub fn north(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    pub fn south(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    pub fn east(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    pub fn west(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Anchor of the handle on a unit square, (0,0) being the top-left corner.
    pub fn anchor(self) -> Vec2 {
        let x = if self.west() {
            0.0
        } else if self.east() {
            1.0
        } else {
            0.5
        };
        let y = if self.north() {
            0.0
        } else if self.south() {
            1.0
        } else {
            0.5
        };
        vec2(x, y)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResizeSession {
    handle: ResizeHandle,
    pointer_origin: Pos2,
    start_position: Pos2,
    start_size: Vec2,
}

impl ResizeSession {
    pub fn begin(handle: ResizeHandle, pointer: Pos2, position: Pos2, size: Vec2) -> Self {
        Self {
            handle,
            pointer_origin: pointer,
            start_position: position,
            start_size: size,
        }
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    pub fn geometry_for(&self, pointer: Pos2, canvas: Vec2) -> (Pos2, Vec2) {
        let delta = pointer - self.pointer_origin;
        let mut position = self.start_position;
        let mut size = self.start_size;

        if self.handle.east() {
            size.x = trailing_edge(self.start_position.x, self.start_size.x, delta.x, canvas.x);
        }
        if self.handle.south() {
            size.y = trailing_edge(self.start_position.y, self.start_size.y, delta.y, canvas.y);
        }
        if self.handle.west() {
            let (start, len) = leading_edge(self.start_position.x, self.start_size.x, delta.x);
            position.x = start;
            size.x = len;
        }
        if self.handle.north() {
            let (start, len) = leading_edge(self.start_position.y, self.start_size.y, delta.y);
            position.y = start;
            size.y = len;
        }

        (position, size)
    }
}

/// Handle under `point` for an item at `position`/`size`. Corners win over
/// edges; edges are strips `grab` wide centred on the border.
pub fn handle_at(point: Pos2, position: Pos2, size: Vec2, grab: f32) -> Option<ResizeHandle> {
    let half = grab / 2.0;
    let corner = ResizeHandle::CORNERS.into_iter().find(|h| {
        let p = position + size * h.anchor();
        (point.x - p.x).abs() <= half && (point.y - p.y).abs() <= half
    });
    if corner.is_some() {
        return corner;
    }

    let inside_x = point.x >= position.x && point.x <= position.x + size.x;
    let inside_y = point.y >= position.y && point.y <= position.y + size.y;
    let near = |edge: f32, v: f32| (v - edge).abs() <= half;
    if inside_x && near(position.y, point.y) {
        Some(ResizeHandle::N)
    } else if inside_x && near(position.y + size.y, point.y) {
        Some(ResizeHandle::S)
    } else if inside_y && near(position.x, point.x) {
        Some(ResizeHandle::W)
    } else if inside_y && near(position.x + size.x, point.x) {
        Some(ResizeHandle::E)
    } else {
        None
    }
}

/// Pointer interaction in progress on the canvas.
#[derive(Debug, Clone, Copy)]
pub enum CanvasGesture {
    Drag { id: MediaId, session: DragSession },
    Resize { id: MediaId, session: ResizeSession },
}

impl CanvasGesture {
    pub fn item(&self) -> MediaId {
        match self {
            CanvasGesture::Drag { id, .. } | CanvasGesture::Resize { id, .. } => *id,
        }
    }
}

fn trailing_edge(start: f32, len: f32, delta: f32, canvas_len: f32) -> f32 {
    (len + delta).min(canvas_len - start).max(MIN_ITEM_SIZE)
}

// The opposite (trailing) edge stays fixed; the leading edge may not pass the
// canvas origin or come closer than the minimum size to the trailing edge.
fn leading_edge(start: f32, len: f32, delta: f32) -> (f32, f32) {
    let lower = -start;
    let upper = (len - MIN_ITEM_SIZE).max(lower);
    let d = delta.max(lower).min(upper);
    (start + d, len - d)
}
