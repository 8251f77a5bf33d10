use egui::vec2;

pub const TRANSPORT_BTN_SIZE: egui::Vec2 = vec2(32.0, 26.0);
pub const PROPERTIES_WIDTH: f32 = 280.0;

/// On-screen diameter of a corner handle, and width of an edge grab strip.
pub const HANDLE_SIZE: f32 = 14.0;
pub const SELECTION_STROKE: f32 = 2.0;

pub const RULER_HEIGHT: f32 = 22.0;
pub const BAR_HEIGHT: f32 = 22.0;
pub const STRIP_HEIGHT: f32 = RULER_HEIGHT + BAR_HEIGHT + 6.0;
