use std::path::PathBuf;

use egui::{Pos2, Vec2};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaId(Uuid);

impl MediaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "media-{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }
}

/// Handle to the content backing an item. The editor never looks inside it;
/// media backends open `path` themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub path: PathBuf,
    pub content_type: String,
}

impl MediaSource {
    pub fn new(path: PathBuf, content_type: impl Into<String>) -> Self {
        Self {
            path,
            content_type: content_type.into(),
        }
    }

    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Interval on the project clock during which an item is eligible to be
/// visible or playing. Membership is half-open: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingWindow {
    pub start: f64,
    pub end: f64,
}

impl TimingWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    pub fn local_time(&self, t: f64) -> f64 {
        (t - self.start).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct MediaItem {
    pub id: MediaId,
    pub kind: MediaKind,
    pub source: MediaSource,
    pub position: Pos2,
    pub size: Vec2,
    pub timing: TimingWindow,
    pub volume: f32,
    pub intrinsic_duration: Option<f64>,
    pub is_playing: bool,
}

impl MediaItem {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    pub fn display_name(&self) -> String {
        self.source.filename()
    }

    /// Volume a surface should be driven at, given the global mute flag.
    pub fn effective_volume(&self, muted: bool) -> f32 {
        if muted {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}
