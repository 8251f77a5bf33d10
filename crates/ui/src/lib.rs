pub mod canvas;
pub mod constants;
pub mod properties;
pub mod theme;
pub mod timeline;
pub mod transport;
pub mod upload;

use std::path::PathBuf;

use storycut_state::item::MediaId;

pub trait TextureLookup {
    /// Latest picture for an item: the decoded still, or the newest video frame.
    fn item_texture(&self, id: MediaId) -> Option<&egui::TextureHandle>;
    fn is_pending(&self, id: MediaId) -> bool;
}

/// Read-only snapshot of the transport, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackView {
    pub clock: f64,
    pub playing: bool,
    pub muted: bool,
}

/// Requests the panels cannot satisfy by editing `AppState` alone.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    TogglePlay,
    Reset,
    ToggleMute,
    Seek(f64),
    VolumeChanged(MediaId),
    DurationChanged,
    Upload(PathBuf),
}
