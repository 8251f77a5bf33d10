use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("play request rejected: {0}")]
    Rejected(String),
    #[error("media backend error: {0}")]
    Backend(String),
}

/// Asynchronous notifications a surface produces between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Outcome of the most recent `play()` call.
    PlaySettled(Result<(), SurfaceError>),
    MetadataLoaded { duration: f64 },
}

/// One playable video bound to a placed item.
///
/// `play` only starts the transition; the surface reports completion later
/// through [`SurfaceEvent::PlaySettled`]. Callers must not issue `pause`
/// while a play is still unacknowledged, see [`crate::track::Track`].
pub trait MediaSurface {
    fn play(&mut self) -> Result<(), SurfaceError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn seek(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    fn poll_event(&mut self) -> Option<SurfaceEvent>;
}
