pub mod frame;
pub mod surface;
pub mod sync;
pub mod track;

#[cfg(test)]
mod fake;

pub use frame::{FrameLoop, FrameToken};
pub use surface::{MediaSurface, SurfaceError, SurfaceEvent};
pub use sync::{PlaybackState, SyncConfig, Synchronizer};
pub use track::TrackState;
