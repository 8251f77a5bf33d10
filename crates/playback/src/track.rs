use log::{debug, warn};
use storycut_state::item::MediaId;

use crate::surface::{MediaSurface, SurfaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    #[default]
    Idle,
    /// `play()` issued, acknowledgment outstanding.
    PlayPending,
    /// `play()` still outstanding and a pause is waiting for it to settle.
    PausePending,
    Playing,
    Paused,
}

impl TrackState {
    pub fn play_in_flight(self) -> bool {
        matches!(self, TrackState::PlayPending | TrackState::PausePending)
    }
}

/// A surface plus what the synchronizer believes about it.
pub struct Track<S> {
    id: MediaId,
    surface: S,
    state: TrackState,
}

impl<S: MediaSurface> Track<S> {
    pub fn new(id: MediaId, surface: S) -> Self {
        Self {
            id,
            surface,
            state: TrackState::Idle,
        }
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TrackState::Playing
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Whether a pause sweep has anything to stop on this track.
    pub fn needs_pause(&self) -> bool {
        self.is_playing() || self.state.play_in_flight() || !self.surface.is_paused()
    }

    pub fn request_play(&mut self) {
        if self.state.play_in_flight() {
            return;
        }
        match self.surface.play() {
            Ok(()) => {
                debug!("{}: play requested", self.id);
                self.state = TrackState::PlayPending;
            }
            Err(e) => {
                warn!("{}: {e}", self.id);
                self.state = TrackState::Idle;
            }
        }
    }

    pub fn request_pause(&mut self) {
        match self.state {
            TrackState::PlayPending => {
                debug!("{}: pause deferred until play settles", self.id);
                self.state = TrackState::PausePending;
            }
            TrackState::PausePending => {}
            TrackState::Idle | TrackState::Playing | TrackState::Paused => {
                self.surface.pause();
                self.state = TrackState::Paused;
            }
        }
    }

    pub fn on_play_settled(&mut self, result: Result<(), SurfaceError>) {
        match (self.state, result) {
            (TrackState::PlayPending, Ok(())) => {
                self.state = TrackState::Playing;
            }
            (TrackState::PausePending, Ok(())) => {
                self.surface.pause();
                self.state = TrackState::Paused;
            }
            (TrackState::PlayPending | TrackState::PausePending, Err(e)) => {
                warn!("{}: {e}", self.id);
                self.state = TrackState::Idle;
            }
            (state, _) => {
                debug!("{}: stale play acknowledgment in {state:?}", self.id);
                if state != TrackState::Playing && !self.surface.is_paused() {
                    self.surface.pause();
                }
            }
        }
    }
}
