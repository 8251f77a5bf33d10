use std::collections::VecDeque;

use log::{trace, warn};
use storycut_playback::{SurfaceError, SurfaceEvent};

/// What a pipeline bus message means to a surface.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BusSignal {
    /// The pipeline itself reached `Playing`.
    Playing,
    /// Preroll finished or the duration changed; carries the queried length.
    DurationChanged(Option<f64>),
    EndOfStream,
    Failed(String),
}

/// Playback flags and queued events of one surface, updated from its bus.
#[derive(Debug)]
pub(crate) struct SurfaceStatus {
    events: VecDeque<SurfaceEvent>,
    paused: bool,
    play_pending: bool,
    duration_reported: bool,
}

impl Default for SurfaceStatus {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            paused: true,
            play_pending: false,
            duration_reported: false,
        }
    }
}

impl SurfaceStatus {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.events.pop_front()
    }

    /// A play request was accepted. `completed` is set when the state change
    /// finished synchronously, so no bus message will follow.
    pub fn begin_play(&mut self, completed: bool) {
        self.play_pending = true;
        self.paused = false;
        if completed {
            self.settle_play(Ok(()));
        }
    }

    pub fn mark_paused(&mut self) {
        self.paused = true;
    }

    pub fn apply(&mut self, signal: BusSignal) {
        match signal {
            BusSignal::Playing => self.settle_play(Ok(())),
            BusSignal::DurationChanged(Some(duration))
                if duration.is_finite() && duration > 0.0 && !self.duration_reported =>
            {
                self.duration_reported = true;
                self.events.push_back(SurfaceEvent::MetadataLoaded { duration });
            }
            BusSignal::DurationChanged(_) => {}
            BusSignal::EndOfStream => {
                trace!("end of stream");
                self.paused = true;
            }
            BusSignal::Failed(reason) => {
                if self.play_pending {
                    self.settle_play(Err(SurfaceError::Backend(reason)));
                } else {
                    warn!("video surface: {reason}");
                }
                self.paused = true;
            }
        }
    }

    fn settle_play(&mut self, result: Result<(), SurfaceError>) {
        if self.play_pending {
            self.play_pending = false;
            self.events.push_back(SurfaceEvent::PlaySettled(result));
        }
    }
}
