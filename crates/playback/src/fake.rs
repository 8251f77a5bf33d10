use std::collections::VecDeque;

use crate::surface::{MediaSurface, SurfaceError, SurfaceEvent};

/// In-memory surface whose play acknowledgments are delivered by the test.
pub struct FakeSurface {
    pub paused: bool,
    pub time: f64,
    pub volume: f32,
    pub muted: bool,
    pub reject_play: bool,
    pub play_outstanding: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
    /// Pauses issued while a play was still unacknowledged.
    pub unsafe_pauses: usize,
    pub seeks: Vec<f64>,
    pub events: VecDeque<SurfaceEvent>,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self {
            paused: true,
            time: 0.0,
            volume: 1.0,
            muted: false,
            reject_play: false,
            play_outstanding: false,
            play_calls: 0,
            pause_calls: 0,
            unsafe_pauses: 0,
            seeks: Vec::new(),
            events: VecDeque::new(),
        }
    }
}

impl FakeSurface {
    pub fn settle(&mut self, result: Result<(), SurfaceError>) {
        if !self.play_outstanding {
            return;
        }
        self.play_outstanding = false;
        if result.is_err() {
            self.paused = true;
        }
        self.events.push_back(SurfaceEvent::PlaySettled(result));
    }
}

impl MediaSurface for FakeSurface {
    fn play(&mut self) -> Result<(), SurfaceError> {
        self.play_calls += 1;
        if self.reject_play {
            return Err(SurfaceError::Rejected("fake rejection".into()));
        }
        self.play_outstanding = true;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        if self.play_outstanding {
            self.unsafe_pauses += 1;
        }
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek(&mut self, seconds: f64) {
        self.time = seconds;
        self.seeks.push(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn poll_event(&mut self) -> Option<SurfaceEvent> {
        self.events.pop_front()
    }
}
