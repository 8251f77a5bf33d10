use std::collections::HashMap;

use log::{debug, info};
use storycut_state::item::{MediaId, TimingWindow};
use storycut_state::project::ProjectState;

use crate::frame::{FrameLoop, FrameToken};
use crate::surface::{MediaSurface, SurfaceEvent};
use crate::track::{Track, TrackState};

pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncConfig {
    /// Seconds a surface may wander from the project clock before it is
    /// seeked back.
    pub drift_tolerance: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
        }
    }
}

/// Drives every video surface from a single project clock.
///
/// The synchronizer owns the surfaces (keyed by item id) and the clock; the
/// registry is borrowed per call and only the items' `is_playing` flags are
/// written back. All timestamps passed in are seconds on a monotonic clock
/// supplied by the caller.
pub struct Synchronizer<S> {
    tracks: HashMap<MediaId, Track<S>>,
    state: PlaybackState,
    clock: f64,
    origin: f64,
    muted: bool,
    frames: FrameLoop,
    config: SyncConfig,
}

impl<S: MediaSurface> Synchronizer<S> {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            tracks: HashMap::new(),
            state: PlaybackState::Stopped,
            clock: 0.0,
            origin: 0.0,
            muted: false,
            frames: FrameLoop::default(),
            config,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn scheduled_frame(&self) -> Option<FrameToken> {
        self.frames.scheduled()
    }

    pub fn has_surface(&self, id: MediaId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn surface(&self, id: MediaId) -> Option<&S> {
        self.tracks.get(&id).map(|t| t.surface())
    }

    pub fn surface_mut(&mut self, id: MediaId) -> Option<&mut S> {
        self.tracks.get_mut(&id).map(|t| t.surface_mut())
    }

    pub fn track_state(&self, id: MediaId) -> Option<TrackState> {
        self.tracks.get(&id).map(|t| t.state())
    }

    /// Binds a surface to an item the first time the item is seen. A second
    /// attach for the same id keeps the existing surface.
    pub fn attach(&mut self, id: MediaId, mut surface: S) {
        if self.tracks.contains_key(&id) {
            return;
        }
        surface.set_muted(self.muted);
        debug!("{id}: surface attached");
        self.tracks.insert(id, Track::new(id, surface));
    }

    /// Drops surfaces whose item is no longer in the registry.
    pub fn retain_registered(&mut self, project: &ProjectState) {
        self.tracks.retain(|id, _| {
            let keep = project.contains(*id);
            if !keep {
                debug!("{id}: surface released");
            }
            keep
        });
    }

    pub fn toggle_play(&mut self, now: f64, project: &mut ProjectState) {
        match self.state {
            PlaybackState::Stopped => {
                self.origin = now - self.clock;
                self.reconcile(self.clock, project);
                self.state = PlaybackState::Playing;
                self.frames.schedule();
                info!("playback started at {:.2}s", self.clock);
            }
            PlaybackState::Playing => {
                self.frames.cancel();
                self.state = PlaybackState::Stopped;
                self.pause_all(project);
                info!("playback paused at {:.2}s", self.clock);
            }
        }
    }

    /// Stops playback, rewinds the clock and every surface to zero.
    pub fn reset(&mut self, project: &mut ProjectState) {
        self.frames.cancel();
        self.state = PlaybackState::Stopped;
        self.pause_all(project);
        self.clock = 0.0;
        for track in self.tracks.values_mut() {
            track.surface_mut().seek(0.0);
        }
        debug!("playback reset");
    }

    /// Runs one scheduled frame. Returns `true` while playback continues.
    pub fn run_frame(&mut self, token: FrameToken, now: f64, project: &mut ProjectState) -> bool {
        if !self.frames.take(token) || self.state != PlaybackState::Playing {
            return false;
        }

        let elapsed = now - self.origin;
        if elapsed >= project.duration() {
            info!("reached end of project ({:.2}s)", project.duration());
            self.reset(project);
            return false;
        }

        self.clock = elapsed.max(0.0);
        self.reconcile(self.clock, project);
        self.frames.schedule();
        true
    }

    /// Moves the clock to `t`. While playing, playback continues from there;
    /// while stopped, surfaces in range show the frame at `t`.
    pub fn seek(&mut self, t: f64, now: f64, project: &mut ProjectState) {
        let t = t.clamp(0.0, project.duration());
        self.clock = t;
        match self.state {
            PlaybackState::Playing => {
                self.origin = now - t;
                self.reconcile(t, project);
            }
            PlaybackState::Stopped => {
                for (id, window, _) in self.video_plan(project) {
                    if !window.contains(t) {
                        continue;
                    }
                    if let Some(track) = self.tracks.get_mut(&id) {
                        track.surface_mut().seek(window.local_time(t));
                    }
                }
            }
        }
    }

    pub fn toggle_mute(&mut self, project: &ProjectState) -> bool {
        self.muted = !self.muted;
        let muted = self.muted;
        for item in project.videos() {
            if let Some(track) = self.tracks.get_mut(&item.id) {
                let surface = track.surface_mut();
                surface.set_muted(muted);
                surface.set_volume(item.effective_volume(muted));
            }
        }
        info!("mute {}", if muted { "on" } else { "off" });
        muted
    }

    pub fn refresh_volume(&mut self, id: MediaId, project: &ProjectState) {
        let Some(item) = project.item(id) else {
            return;
        };
        if let Some(track) = self.tracks.get_mut(&id) {
            track.surface_mut().set_volume(item.effective_volume(self.muted));
        }
    }

    /// Applies every asynchronous event the surfaces produced since the last
    /// call. Runs every UI frame, in either state.
    pub fn pump_events(&mut self, project: &mut ProjectState) {
        for (id, track) in self.tracks.iter_mut() {
            while let Some(event) = track.surface_mut().poll_event() {
                match event {
                    SurfaceEvent::PlaySettled(result) => {
                        track.on_play_settled(result);
                        project.set_playing_flag(*id, track.is_playing());
                    }
                    SurfaceEvent::MetadataLoaded { duration } => {
                        project.apply_intrinsic_duration(*id, duration);
                    }
                }
            }
        }
    }

    fn video_plan(&self, project: &ProjectState) -> Vec<(MediaId, TimingWindow, f32)> {
        project
            .videos()
            .map(|m| (m.id, m.timing, m.effective_volume(self.muted)))
            .collect()
    }

    fn reconcile(&mut self, at: f64, project: &mut ProjectState) {
        let tolerance = self.config.drift_tolerance;
        for (id, window, volume) in self.video_plan(project) {
            let Some(track) = self.tracks.get_mut(&id) else {
                continue;
            };
            if window.contains(at) {
                let local = window.local_time(at);
                let surface = track.surface_mut();
                if (local - surface.current_time()).abs() > tolerance {
                    surface.seek(local);
                }
                surface.set_volume(volume);
                if !track.is_playing() {
                    track.request_play();
                }
            } else if track.is_playing() || !track.surface().is_paused() {
                track.request_pause();
            }
            project.set_playing_flag(id, track.is_playing());
        }
    }

    fn pause_all(&mut self, project: &mut ProjectState) {
        for (id, track) in self.tracks.iter_mut() {
            if track.needs_pause() {
                track.request_pause();
            }
            project.set_playing_flag(*id, track.is_playing());
        }
    }
}

impl<S: MediaSurface> Default for Synchronizer<S> {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use egui::{pos2, vec2};
    use storycut_state::item::{MediaItem, MediaKind, MediaSource};

    use super::*;
    use crate::fake::FakeSurface;
    use crate::surface::SurfaceError;

    fn video(start: f64, end: f64) -> MediaItem {
        MediaItem {
            id: MediaId::new(),
            kind: MediaKind::Video,
            source: MediaSource::new(PathBuf::from("clip.mp4"), "video/mp4"),
            position: pos2(50.0, 50.0),
            size: vec2(300.0, 200.0),
            timing: TimingWindow::new(start, end),
            volume: 0.8,
            intrinsic_duration: Some(end - start),
            is_playing: false,
        }
    }

    fn setup(windows: &[(f64, f64)]) -> (Synchronizer<FakeSurface>, ProjectState, Vec<MediaId>) {
        let mut project = ProjectState::default();
        let mut sync = Synchronizer::default();
        let ids = windows
            .iter()
            .map(|&(s, e)| {
                let id = project.insert(video(s, e));
                sync.attach(id, FakeSurface::default());
                id
            })
            .collect();
        (sync, project, ids)
    }

    fn settle_all(sync: &mut Synchronizer<FakeSurface>, project: &mut ProjectState, ok: bool) {
        for track in sync.tracks.values_mut() {
            let result = if ok {
                Ok(())
            } else {
                Err(SurfaceError::Rejected("blocked".into()))
            };
            track.surface_mut().settle(result);
        }
        sync.pump_events(project);
    }

    fn frame(sync: &mut Synchronizer<FakeSurface>, now: f64, project: &mut ProjectState) -> bool {
        match sync.scheduled_frame() {
            Some(token) => sync.run_frame(token, now, project),
            None => false,
        }
    }

    fn surface(sync: &Synchronizer<FakeSurface>, id: MediaId) -> &FakeSurface {
        sync.surface(id).unwrap()
    }

    #[test]
    fn overlapping_windows_follow_the_clock() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0), (5.0, 15.0)]);
        let (a, b) = (ids[0], ids[1]);

        sync.toggle_play(100.0, &mut project);
        assert_eq!(sync.track_state(a), Some(TrackState::PlayPending));
        assert_eq!(sync.track_state(b), Some(TrackState::Idle));
        settle_all(&mut sync, &mut project, true);

        assert!(frame(&mut sync, 107.0, &mut project));
        settle_all(&mut sync, &mut project, true);
        assert_eq!(sync.track_state(a), Some(TrackState::Playing));
        assert_eq!(sync.track_state(b), Some(TrackState::Playing));
        assert!(project.item(a).unwrap().is_playing);
        assert!(project.item(b).unwrap().is_playing);
        assert_eq!(surface(&sync, b).time, 2.0);

        assert!(frame(&mut sync, 112.0, &mut project));
        assert_eq!(sync.track_state(a), Some(TrackState::Paused));
        assert_eq!(sync.track_state(b), Some(TrackState::Playing));
        assert!(!project.item(a).unwrap().is_playing);
        assert!(surface(&sync, a).paused);
        assert!(!surface(&sync, b).paused);
    }

    #[test]
    fn toggle_pause_keeps_clock() {
        let (mut sync, mut project, _) = setup(&[(0.0, 30.0)]);
        sync.toggle_play(10.0, &mut project);
        settle_all(&mut sync, &mut project, true);
        frame(&mut sync, 14.0, &mut project);
        sync.toggle_play(14.5, &mut project);

        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert_eq!(sync.clock(), 4.0);
        assert_eq!(sync.scheduled_frame(), None);

        sync.toggle_play(50.0, &mut project);
        frame(&mut sync, 51.0, &mut project);
        assert_eq!(sync.clock(), 5.0);
    }

    #[test]
    fn pause_during_pending_play_is_deferred() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0)]);
        sync.toggle_play(0.0, &mut project);
        sync.toggle_play(0.1, &mut project);

        assert_eq!(sync.track_state(ids[0]), Some(TrackState::PausePending));
        assert_eq!(surface(&sync, ids[0]).pause_calls, 0);

        settle_all(&mut sync, &mut project, true);
        assert_eq!(sync.track_state(ids[0]), Some(TrackState::Paused));
        assert_eq!(surface(&sync, ids[0]).pause_calls, 1);
        assert_eq!(surface(&sync, ids[0]).unsafe_pauses, 0);
        assert!(!project.item(ids[0]).unwrap().is_playing);
    }

    #[test]
    fn rapid_toggling_never_pauses_unacknowledged_play() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 20.0), (0.0, 40.0)]);
        let mut now = 0.0;
        for step in 0..200 {
            now += 0.05;
            sync.toggle_play(now, &mut project);
            frame(&mut sync, now + 0.01, &mut project);
            if step % 3 == 0 {
                settle_all(&mut sync, &mut project, step % 6 == 0);
            }
        }
        settle_all(&mut sync, &mut project, true);

        for id in ids {
            let s = surface(&sync, id);
            assert_eq!(s.unsafe_pauses, 0);
            assert!(!sync.track_state(id).unwrap().play_in_flight());
        }
    }

    #[test]
    fn rejected_play_is_retried_next_frame() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0)]);
        sync.toggle_play(0.0, &mut project);
        settle_all(&mut sync, &mut project, false);
        assert_eq!(sync.track_state(ids[0]), Some(TrackState::Idle));
        assert!(!project.item(ids[0]).unwrap().is_playing);

        frame(&mut sync, 0.5, &mut project);
        assert_eq!(surface(&sync, ids[0]).play_calls, 2);
        assert_eq!(sync.track_state(ids[0]), Some(TrackState::PlayPending));
    }

    #[test]
    fn reset_rewinds_everything() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0), (2.0, 12.0)]);
        sync.toggle_play(0.0, &mut project);
        settle_all(&mut sync, &mut project, true);
        frame(&mut sync, 6.0, &mut project);

        sync.reset(&mut project);
        assert_eq!(sync.clock(), 0.0);
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert_eq!(sync.scheduled_frame(), None);
        for id in &ids {
            assert_eq!(surface(&sync, *id).time, 0.0);
        }

        sync.reset(&mut project);
        assert_eq!(sync.clock(), 0.0);
    }

    #[test]
    fn stale_ack_after_reset_keeps_media_paused() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0)]);
        sync.toggle_play(0.0, &mut project);
        sync.reset(&mut project);
        assert_eq!(sync.track_state(ids[0]), Some(TrackState::PausePending));

        settle_all(&mut sync, &mut project, true);
        assert_eq!(sync.track_state(ids[0]), Some(TrackState::Paused));
        assert!(surface(&sync, ids[0]).paused);
        assert!(!project.item(ids[0]).unwrap().is_playing);
        assert_eq!(sync.clock(), 0.0);
    }

    #[test]
    fn stale_frame_token_is_discarded() {
        let (mut sync, mut project, _) = setup(&[(0.0, 10.0)]);
        sync.toggle_play(0.0, &mut project);
        let token = sync.scheduled_frame().unwrap();
        sync.reset(&mut project);

        assert!(!sync.run_frame(token, 5.0, &mut project));
        assert_eq!(sync.clock(), 0.0);
        assert_eq!(sync.state(), PlaybackState::Stopped);
    }

    #[test]
    fn playback_stops_at_project_end() {
        let (mut sync, mut project, ids) = setup(&[(50.0, 60.0)]);
        sync.toggle_play(0.0, &mut project);
        frame(&mut sync, 55.0, &mut project);
        settle_all(&mut sync, &mut project, true);
        assert_eq!(sync.track_state(ids[0]), Some(TrackState::Playing));

        assert!(!frame(&mut sync, 61.0, &mut project));
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert_eq!(sync.clock(), 0.0);
        assert!(surface(&sync, ids[0]).paused);
        assert_eq!(surface(&sync, ids[0]).time, 0.0);
        assert_eq!(sync.scheduled_frame(), None);
    }

    #[test]
    fn mute_silences_without_touching_playback() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0), (0.0, 20.0)]);
        sync.toggle_play(0.0, &mut project);
        settle_all(&mut sync, &mut project, true);
        frame(&mut sync, 1.0, &mut project);
        assert_eq!(surface(&sync, ids[0]).volume, 0.8);

        assert!(sync.toggle_mute(&project));
        for id in &ids {
            let s = surface(&sync, *id);
            assert_eq!(s.volume, 0.0);
            assert!(s.muted);
            assert_eq!(sync.track_state(*id), Some(TrackState::Playing));
        }

        frame(&mut sync, 2.0, &mut project);
        assert_eq!(surface(&sync, ids[0]).volume, 0.0);

        assert!(!sync.toggle_mute(&project));
        assert_eq!(surface(&sync, ids[1]).volume, 0.8);
    }

    #[test]
    fn small_drift_is_tolerated() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0)]);
        sync.toggle_play(0.0, &mut project);
        settle_all(&mut sync, &mut project, true);

        sync.surface_mut(ids[0]).unwrap().time = 3.1;
        frame(&mut sync, 3.0, &mut project);
        assert_eq!(surface(&sync, ids[0]).time, 3.1);

        sync.surface_mut(ids[0]).unwrap().time = 3.5;
        frame(&mut sync, 4.0, &mut project);
        assert_eq!(surface(&sync, ids[0]).time, 4.0);
    }

    #[test]
    fn seek_while_stopped_positions_in_range_surfaces() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 10.0), (20.0, 30.0)]);
        sync.seek(25.0, 0.0, &mut project);
        assert_eq!(sync.clock(), 25.0);
        assert_eq!(surface(&sync, ids[1]).time, 5.0);
        assert!(surface(&sync, ids[0]).seeks.is_empty());

        sync.seek(500.0, 0.0, &mut project);
        assert_eq!(sync.clock(), project.duration());
    }

    #[test]
    fn metadata_event_updates_registry() {
        let (mut sync, mut project, ids) = setup(&[(0.0, 30.0)]);
        sync.surface_mut(ids[0])
            .unwrap()
            .events
            .push_back(SurfaceEvent::MetadataLoaded { duration: 75.0 });
        sync.pump_events(&mut project);

        assert_eq!(project.duration(), 75.0);
        assert_eq!(project.item(ids[0]).unwrap().timing, TimingWindow::new(0.0, 75.0));
    }

    #[test]
    fn side_table_follows_registry() {
        let (mut sync, project, ids) = setup(&[(0.0, 10.0)]);
        let stray = MediaId::new();
        sync.attach(stray, FakeSurface::default());
        sync.attach(ids[0], FakeSurface {
            volume: 0.3,
            ..FakeSurface::default()
        });
        assert_eq!(surface(&sync, ids[0]).volume, 1.0);

        sync.retain_registered(&project);
        assert!(sync.has_surface(ids[0]));
        assert!(!sync.has_surface(stray));
    }
}
