use std::time::Duration;

use log::debug;
use storycut_ui::{PlaybackView, UiAction};

use crate::EditorApp;

/// How often a stopped editor wakes up to collect prerolled frames and
/// metadata from its surfaces.
const IDLE_POLL: Duration = Duration::from_millis(100);

impl EditorApp {
    pub fn playback_view(&self) -> PlaybackView {
        PlaybackView {
            clock: self.sync.clock(),
            playing: self.sync.is_playing(),
            muted: self.sync.muted(),
        }
    }

    pub fn apply_action(&mut self, action: UiAction, now: f64) {
        let project = &mut self.state.project;
        match action {
            UiAction::TogglePlay => self.sync.toggle_play(now, project),
            UiAction::Reset => self.sync.reset(project),
            UiAction::ToggleMute => {
                self.sync.toggle_mute(project);
            }
            UiAction::Seek(t) => self.sync.seek(t, now, project),
            UiAction::VolumeChanged(id) => self.sync.refresh_volume(id, project),
            UiAction::DurationChanged => {
                let duration = project.duration();
                if self.sync.clock() > duration {
                    debug!("clock past new duration, clamping to {duration:.1}s");
                    self.sync.seek(duration, now, project);
                }
            }
            UiAction::Upload(path) => self.upload_file(path),
        }
    }

    /// Per-frame playback work: surface events, the scheduled frame, and
    /// fresh pictures for every video.
    pub fn drive_playback(&mut self, ctx: &egui::Context, now: f64) {
        self.sync.retain_registered(&self.state.project);
        self.textures.retain_registered(&self.state.project);
        self.sync.pump_events(&mut self.state.project);

        if let Some(token) = self.sync.scheduled_frame() {
            self.sync.run_frame(token, now, &mut self.state.project);
        }

        let videos: Vec<_> = self.state.project.videos().map(|m| m.id).collect();
        for id in videos {
            let frame = self.sync.surface_mut(id).and_then(|s| s.latest_frame());
            if let Some(frame) = frame {
                self.textures.update_item_texture(
                    ctx,
                    id,
                    frame.width as usize,
                    frame.height as usize,
                    &frame.rgba_data,
                );
            }
        }

        if self.sync.is_playing() {
            ctx.request_repaint();
        } else if !self.state.project.is_empty() {
            ctx.request_repaint_after(IDLE_POLL);
        }
    }
}
