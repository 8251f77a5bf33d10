use egui::{pos2, vec2, Pos2, Vec2};
use log::{info, warn};

use crate::item::{MediaId, MediaItem, MediaKind, MediaSource, TimingWindow};
use crate::project::{AppState, MIN_INTRINSIC_DURATION};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestDefaults {
    pub image_duration: f64,
    pub probe_fallback_duration: f64,
    pub position: Pos2,
    pub video_size: Vec2,
    pub image_size: Vec2,
}

impl Default for IngestDefaults {
    fn default() -> Self {
        Self {
            image_duration: 10.0,
            probe_fallback_duration: 30.0,
            position: pos2(50.0, 50.0),
            video_size: vec2(300.0, 200.0),
            image_size: vec2(300.0, 300.0),
        }
    }
}

/// What the duration probe reported for a video.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Duration(f64),
    Failed(String),
}

impl IngestDefaults {
    fn resolve_duration(&self, kind: MediaKind, probe: Option<&ProbeOutcome>) -> f64 {
        match (kind, probe) {
            (MediaKind::Image, _) => self.image_duration,
            (MediaKind::Video, Some(ProbeOutcome::Duration(d)))
                if d.is_finite() && *d >= MIN_INTRINSIC_DURATION =>
            {
                *d
            }
            (MediaKind::Video, Some(ProbeOutcome::Failed(reason))) => {
                warn!(
                    "duration probe failed ({reason}), assuming {}s",
                    self.probe_fallback_duration
                );
                self.probe_fallback_duration
            }
            (MediaKind::Video, _) => {
                warn!("no usable duration, assuming {}s", self.probe_fallback_duration);
                self.probe_fallback_duration
            }
        }
    }

    pub fn build_item(&self, source: MediaSource, probe: Option<&ProbeOutcome>) -> MediaItem {
        let kind = MediaKind::from_content_type(&source.content_type);
        let duration = self.resolve_duration(kind, probe);
        MediaItem {
            id: MediaId::new(),
            kind,
            source,
            position: self.position,
            size: match kind {
                MediaKind::Video => self.video_size,
                MediaKind::Image => self.image_size,
            },
            timing: TimingWindow::new(0.0, duration),
            volume: 1.0,
            intrinsic_duration: match kind {
                MediaKind::Video => Some(duration),
                MediaKind::Image => None,
            },
            is_playing: false,
        }
    }
}

impl AppState {
    /// Adds a freshly ingested file to the registry and selects it.
    pub fn ingest(
        &mut self,
        defaults: &IngestDefaults,
        source: MediaSource,
        probe: Option<&ProbeOutcome>,
    ) -> MediaId {
        let item = defaults.build_item(source, probe);
        let name = item.display_name();
        let id = self.project.insert(item);
        self.ui.selection.select(id);
        self.ui.upload_dialog_open = false;
        info!("added {name} as {id}");
        id
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::item::TimingWindow;

    fn source(name: &str, content_type: &str) -> MediaSource {
        MediaSource::new(PathBuf::from(name), content_type)
    }

    #[test]
    fn short_video_keeps_project_duration() {
        let mut state = AppState::default();
        let defaults = IngestDefaults::default();
        let id = state.ingest(
            &defaults,
            source("a.mp4", "video/mp4"),
            Some(&ProbeOutcome::Duration(45.0)),
        );

        assert_eq!(state.project.duration(), 60.0);
        let item = state.project.item(id).unwrap();
        assert_eq!(item.timing, TimingWindow::new(0.0, 45.0));
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(state.ui.selection.selected, Some(id));
    }

    #[test]
    fn long_video_extends_project_duration() {
        let mut state = AppState::default();
        let defaults = IngestDefaults::default();
        let id = state.ingest(
            &defaults,
            source("b.mov", "video/quicktime"),
            Some(&ProbeOutcome::Duration(90.0)),
        );

        assert_eq!(state.project.duration(), 90.0);
        assert_eq!(state.project.item(id).unwrap().timing, TimingWindow::new(0.0, 90.0));
    }

    #[test]
    fn fractional_duration_rounds_project_up() {
        let mut state = AppState::default();
        let id = state.ingest(
            &IngestDefaults::default(),
            source("c.webm", "video/webm"),
            Some(&ProbeOutcome::Duration(61.2)),
        );
        assert_eq!(state.project.duration(), 62.0);
        assert_eq!(state.project.item(id).unwrap().timing.end, 61.2);
    }

    #[test]
    fn failed_probe_falls_back() {
        let mut state = AppState::default();
        let id = state.ingest(
            &IngestDefaults::default(),
            source("broken.mp4", "video/mp4"),
            Some(&ProbeOutcome::Failed("no decoder".into())),
        );
        let item = state.project.item(id).unwrap();
        assert_eq!(item.timing, TimingWindow::new(0.0, 30.0));
        assert_eq!(item.intrinsic_duration, Some(30.0));
    }

    #[test]
    fn vanishing_reported_duration_falls_back() {
        let mut state = AppState::default();
        let id = state.ingest(
            &IngestDefaults::default(),
            source("blip.mp4", "video/mp4"),
            Some(&ProbeOutcome::Duration(1e-18)),
        );
        let item = state.project.item(id).unwrap();
        assert_eq!(item.timing, TimingWindow::new(0.0, 30.0));
        assert_eq!(item.intrinsic_duration, Some(30.0));
    }

    #[test]
    fn images_get_fixed_duration_and_square_size() {
        let mut state = AppState::default();
        let id = state.ingest(&IngestDefaults::default(), source("still.png", "image/png"), None);
        let item = state.project.item(id).unwrap();
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.timing, TimingWindow::new(0.0, 10.0));
        assert_eq!(item.size, vec2(300.0, 300.0));
        assert_eq!(item.position, pos2(50.0, 50.0));
        assert_eq!(item.intrinsic_duration, None);
    }
}
