use crate::item::MediaId;
use crate::project::ProjectState;

pub const MARKER_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMarker {
    pub seconds: f64,
    pub fraction: f32,
}

/// An item's window mapped onto the scrub strip, as fractions of its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineBar {
    pub id: MediaId,
    pub left: f32,
    pub width: f32,
}

impl TimelineBar {
    pub fn contains(&self, fraction: f32) -> bool {
        fraction >= self.left && fraction <= self.left + self.width
    }
}

/// `MARKER_COUNT + 1` evenly spaced labels, `ceil(duration / MARKER_COUNT)`
/// seconds apart. With a duration that is not a multiple of the count the
/// last markers can fall past the end of the strip.
pub fn time_markers(duration: f64) -> Vec<TimeMarker> {
    let interval = (duration / MARKER_COUNT as f64).ceil().max(1.0);
    (0..=MARKER_COUNT)
        .map(|i| {
            let seconds = i as f64 * interval;
            TimeMarker {
                seconds,
                fraction: fraction_of(seconds, duration),
            }
        })
        .collect()
}

pub fn bars(project: &ProjectState) -> Vec<TimelineBar> {
    let duration = project.duration();
    project
        .items()
        .iter()
        .map(|m| TimelineBar {
            id: m.id,
            left: fraction_of(m.timing.start, duration),
            width: fraction_of(m.timing.len(), duration),
        })
        .collect()
}

pub fn playhead_fraction(clock: f64, duration: f64) -> f32 {
    fraction_of(clock, duration).clamp(0.0, 1.0)
}

pub fn time_at_fraction(fraction: f32, duration: f64) -> f64 {
    (fraction.clamp(0.0, 1.0) as f64 * duration).clamp(0.0, duration)
}

/// Bar under `fraction`; later items are drawn on top and win.
pub fn bar_at(bars: &[TimelineBar], fraction: f32) -> Option<MediaId> {
    bars.iter().rev().find(|b| b.contains(fraction)).map(|b| b.id)
}

fn fraction_of(seconds: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    (seconds / duration) as f32
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use egui::{pos2, vec2};

    use super::*;
    use crate::item::{MediaItem, MediaKind, MediaSource, TimingWindow};

    fn image(start: f64, end: f64) -> MediaItem {
        MediaItem {
            id: MediaId::new(),
            kind: MediaKind::Image,
            source: MediaSource::new(PathBuf::from("still.png"), "image/png"),
            position: pos2(50.0, 50.0),
            size: vec2(300.0, 300.0),
            timing: TimingWindow::new(start, end),
            volume: 1.0,
            intrinsic_duration: None,
            is_playing: false,
        }
    }

    #[test]
    fn markers_for_default_duration() {
        let markers = time_markers(60.0);
        let seconds: Vec<f64> = markers.iter().map(|m| m.seconds).collect();
        assert_eq!(seconds, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(markers[3].fraction, 0.5);
    }

    #[test]
    fn markers_round_spacing_up() {
        let markers = time_markers(91.0);
        assert_eq!(markers.len(), MARKER_COUNT + 1);
        assert_eq!(markers[1].seconds, 16.0);
        assert_eq!(markers[6].seconds, 96.0);
    }

    #[test]
    fn bars_map_windows_to_fractions() {
        let mut project = ProjectState::default();
        let a = project.insert(image(0.0, 10.0));
        let b = project.insert(image(30.0, 60.0));
        let bars = bars(&project);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].left, 0.5);
        assert_eq!(bars[1].width, 0.5);
        assert_eq!(bar_at(&bars, 0.1), Some(a));
        assert_eq!(bar_at(&bars, 0.75), Some(b));
        assert_eq!(bar_at(&bars, 0.3), None);
    }

    #[test]
    fn playhead_and_scrub_conversions() {
        assert_eq!(playhead_fraction(15.0, 60.0), 0.25);
        assert_eq!(playhead_fraction(90.0, 60.0), 1.0);
        assert_eq!(time_at_fraction(0.5, 60.0), 30.0);
        assert_eq!(time_at_fraction(-1.0, 60.0), 0.0);
    }
}
