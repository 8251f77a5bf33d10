use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use egui::{pos2, vec2};
use serde::{Deserialize, Serialize};
use storycut_playback::SyncConfig;
use storycut_state::ingest::IngestDefaults;
use storycut_state::project::{ProjectState, MIN_INTRINSIC_DURATION};

use crate::cli::Args;

/// Upper bound for any configured duration: one day.
const MAX_DURATION_SECS: f64 = 86_400.0;
const MAX_PROBE_TIMEOUT_SECS: f64 = 3_600.0;
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Startup settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: [f32; 2],
    pub project_duration: f64,
    pub drift_tolerance: f64,
    pub image_duration: f64,
    pub probe_fallback_duration: f64,
    pub probe_timeout_secs: f64,
    pub default_position: [f32; 2],
    pub video_size: [f32; 2],
    pub image_size: [f32; 2],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: [1280.0, 720.0],
            project_duration: 60.0,
            drift_tolerance: storycut_playback::sync::DEFAULT_DRIFT_TOLERANCE,
            image_duration: 10.0,
            probe_fallback_duration: 30.0,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS as f64,
            default_position: [50.0, 50.0],
            video_size: [300.0, 200.0],
            image_size: [300.0, 300.0],
        }
    }
}

impl EditorConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config file (if any) with command line flags applied on top.
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(duration) = args.duration {
            config.project_duration = duration;
        }
        if let Some((w, h)) = args.canvas {
            config.canvas = [w, h];
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let [w, h] = self.canvas;
        ensure!(
            w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0,
            "canvas must be positive and finite, got {w}x{h}"
        );
        within("project duration", self.project_duration, 1.0, MAX_DURATION_SECS)?;
        within("drift tolerance", self.drift_tolerance, f64::MIN_POSITIVE, 10.0)?;
        within(
            "image duration",
            self.image_duration,
            MIN_INTRINSIC_DURATION,
            MAX_DURATION_SECS,
        )?;
        within(
            "probe fallback duration",
            self.probe_fallback_duration,
            MIN_INTRINSIC_DURATION,
            MAX_DURATION_SECS,
        )?;
        within("probe timeout", self.probe_timeout_secs, 0.1, MAX_PROBE_TIMEOUT_SECS)?;
        for (name, [x, y]) in [
            ("default position", self.default_position),
            ("video size", self.video_size),
            ("image size", self.image_size),
        ] {
            ensure!(x.is_finite() && y.is_finite(), "{name} must be finite, got [{x}, {y}]");
        }
        Ok(())
    }

    pub fn project(&self) -> ProjectState {
        ProjectState::new(vec2(self.canvas[0], self.canvas[1]), self.project_duration)
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            drift_tolerance: self.drift_tolerance,
        }
    }

    pub fn ingest_defaults(&self) -> IngestDefaults {
        IngestDefaults {
            image_duration: self.image_duration,
            probe_fallback_duration: self.probe_fallback_duration,
            position: pos2(self.default_position[0], self.default_position[1]),
            video_size: vec2(self.video_size[0], self.video_size[1]),
            image_size: vec2(self.image_size[0], self.image_size[1]),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        let secs = self.probe_timeout_secs;
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f64(secs.min(MAX_PROBE_TIMEOUT_SECS))
        } else {
            Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS)
        }
    }
}

fn within(name: &str, value: f64, min: f64, max: f64) -> anyhow::Result<()> {
    ensure!(
        value.is_finite() && (min..=max).contains(&value),
        "{name} must be between {min} and {max}, got {value}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_match_ingest_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.ingest_defaults(), IngestDefaults::default());
        assert_eq!(config.sync_config(), SyncConfig::default());
        assert_eq!(config.project().duration(), 60.0);
        assert_eq!(config.project().canvas(), vec2(1280.0, 720.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "project_duration": 120, "canvas": [800, 600] }"#).unwrap();
        assert_eq!(config.project_duration, 120.0);
        assert_eq!(config.canvas, [800.0, 600.0]);
        assert_eq!(config.image_duration, 10.0);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["storycut", "--duration", "15", "--canvas", "640x360"]);
        let config = EditorConfig::resolve(&args).unwrap();
        assert_eq!(config.project_duration, 15.0);
        assert_eq!(config.canvas, [640.0, 360.0]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let args = Args::parse_from(["storycut", "--duration", "0.5"]);
        assert!(EditorConfig::resolve(&args).is_err());

        let args = Args::parse_from(["storycut", "--duration", "inf"]);
        assert!(EditorConfig::resolve(&args).is_err());

        let args = Args::parse_from(["storycut", "--config", "/nonexistent/storycut.json"]);
        let err = EditorConfig::resolve(&args).unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }

    #[test]
    fn oversized_timeout_is_rejected() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "probe_timeout_secs": 1e300 }"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("probe timeout"));
        assert_eq!(config.probe_timeout(), Duration::from_secs(3_600));

        let config = EditorConfig {
            probe_timeout_secs: f64::NAN,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.probe_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let config = EditorConfig {
            drift_tolerance: f64::INFINITY,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EditorConfig {
            image_size: [f32::NAN, 300.0],
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EditorConfig {
            canvas: [f32::INFINITY, 720.0],
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
