use std::path::Path;
use std::time::Duration;

use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use log::debug;

use crate::error::MediaError;
use crate::gst_init::{file_uri, init_once, seconds};

/// Playable length of a video in seconds, as reported by the discoverer.
pub fn probe_duration(path: &Path, timeout: Duration) -> Result<f64, MediaError> {
    init_once()?;
    let uri = file_uri(path)?;

    let discoverer =
        gst_pbutils::Discoverer::new(gst::ClockTime::from_mseconds(timeout.as_millis() as u64))
            .map_err(|e| MediaError::Probe(e.to_string()))?;
    let info = discoverer
        .discover_uri(&uri)
        .map_err(|e| MediaError::Probe(e.to_string()))?;

    if info.video_streams().is_empty() {
        return Err(MediaError::Probe(format!("{} has no video stream", path.display())));
    }

    let duration = info
        .duration()
        .map(seconds)
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| MediaError::Probe(format!("{} reports no duration", path.display())))?;
    debug!("probed {}: {duration:.2}s", path.display());
    Ok(duration)
}
