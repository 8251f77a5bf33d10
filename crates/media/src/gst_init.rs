use std::path::Path;
use std::sync::OnceLock;

use gstreamer as gst;

use crate::error::MediaError;

pub fn init_once() -> Result<(), MediaError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();
    INIT.get_or_init(|| gst::init().map_err(|e| e.to_string()))
        .clone()
        .map_err(MediaError::Init)
}

pub(crate) fn make_element(factory_name: &'static str) -> Result<gst::Element, MediaError> {
    gst::ElementFactory::make(factory_name)
        .build()
        .map_err(|e| MediaError::Element {
            name: factory_name,
            reason: e.to_string(),
        })
}

pub(crate) fn build_rgba_caps() -> gst::Caps {
    use gstreamer_video as gst_video;
    gst_video::VideoCapsBuilder::new()
        .format(gst_video::VideoFormat::Rgba)
        .build()
}

pub(crate) fn file_uri(path: &Path) -> Result<String, MediaError> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|_| MediaError::InvalidPath(path.to_path_buf()))?
            .join(path)
    };
    gst::glib::filename_to_uri(&abs, None)
        .map(|uri| uri.to_string())
        .map_err(|_| MediaError::InvalidPath(abs))
}

pub(crate) fn seconds(t: gst::ClockTime) -> f64 {
    t.nseconds() as f64 / 1_000_000_000.0
}

pub(crate) fn clock_time(seconds: f64) -> gst::ClockTime {
    gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64)
}
