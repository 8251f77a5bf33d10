use std::path::Path;

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use log::{debug, warn};
use storycut_playback::{MediaSurface, SurfaceError, SurfaceEvent};

use crate::bus::{BusSignal, SurfaceStatus};
use crate::error::MediaError;
use crate::gst_init::{build_rgba_caps, clock_time, file_uri, init_once, make_element, seconds};

/// A video frame converted to tightly packed RGBA.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub pts_seconds: f64,
    pub width: u32,
    pub height: u32,
    pub rgba_data: Vec<u8>,
}

/// One video on the canvas, backed by a `playbin` whose frames land in an
/// RGBA appsink. State changes are asynchronous: `play()` only starts the
/// transition and the bus reports when it actually happened.
pub struct VideoSurface {
    playbin: gst::Element,
    appsink: gst_app::AppSink,
    bus: gst::Bus,
    status: SurfaceStatus,
    preroll_shown: bool,
}

impl VideoSurface {
    pub fn open(path: &Path) -> Result<Self, MediaError> {
        init_once()?;
        let uri = file_uri(path)?;

        let appsink = gst_app::AppSink::builder()
            .caps(&build_rgba_caps())
            .max_buffers(1)
            .drop(true)
            .build();

        let playbin = make_element("playbin")?;
        playbin.set_property("uri", uri.as_str());
        playbin.set_property("video-sink", appsink.clone().upcast::<gst::Element>());

        let bus = playbin
            .bus()
            .ok_or_else(|| MediaError::StateChange("playbin has no bus".into()))?;

        if let Err(e) = playbin.set_state(gst::State::Paused) {
            let _ = playbin.set_state(gst::State::Null);
            return Err(MediaError::StateChange(format!("{}: {e}", path.display())));
        }
        debug!("opened surface for {uri}");

        Ok(Self {
            playbin,
            appsink,
            bus,
            status: SurfaceStatus::default(),
            preroll_shown: false,
        })
    }

    /// Newest decoded frame, if one arrived since the last call.
    pub fn latest_frame(&mut self) -> Option<DecodedFrame> {
        let sample = if self.status.is_paused() {
            if self.preroll_shown {
                return None;
            }
            let sample = self.appsink.try_pull_preroll(gst::ClockTime::ZERO)?;
            self.preroll_shown = true;
            sample
        } else {
            self.appsink.try_pull_sample(gst::ClockTime::ZERO)?
        };
        frame_from_sample(&sample)
    }

    fn drain_bus(&mut self) {
        while let Some(msg) = self.bus.pop() {
            if let Some(signal) = self.classify(&msg) {
                self.status.apply(signal);
            }
        }
    }

    fn classify(&self, msg: &gst::Message) -> Option<BusSignal> {
        match msg.view() {
            gst::MessageView::StateChanged(sc) => {
                let from_playbin = msg
                    .src()
                    .is_some_and(|src| src == self.playbin.upcast_ref::<gst::Object>());
                (from_playbin && sc.current() == gst::State::Playing).then_some(BusSignal::Playing)
            }
            gst::MessageView::AsyncDone(_) | gst::MessageView::DurationChanged(_) => {
                let duration = self.playbin.query_duration::<gst::ClockTime>().map(seconds);
                Some(BusSignal::DurationChanged(duration))
            }
            gst::MessageView::Eos(_) => Some(BusSignal::EndOfStream),
            gst::MessageView::Error(err) => Some(BusSignal::Failed(err.error().to_string())),
            _ => None,
        }
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<DecodedFrame> {
    let caps = sample.caps()?;
    let info = gst_video::VideoInfo::from_caps(caps).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;
    let data = map.as_slice();

    let width = info.width() as usize;
    let height = info.height() as usize;
    let stride = info.stride()[0] as usize;
    let row = width * 4;
    if stride < row || data.len() < stride * height.saturating_sub(1) + row {
        return None;
    }

    let mut rgba_data = Vec::with_capacity(row * height);
    for y in 0..height {
        rgba_data.extend_from_slice(&data[y * stride..y * stride + row]);
    }

    Some(DecodedFrame {
        pts_seconds: buffer.pts().map(seconds).unwrap_or(0.0),
        width: info.width(),
        height: info.height(),
        rgba_data,
    })
}

impl MediaSurface for VideoSurface {
    fn play(&mut self) -> Result<(), SurfaceError> {
        match self.playbin.set_state(gst::State::Playing) {
            Ok(gst::StateChangeSuccess::Async) => self.status.begin_play(false),
            Ok(_) => self.status.begin_play(true),
            Err(e) => return Err(SurfaceError::Rejected(e.to_string())),
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Paused) {
            warn!("video surface: pause failed: {e}");
        }
        self.status.mark_paused();
    }

    fn is_paused(&self) -> bool {
        self.status.is_paused()
    }

    fn current_time(&self) -> f64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(seconds)
            .unwrap_or(0.0)
    }

    fn seek(&mut self, t: f64) {
        let flags = gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE;
        if let Err(e) = self.playbin.seek_simple(flags, clock_time(t)) {
            debug!("seek to {t:.2}s refused: {e}");
        }
        self.preroll_shown = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.playbin
            .set_property("volume", f64::from(volume.clamp(0.0, 1.0)));
    }

    fn set_muted(&mut self, muted: bool) {
        self.playbin.set_property("mute", muted);
    }

    fn poll_event(&mut self) -> Option<SurfaceEvent> {
        if !self.status.has_events() {
            self.drain_bus();
        }
        self.status.next_event()
    }
}

impl Drop for VideoSurface {
    fn drop(&mut self) {
        let _ = self.playbin.set_state(gst::State::Null);
    }
}
