use std::path::PathBuf;

use log::{info, warn};
use storycut_media::import::{content_type_for, is_video_content_type};
use storycut_media::VideoSurface;
use storycut_state::ingest::ProbeOutcome;
use storycut_state::item::{MediaId, MediaSource};

use crate::EditorApp;

/// Result of a background duration probe, handed back to the UI thread.
pub struct ProbeResult {
    pub source: MediaSource,
    pub outcome: ProbeOutcome,
}

impl EditorApp {
    /// Starts ingesting one picked file. Images are registered at once;
    /// videos are registered when their probe comes back.
    pub fn upload_file(&mut self, path: PathBuf) {
        if let Some(pending) = &self.pending_probe {
            self.state.ui.status = Some(format!("Still reading {pending}, try again shortly"));
            return;
        }
        let Some(content_type) = content_type_for(&path) else {
            warn!("refusing {}: unsupported file type", path.display());
            self.state.ui.status = Some(format!(
                "Unsupported file type: {}",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            ));
            return;
        };
        let source = MediaSource::new(path.clone(), content_type);

        if !is_video_content_type(content_type) {
            self.state.ui.status = None;
            let id = self.state.ingest(&self.ingest_defaults, source, None);
            self.decode_still(id, path);
            return;
        }

        let name = source.filename();
        self.state.ui.status = Some(format!("Reading {name}\u{2026}"));
        self.pending_probe = Some(name);

        let tx = self.probe_tx.clone();
        let timeout = self.config.probe_timeout();
        std::thread::spawn(move || {
            let outcome = match storycut_media::probe_duration(&path, timeout) {
                Ok(duration) => ProbeOutcome::Duration(duration),
                Err(e) => ProbeOutcome::Failed(e.to_string()),
            };
            let _ = tx.send(ProbeResult { source, outcome });
        });
    }

    fn decode_still(&mut self, id: MediaId, path: PathBuf) {
        self.textures.mark_pending(id);
        let tx = self.still_tx.clone();
        std::thread::spawn(move || {
            let decoded = storycut_media::decode_still(&path).map_err(|e| e.to_string());
            let _ = tx.send((id, decoded));
        });
    }

    pub fn poll_import_tasks(&mut self, ctx: &egui::Context) {
        let mut received = false;

        while let Ok(result) = self.probe_rx.try_recv() {
            self.pending_probe = None;
            self.state.ui.status = None;
            let path = result.source.path.clone();
            let id = self
                .state
                .ingest(&self.ingest_defaults, result.source, Some(&result.outcome));
            match VideoSurface::open(&path) {
                Ok(surface) => {
                    self.textures.mark_pending(id);
                    self.sync.attach(id, surface);
                }
                Err(e) => {
                    warn!("{id}: cannot open {}: {e}", path.display());
                    self.state.ui.status = Some(format!("Cannot play {}", path.display()));
                }
            }
            received = true;
        }

        while let Ok((id, decoded)) = self.still_rx.try_recv() {
            match decoded {
                Ok(img) if self.state.project.contains(id) => {
                    self.textures.update_item_texture(
                        ctx,
                        id,
                        img.width() as usize,
                        img.height() as usize,
                        img.as_raw(),
                    );
                    info!("{id}: still decoded ({}x{})", img.width(), img.height());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("{id}: {e}");
                    self.textures.clear_pending(id);
                }
            }
            received = true;
        }

        if received {
            ctx.request_repaint();
        }
    }
}
