pub mod cli;
pub mod config;
pub mod import;
pub mod keyboard;
pub mod playback;
pub mod texture_cache;

use std::sync::mpsc;

use storycut_media::VideoSurface;
use storycut_playback::Synchronizer;
use storycut_state::ingest::IngestDefaults;
use storycut_state::item::MediaId;
use storycut_state::project::AppState;
use storycut_ui::UiAction;

use crate::config::EditorConfig;
use crate::import::ProbeResult;
use crate::texture_cache::TextureCache;

type StillResult = (MediaId, Result<image::RgbaImage, String>);

pub struct EditorApp {
    state: AppState,
    config: EditorConfig,
    ingest_defaults: IngestDefaults,
    sync: Synchronizer<VideoSurface>,
    textures: TextureCache,
    pending_probe: Option<String>,
    probe_tx: mpsc::Sender<ProbeResult>,
    probe_rx: mpsc::Receiver<ProbeResult>,
    still_tx: mpsc::Sender<StillResult>,
    still_rx: mpsc::Receiver<StillResult>,
}

impl EditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        storycut_ui::theme::apply_theme(&cc.egui_ctx);
        let (probe_tx, probe_rx) = mpsc::channel();
        let (still_tx, still_rx) = mpsc::channel();

        Self {
            state: AppState::new(config.project()),
            ingest_defaults: config.ingest_defaults(),
            sync: Synchronizer::new(config.sync_config()),
            config,
            textures: TextureCache::default(),
            pending_probe: None,
            probe_tx,
            probe_rx,
            still_tx,
            still_rx,
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.poll_import_tasks(ctx);

        let mut actions: Vec<UiAction> = Vec::new();
        actions.extend(keyboard::handle_keyboard(ctx));

        let playback = self.playback_view();
        let duration = self.state.project.duration();

        egui::SidePanel::left("properties_panel")
            .resizable(true)
            .default_width(storycut_ui::constants::PROPERTIES_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    actions.extend(storycut_ui::properties::properties_panel(ui, &mut self.state));
                });
            });

        egui::TopBottomPanel::bottom("timeline_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                actions.extend(storycut_ui::transport::transport_bar(ui, playback, duration));
                ui.add_space(4.0);
                actions.extend(storycut_ui::timeline::timeline_strip(
                    ui,
                    &mut self.state,
                    playback,
                ));
                ui.add_space(4.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            storycut_ui::canvas::canvas_panel(ui, &mut self.state, playback, &self.textures);
        });

        let extensions: Vec<&str> = storycut_media::import::VIDEO_EXTENSIONS
            .iter()
            .chain(storycut_media::import::IMAGE_EXTENSIONS)
            .copied()
            .collect();
        actions.extend(storycut_ui::upload::upload_dialog(
            ctx,
            &mut self.state,
            &extensions,
        ));

        for action in actions {
            self.apply_action(action, now);
        }
        self.drive_playback(ctx, now);
    }
}
