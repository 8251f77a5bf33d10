use clap::Parser;
use log::{debug, info, warn};
use storycut_app::cli::Args;
use storycut_app::config::EditorConfig;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .filter_module("egui", log::LevelFilter::Info)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .init();
    debug!("command-line args: {args:?}");

    let config = EditorConfig::resolve(&args)?;
    info!(
        "canvas {}x{}, project {}s",
        config.canvas[0], config.canvas[1], config.project_duration
    );

    if let Err(e) = storycut_media::gst_init::init_once() {
        warn!("{e}; videos will not play");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Storycut"),
        vsync: true,
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Storycut",
        options,
        Box::new(move |cc| Ok(Box::new(storycut_app::EditorApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))
}
