use std::path::PathBuf;

use log::debug;
use storycut_state::project::AppState;

use crate::theme;
use crate::UiAction;

/// Modal-style window offering a single-file picker. `extensions` limits
/// what the native dialog lists.
pub fn upload_dialog(
    ctx: &egui::Context,
    state: &mut AppState,
    extensions: &[&str],
) -> Option<UiAction> {
    if !state.ui.upload_dialog_open {
        return None;
    }

    let mut open = true;
    let mut picked: Option<PathBuf> = None;

    egui::Window::new("Upload Media")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.set_min_width(360.0);
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Upload a file").size(16.0));
                ui.colored_label(theme::TEXT_DIM, "One image or video at a time");
                ui.add_space(8.0);
                if ui.button("Choose file\u{2026}").clicked() {
                    picked = rfd::FileDialog::new()
                        .set_title("Add media")
                        .add_filter("Images and videos", extensions)
                        .pick_file();
                }
                if let Some(status) = &state.ui.status {
                    ui.add_space(6.0);
                    ui.colored_label(theme::TEXT_DIM, status.as_str());
                }
                ui.add_space(12.0);
            });
        });

    if !open {
        state.ui.upload_dialog_open = false;
    }
    picked.map(|path| {
        debug!("picked {}", path.display());
        UiAction::Upload(path)
    })
}
