use storycut_state::format::format_time;

use crate::constants;
use crate::theme;
use crate::{PlaybackView, UiAction};

pub fn transport_bar(ui: &mut egui::Ui, playback: PlaybackView, duration: f64) -> Option<UiAction> {
    let mut action = None;
    let btn = constants::TRANSPORT_BTN_SIZE;

    ui.horizontal(|ui| {
        if ui
            .add_sized(btn, egui::Button::new("\u{23F9}"))
            .on_hover_text("Reset")
            .clicked()
        {
            action = Some(UiAction::Reset);
        }

        let play_label = if playback.playing { "\u{23F8}" } else { "\u{25B6}" };
        if ui
            .add_sized(btn, egui::Button::new(play_label))
            .on_hover_text(if playback.playing { "Pause" } else { "Play" })
            .clicked()
        {
            action = Some(UiAction::TogglePlay);
        }

        let mute_label = if playback.muted { "\u{1F507}" } else { "\u{1F50A}" };
        if ui
            .add_sized(btn, egui::Button::new(mute_label))
            .on_hover_text(if playback.muted { "Unmute" } else { "Mute" })
            .clicked()
        {
            action = Some(UiAction::ToggleMute);
        }

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!(
                "{} / {}",
                format_time(playback.clock),
                format_time(duration)
            ))
            .font(egui::FontId::monospace(12.0))
            .color(theme::TEXT_PRIMARY),
        );
    });

    action
}
