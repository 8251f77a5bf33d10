use storycut_state::format::format_time;
use storycut_state::item::MediaKind;
use storycut_state::project::{AppState, MIN_PROJECT_DURATION};

use crate::theme;
use crate::UiAction;

pub fn properties_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<UiAction> {
    let mut action = None;

    ui.heading("Properties");
    ui.separator();

    match state.selected_item().map(|m| m.id) {
        Some(id) => {
            if let Some(a) = item_properties(ui, state, id) {
                action = Some(a);
            }
        }
        None => {
            ui.colored_label(theme::TEXT_DIM, "Select an item on the canvas or timeline");
        }
    }

    ui.separator();
    if let Some(a) = project_settings(ui, state) {
        action = Some(a);
    }

    ui.add_space(8.0);
    if ui
        .add_sized([ui.available_width(), 28.0], egui::Button::new("Add Media"))
        .clicked()
    {
        state.ui.upload_dialog_open = true;
    }
    if let Some(status) = &state.ui.status {
        ui.add_space(4.0);
        ui.colored_label(theme::TEXT_DIM, status.as_str());
    }

    action
}

fn item_properties(
    ui: &mut egui::Ui,
    state: &mut AppState,
    id: storycut_state::item::MediaId,
) -> Option<UiAction> {
    let item = state.project.item(id)?.clone();
    let canvas = state.project.canvas();
    let mut action = None;

    ui.label(egui::RichText::new(item.display_name()).strong());
    ui.colored_label(
        theme::TEXT_DIM,
        format!("{} \u{00B7} {}", item.kind.label(), item.source.content_type),
    );
    ui.add_space(6.0);

    ui.label("Dimensions");
    let mut width = item.size.x;
    let mut height = item.size.y;
    let mut changed = false;
    egui::Grid::new("dimensions").num_columns(2).show(ui, |ui| {
        ui.label("Width");
        changed |= ui
            .add(
                egui::DragValue::new(&mut width)
                    .range(0.0..=canvas.x)
                    .suffix(" px"),
            )
            .changed();
        ui.end_row();
        ui.label("Height");
        changed |= ui
            .add(
                egui::DragValue::new(&mut height)
                    .range(0.0..=canvas.y)
                    .suffix(" px"),
            )
            .changed();
        ui.end_row();
    });
    if changed {
        state.project.set_size(id, egui::vec2(width, height));
    }

    ui.add_space(6.0);
    ui.label("Timing");
    let duration = state.project.duration();
    let mut start = item.timing.start;
    let mut end = item.timing.end;
    let mut timing_changed = false;
    egui::Grid::new("timing").num_columns(2).show(ui, |ui| {
        ui.label("Start");
        timing_changed |= ui
            .add(
                egui::DragValue::new(&mut start)
                    .range(0.0..=duration)
                    .speed(0.1)
                    .max_decimals(1)
                    .suffix(" s"),
            )
            .changed();
        ui.end_row();
        ui.label("End");
        timing_changed |= ui
            .add(
                egui::DragValue::new(&mut end)
                    .range(0.0..=duration)
                    .speed(0.1)
                    .max_decimals(1)
                    .suffix(" s"),
            )
            .changed();
        ui.end_row();
    });
    if timing_changed {
        state.project.set_timing(id, start, end);
    }

    if item.kind == MediaKind::Video {
        ui.colored_label(
            theme::TEXT_DIM,
            match item.intrinsic_duration {
                Some(d) => format!("Video duration: {}", format_time(d)),
                None => "Video duration: unknown".to_string(),
            },
        );

        ui.add_space(6.0);
        ui.label("Volume");
        let mut volume = item.volume;
        let response = ui.add(
            egui::Slider::new(&mut volume, 0.0..=1.0)
                .step_by(0.1)
                .custom_formatter(|v, _| format!("{:.0}%", v * 100.0)),
        );
        if response.changed() {
            state.project.set_volume(id, volume);
            action = Some(UiAction::VolumeChanged(id));
        }
    }

    action
}

fn project_settings(ui: &mut egui::Ui, state: &mut AppState) -> Option<UiAction> {
    ui.label("Project");
    let mut duration = state.project.duration();
    let mut action = None;
    ui.horizontal(|ui| {
        ui.label("Duration");
        let response = ui.add(
            egui::DragValue::new(&mut duration)
                .range(MIN_PROJECT_DURATION..=f64::from(u32::MAX))
                .speed(1.0)
                .max_decimals(0)
                .suffix(" s"),
        );
        if response.changed() {
            state.project.set_duration(duration);
            action = Some(UiAction::DurationChanged);
        }
    });
    ui.colored_label(
        theme::TEXT_DIM,
        format!(
            "{} items \u{00B7} canvas {}\u{00D7}{}",
            state.project.len(),
            state.project.canvas().x,
            state.project.canvas().y
        ),
    );
    action
}
