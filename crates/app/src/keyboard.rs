use storycut_ui::UiAction;

const SHORTCUTS: [egui::Key; 3] = [egui::Key::Space, egui::Key::Home, egui::Key::M];

/// Transport shortcut bound to `key`: Space plays or pauses, Home resets,
/// M toggles mute.
pub fn action_for_key(key: egui::Key) -> Option<UiAction> {
    match key {
        egui::Key::Space => Some(UiAction::TogglePlay),
        egui::Key::Home => Some(UiAction::Reset),
        egui::Key::M => Some(UiAction::ToggleMute),
        _ => None,
    }
}

/// First transport shortcut pressed this frame (see [`action_for_key`]).
/// Nothing fires while a text field has keyboard focus.
pub fn handle_keyboard(ctx: &egui::Context) -> Option<UiAction> {
    if ctx.wants_keyboard_input() {
        return None;
    }
    ctx.input(|i| {
        SHORTCUTS
            .into_iter()
            .find(|key| i.key_pressed(*key))
            .and_then(action_for_key)
    })
}
