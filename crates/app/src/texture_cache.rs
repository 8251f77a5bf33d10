use std::collections::{HashMap, HashSet};

use storycut_state::item::MediaId;
use storycut_state::project::ProjectState;

#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<MediaId, egui::TextureHandle>,
    pending: HashSet<MediaId>,
}

impl TextureCache {
    pub fn mark_pending(&mut self, id: MediaId) {
        self.pending.insert(id);
    }

    pub fn clear_pending(&mut self, id: MediaId) {
        self.pending.remove(&id);
    }

    /// Uploads a picture for `id`, reusing the existing texture when the
    /// dimensions are unchanged.
    pub fn update_item_texture(
        &mut self,
        ctx: &egui::Context,
        id: MediaId,
        width: usize,
        height: usize,
        rgba_data: &[u8],
    ) {
        self.pending.remove(&id);
        let image = egui::ColorImage::from_rgba_unmultiplied([width, height], rgba_data);
        if let Some(handle) = self.textures.get_mut(&id) {
            let [tw, th] = handle.size();
            if tw == width && th == height {
                handle.set(image, egui::TextureOptions::LINEAR);
                return;
            }
        }
        let texture = ctx.load_texture(format!("item_{id}"), image, egui::TextureOptions::LINEAR);
        self.textures.insert(id, texture);
    }

    pub fn retain_registered(&mut self, project: &ProjectState) {
        self.textures.retain(|id, _| project.contains(*id));
        self.pending.retain(|id| project.contains(*id));
    }
}

impl storycut_ui::TextureLookup for TextureCache {
    fn item_texture(&self, id: MediaId) -> Option<&egui::TextureHandle> {
        self.textures.get(&id)
    }

    fn is_pending(&self, id: MediaId) -> bool {
        self.pending.contains(&id)
    }
}
