use crate::item::MediaId;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub selected: Option<MediaId>,
}

impl Selection {
    pub fn select(&mut self, id: MediaId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, id: MediaId) -> bool {
        self.selected == Some(id)
    }
}
