use crate::model::IconId;

/// Which icon keyboard input routes to. Set on press, never cleared
/// automatically; an icon stays selected until another one is pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Selection {
    pub active: Option<IconId>,
}

impl Selection {
    /// Idempotent; returns whether the selection actually moved.
    pub fn select(&mut self, id: IconId) -> bool {
        if self.active == Some(id) {
            false
        } else {
            self.active = Some(id);
            true
        }
    }
}
