//! Exclusive overlay tracking for dropdowns and dialogs.
//!
//! Every dropdown and dialog is a two-state machine (closed | open). One
//! registry owns the invariant that at most one overlay is active at a
//! time: opening one deactivates the previous, and a single outside-click
//! or escape entry point dismisses whatever is active.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayId {
    /// The type filter dropdown in the filters row.
    TypeFilter,
    /// The status filter dropdown in the filters row.
    StatusFilter,
    /// The per-unit status change dropdown.
    StatusMenu(u64),
    /// The create-unit dialog.
    CreateDialog,
    /// The unit details drawer.
    DetailDrawer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayRegistry {
    active: Option<OverlayId>,
}

impl OverlayRegistry {
    /// Open an overlay, deactivating whichever one was active.
    pub fn open(&mut self, id: OverlayId) {
        self.active = Some(id);
    }

    /// Toggle an overlay: close it if it is the active one, otherwise open
    /// it (deactivating any other).
    pub fn toggle(&mut self, id: OverlayId) {
        if self.active == Some(id) {
            self.active = None;
        } else {
            self.active = Some(id);
        }
    }

    /// Close a specific overlay if it is the active one.
    pub fn close(&mut self, id: OverlayId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Dismiss whatever overlay is active (outside click, escape key).
    /// Returns the overlay that was dismissed, if any.
    pub fn dismiss_active(&mut self) -> Option<OverlayId> {
        self.active.take()
    }

    pub fn is_open(&self, id: OverlayId) -> bool {
        self.active == Some(id)
    }

    pub fn active(&self) -> Option<OverlayId> {
        self.active
    }
}
