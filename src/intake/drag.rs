/// Drag-and-drop bookkeeping for the two intake widgets
///
/// Native file drags are reported for the whole window, so the target
/// slot is worked out from where the pointer last was. On Windows and
/// macOS no cursor movement arrives while an OS drag is in progress, so
/// there the pointer slot is usually unknown and a drop lands in the
/// first empty slot.
use crate::state::data::ImageSlot;

#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Files are currently being dragged over the window
    hovering: bool,
    /// Intake widget under the pointer, if any
    pointer_over: Option<ImageSlot>,
}

impl DragState {
    pub fn files_hovered(&mut self) {
        self.hovering = true;
    }

    pub fn files_left(&mut self) {
        self.hovering = false;
    }

    /// Finish a drag gesture
    ///
    /// Returns `true` only for the first file of a gesture, so dropping
    /// several files at once takes just the first one.
    pub fn dropped(&mut self) -> bool {
        std::mem::replace(&mut self.hovering, false)
    }

    pub fn pointer_entered(&mut self, slot: ImageSlot) {
        self.pointer_over = Some(slot);
    }

    pub fn pointer_left(&mut self, slot: ImageSlot) {
        if self.pointer_over == Some(slot) {
            self.pointer_over = None;
        }
    }

    /// Slot a drop should land in
    ///
    /// Only empty slots show an upload target. Over a filled slot a drop
    /// goes nowhere; away from both, the first empty slot takes it.
    pub fn drop_target(&self, is_empty: impl Fn(ImageSlot) -> bool) -> Option<ImageSlot> {
        match self.pointer_over {
            Some(slot) if is_empty(slot) => Some(slot),
            Some(_) => None,
            None => ImageSlot::ALL.into_iter().find(|slot| is_empty(*slot)),
        }
    }

    /// Whether `slot` should show the "dragging" highlight
    pub fn is_dragging_over(&self, slot: ImageSlot, is_empty: impl Fn(ImageSlot) -> bool) -> bool {
        self.hovering && self.drop_target(is_empty) == Some(slot)
    }
}

/// Per-slot read tickets
///
/// Every accepted file gets a fresh ticket. A finished read is applied
/// only while its ticket is still the newest for that slot, so the most
/// recently started read wins and removing an image discards reads
/// that were still running.
#[derive(Debug, Clone, Default)]
pub struct Tickets {
    source: u64,
    outfit: u64,
}

impl Tickets {
    pub fn issue(&mut self, slot: ImageSlot) -> u64 {
        let counter = self.counter_mut(slot);
        *counter += 1;
        *counter
    }

    pub fn invalidate(&mut self, slot: ImageSlot) {
        *self.counter_mut(slot) += 1;
    }

    pub fn is_current(&self, slot: ImageSlot, ticket: u64) -> bool {
        let current = match slot {
            ImageSlot::Source => self.source,
            ImageSlot::Outfit => self.outfit,
        };
        current == ticket
    }

    fn counter_mut(&mut self, slot: ImageSlot) -> &mut u64 {
        match slot {
            ImageSlot::Source => &mut self.source,
            ImageSlot::Outfit => &mut self.outfit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_sets_and_leave_clears_highlight() {
        let mut drag = DragState::default();
        let all_empty = |_| true;

        drag.pointer_entered(ImageSlot::Outfit);
        assert!(!drag.is_dragging_over(ImageSlot::Outfit, all_empty));

        drag.files_hovered();
        assert!(drag.is_dragging_over(ImageSlot::Outfit, all_empty));
        assert!(!drag.is_dragging_over(ImageSlot::Source, all_empty));

        drag.files_left();
        assert!(!drag.is_dragging_over(ImageSlot::Outfit, all_empty));

        drag.files_hovered();
        assert!(drag.dropped());
        assert!(!drag.is_dragging_over(ImageSlot::Outfit, all_empty));
    }

    #[test]
    fn test_only_first_file_of_a_drop_counts() {
        let mut drag = DragState::default();
        drag.files_hovered();
        drag.files_hovered();

        assert!(drag.dropped());
        assert!(!drag.dropped());

        drag.files_hovered();
        assert!(drag.dropped());
    }

    #[test]
    fn test_drop_target_prefers_slot_under_pointer() {
        let mut drag = DragState::default();
        drag.pointer_entered(ImageSlot::Outfit);
        assert_eq!(drag.drop_target(|_| true), Some(ImageSlot::Outfit));

        // Over a filled slot the drop has nowhere to go
        assert_eq!(
            drag.drop_target(|slot| slot != ImageSlot::Outfit),
            None
        );
    }

    #[test]
    fn test_drop_target_falls_back_to_first_empty_slot() {
        let mut drag = DragState::default();
        drag.pointer_entered(ImageSlot::Source);
        drag.pointer_left(ImageSlot::Source);

        assert_eq!(drag.drop_target(|_| true), Some(ImageSlot::Source));
        assert_eq!(
            drag.drop_target(|slot| slot == ImageSlot::Outfit),
            Some(ImageSlot::Outfit)
        );
        assert_eq!(drag.drop_target(|_| false), None);
    }

    #[test]
    fn test_drag_without_pointer_events_fills_first_empty_slot() {
        let mut drag = DragState::default();
        drag.files_hovered();

        assert!(drag.is_dragging_over(ImageSlot::Outfit, |slot| slot == ImageSlot::Outfit));
        assert_eq!(
            drag.drop_target(|slot| slot == ImageSlot::Outfit),
            Some(ImageSlot::Outfit)
        );
        assert!(drag.dropped());
    }

    #[test]
    fn test_stale_pointer_exit_is_ignored() {
        let mut drag = DragState::default();
        drag.pointer_entered(ImageSlot::Source);
        drag.pointer_entered(ImageSlot::Outfit);
        drag.pointer_left(ImageSlot::Source);
        assert_eq!(drag.drop_target(|_| true), Some(ImageSlot::Outfit));
    }

    #[test]
    fn test_newest_ticket_wins() {
        let mut tickets = Tickets::default();
        let first = tickets.issue(ImageSlot::Source);
        let second = tickets.issue(ImageSlot::Source);

        assert!(!tickets.is_current(ImageSlot::Source, first));
        assert!(tickets.is_current(ImageSlot::Source, second));

        let outfit = tickets.issue(ImageSlot::Outfit);
        assert!(tickets.is_current(ImageSlot::Source, second));
        assert!(tickets.is_current(ImageSlot::Outfit, outfit));
    }

    #[test]
    fn test_invalidate_discards_pending_read() {
        let mut tickets = Tickets::default();
        let pending = tickets.issue(ImageSlot::Outfit);
        tickets.invalidate(ImageSlot::Outfit);
        assert!(!tickets.is_current(ImageSlot::Outfit, pending));
    }
}
