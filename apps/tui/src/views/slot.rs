use crate::domain::Loaded;

/// Identifies one load cycle of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<T> {
    Empty,
    Loading,
    Ready(Loaded<T>),
}

/// `Empty → Loading → Ready`. Restarting or clearing invalidates every
/// ticket issued before, so late results of an abandoned cycle are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    state: SlotState<T>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slot<T> {
    pub const fn new() -> Self {
        Self {
            state: SlotState::Empty,
            generation: 0,
        }
    }

    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = SlotState::Loading;
        Ticket(self.generation)
    }

    /// Stores `loaded` if `ticket` belongs to the cycle in progress.
    pub fn resolve(&mut self, ticket: Ticket, loaded: Loaded<T>) -> bool {
        if ticket.0 != self.generation || !matches!(self.state, SlotState::Loading) {
            return false;
        }
        self.state = SlotState::Ready(loaded);
        true
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = SlotState::Empty;
    }

    pub const fn state(&self) -> &SlotState<T> {
        &self.state
    }

    pub const fn ready(&self) -> Option<&Loaded<T>> {
        match &self.state {
            SlotState::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.state, SlotState::Loading)
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self.state, SlotState::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_empty_loading_ready() {
        let mut slot = Slot::new();
        assert!(slot.is_empty());

        let ticket = slot.begin();
        assert!(slot.is_loading());
        assert!(slot.resolve(ticket, Loaded::mock(1)));
        assert_eq!(slot.ready().map(|loaded| loaded.data), Some(1));
    }

    #[test]
    fn stale_tickets_are_ignored() {
        let mut slot = Slot::new();
        let old = slot.begin();
        let current = slot.begin();

        assert!(!slot.resolve(old, Loaded::real(1, "/old")));
        assert!(slot.is_loading());
        assert!(slot.resolve(current, Loaded::real(2, "/new")));
        assert_eq!(slot.ready().map(|loaded| loaded.data), Some(2));
    }

    #[test]
    fn clearing_drops_in_flight_results() {
        let mut slot = Slot::new();
        let ticket = slot.begin();
        slot.clear();

        assert!(!slot.resolve(ticket, Loaded::mock("late")));
        assert!(slot.is_empty());
    }

    #[test]
    fn ready_is_terminal_for_a_cycle() {
        let mut slot = Slot::new();
        let ticket = slot.begin();
        assert!(slot.resolve(ticket, Loaded::mock(1)));
        assert!(!slot.resolve(ticket, Loaded::mock(2)));
        assert_eq!(slot.ready().map(|loaded| loaded.data), Some(1));
    }
}
