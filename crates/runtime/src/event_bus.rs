/// Ordered outbox of events produced while handling a single input.
///
/// Producers `emit` while they hold mutable state; the owner drains the bus
/// afterwards and delivers the events once no borrows are outstanding.
#[derive(Debug, Clone)]
pub struct EventBus<E> {
    events: Vec<E>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}
