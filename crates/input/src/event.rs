/// A key symbol as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// A printable key, e.g. `'w'` or `'3'`.
    Char(char),
    /// Any key the game has no binding for.
    Other,
}

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// One event from the windowing layer, already stripped of backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// The window was asked to close.
    Quit,
    KeyDown(Key),
    /// A pointer press at world pixel coordinates.
    PointerDown { x: i32, y: i32, button: PointerButton },
}

/// Capability: a non-blocking supplier of raw events, polled once per frame.
pub trait EventSource {
    /// Drain every event that is currently pending, oldest first. May be empty.
    fn poll(&mut self) -> Vec<RawEvent>;
}

/// FIFO buffer between a callback-driven window backend and the frame loop.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<RawEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RawEvent) {
        self.pending.push(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<RawEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = RawEvent>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

impl EventSource for EventQueue {
    fn poll(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_arrival_order() {
        let mut q = EventQueue::new();
        q.push(RawEvent::KeyDown(Key::Char('d')));
        q.push(RawEvent::Quit);
        assert_eq!(q.len(), 2);

        let batch = q.poll();
        assert_eq!(batch, vec![RawEvent::KeyDown(Key::Char('d')), RawEvent::Quit]);
        assert!(q.is_empty());
        assert!(q.poll().is_empty());
    }
}
