use crate::frame::Frame;

/// Event kinds recorded by the simulation.
pub mod kinds {
    pub const SWEEP_STARTED: &str = "sweep.started";
    pub const SWEEP_STATUS: &str = "sweep.status";
    pub const SWEEP_FINISHED: &str = "sweep.finished";
    pub const MARKER_VISITED: &str = "marker.visited";
    pub const MARKER_REJECTED: &str = "marker.rejected";
    pub const ASSET_LOADED: &str = "asset.loaded";
    pub const ASSET_FAILED: &str = "asset.failed";
}

/// Structured, frame-stamped event for traceability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, kinds};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame { index: 2 }, kinds::SWEEP_STARTED, "run");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame { index: 0 }, kinds::ASSET_LOADED, "satellite");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
