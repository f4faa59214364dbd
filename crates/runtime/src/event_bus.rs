use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A terrain replaced the ground object.
    TerrainApplied,
    /// A fetched or delivered terrain was refused; the scene is unchanged.
    TerrainRejected,
    /// The elevation request itself failed.
    FetchFailed,
    CameraPlaced,
    FrameDrawn,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::TerrainApplied => "terrain_applied",
            EventKind::TerrainRejected => "terrain_rejected",
            EventKind::FetchFailed => "fetch_failed",
            EventKind::CameraPlaced => "camera_placed",
            EventKind::FrameDrawn => "frame_drawn",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Append-only log of what happened on which frame.
///
/// The loop drains it periodically; tests read it directly.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn last(&self, kind: EventKind) -> Option<&Event> {
        self.events.iter().rev().find(|e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, EventKind};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(2, 0.1), EventKind::TerrainApplied, "3x3");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].kind.to_string(), "terrain_applied");
    }

    #[test]
    fn count_and_last_filter_by_kind() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0, 1.0), EventKind::FrameDrawn, "0");
        bus.emit(Frame::new(1, 1.0), EventKind::TerrainRejected, "bad");
        bus.emit(Frame::new(1, 1.0), EventKind::FrameDrawn, "1");

        assert_eq!(bus.count(EventKind::FrameDrawn), 2);
        assert_eq!(bus.count(EventKind::TerrainApplied), 0);
        assert_eq!(
            bus.last(EventKind::FrameDrawn).map(|e| e.message.as_str()),
            Some("1")
        );
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0, 1.0), EventKind::CameraPlaced, "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
