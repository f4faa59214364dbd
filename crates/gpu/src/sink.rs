use tracing::{debug, trace};

use crate::renderer::RenderFrame;

/// Where finished frames go: a window surface, a recorder, a log.
pub trait FrameSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Headless presentation: traces every frame, summarizes every `summary_every`.
#[derive(Debug)]
pub struct LogSink {
    summary_every: u64,
    presented: u64,
}

impl LogSink {
    pub fn new(summary_every: u64) -> Self {
        Self {
            summary_every: summary_every.max(1),
            presented: 0,
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &RenderFrame) {
        self.presented += 1;
        trace!(commands = frame.commands.len(), "present");
        if !frame.uploaded.is_empty() || !frame.evicted.is_empty() {
            debug!(
                uploaded = frame.uploaded.len(),
                evicted = frame.evicted.len(),
                "gpu resources changed"
            );
        }
        if self.presented % self.summary_every == 0 {
            let indices: u64 = frame.commands.iter().map(|c| u64::from(c.index_count)).sum();
            debug!(
                frames = self.presented,
                draws = frame.commands.len(),
                triangles = indices / 3,
                "frame summary"
            );
        }
    }
}

/// Keeps every presented frame. For tests and offline inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<RenderFrame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }
}

impl FrameSink for MemorySink {
    fn present(&mut self, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }
}
