use std::time::{Duration, Instant};

use foundation::time::Time;

/// Longest step handed to frame jobs. A stalled process (debugger, suspended
/// laptop) resumes with one short step instead of a huge damping jump.
pub const MAX_FRAME_DT_S: f64 = 0.25;

/// Per-tick frame metadata.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt_s: f64,
    /// Time since the first frame (seconds).
    pub time: Time,
}

impl Frame {
    /// Fixed-step frame; `time` is `index * dt_s`.
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn first(dt_s: f64) -> Self {
        Self {
            index: 0,
            dt_s,
            time: Time::default(),
        }
    }

    pub fn advance(self, dt_s: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.advanced(dt_s),
        }
    }
}

/// Turns wall-clock ticks into [`Frame`]s.
///
/// The first tick reports the nominal step; later ticks report the measured
/// gap, clamped to `[0, MAX_FRAME_DT_S]`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    nominal_dt_s: f64,
    last_tick: Option<Instant>,
    current: Option<Frame>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            nominal_dt_s: 1.0 / f64::from(fps.max(1)),
            last_tick: None,
            current: None,
        }
    }

    pub fn nominal_dt(&self) -> Duration {
        Duration::from_secs_f64(self.nominal_dt_s)
    }

    pub fn current(&self) -> Option<Frame> {
        self.current
    }

    pub fn tick(&mut self) -> Frame {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Frame {
        let dt_s = match self.last_tick {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => self.nominal_dt_s,
        }
        .clamp(0.0, MAX_FRAME_DT_S);
        self.last_tick = Some(now);

        let frame = match self.current {
            Some(prev) => prev.advance(dt_s),
            None => Frame::first(dt_s),
        };
        self.current = Some(frame);
        frame
    }
}
