use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Counter {
    FramesDrawn,
    TerrainsApplied,
    TerrainsRejected,
    FetchFailures,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gauge {
    TerrainVertices,
    SceneObjects,
}

impl Counter {
    pub fn name(self) -> &'static str {
        match self {
            Counter::FramesDrawn => "frames_drawn",
            Counter::TerrainsApplied => "terrains_applied",
            Counter::TerrainsRejected => "terrains_rejected",
            Counter::FetchFailures => "fetch_failures",
        }
    }
}

impl Gauge {
    pub fn name(self) -> &'static str {
        match self {
            Gauge::TerrainVertices => "terrain_vertices",
            Gauge::SceneObjects => "scene_objects",
        }
    }
}

/// Running min/max/mean of frame steps, in seconds.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FrameTimes {
    pub count: u64,
    pub sum_s: f64,
    pub min_s: f64,
    pub max_s: f64,
}

impl FrameTimes {
    pub fn record(&mut self, dt_s: f64) {
        if self.count == 0 {
            self.min_s = dt_s;
            self.max_s = dt_s;
        } else {
            self.min_s = self.min_s.min(dt_s);
            self.max_s = self.max_s.max(dt_s);
        }
        self.count += 1;
        self.sum_s += dt_s;
    }

    pub fn mean_s(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum_s / self.count as f64)
    }
}

/// Loop counters and gauges. Maps are ordered so snapshots print stably.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Metrics {
    counters: BTreeMap<Counter, u64>,
    gauges: BTreeMap<Gauge, i64>,
    frame_times: FrameTimes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub counters: Vec<(&'static str, u64)>,
    pub gauges: Vec<(&'static str, i64)>,
    pub frame_times: FrameTimes,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, counter: Counter) -> u64 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    pub fn inc(&mut self, counter: Counter) {
        self.inc_by(counter, 1);
    }

    pub fn inc_by(&mut self, counter: Counter, by: u64) {
        *self.counters.entry(counter).or_insert(0) += by;
    }

    pub fn gauge(&self, gauge: Gauge) -> Option<i64> {
        self.gauges.get(&gauge).copied()
    }

    pub fn set_gauge(&mut self, gauge: Gauge, value: i64) {
        self.gauges.insert(gauge, value);
    }

    pub fn record_frame_time(&mut self, dt_s: f64) {
        self.frame_times.record(dt_s);
    }

    pub fn frame_times(&self) -> FrameTimes {
        self.frame_times
    }

    /// Start a new reporting window for frame times; counters keep running.
    pub fn reset_frame_times(&mut self) {
        self.frame_times = FrameTimes::default();
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.iter().map(|(k, v)| (k.name(), *v)).collect(),
            gauges: self.gauges.iter().map(|(k, v)| (k.name(), *v)).collect(),
            frame_times: self.frame_times,
        }
    }
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self
            .counters
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .chain(self.gauges.iter().map(|(name, value)| format!("{name}={value}")))
            .collect();
        if let Some(mean) = self.frame_times.mean_s() {
            parts.push(format!(
                "frame_ms(min/mean/max)={:.2}/{:.2}/{:.2}",
                self.frame_times.min_s * 1e3,
                mean * 1e3,
                self.frame_times.max_s * 1e3
            ));
        }
        f.write_str(&parts.join(" "))
    }
}
