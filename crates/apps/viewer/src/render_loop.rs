//! Fixed-rate frame loop.
//!
//! Each tick runs three jobs in order: apply whatever terrain arrived since
//! the last tick, advance the orbit controls, draw. Network work happens in
//! other tasks and only reaches the scene through the inbox.

use std::future::Future;

use gpu::{FrameSink, Renderer};
use runtime::{
    Counter, EventBus, EventKind, Frame, FrameClock, Gauge, Inbox, Job, Metrics, Scheduler,
};
use scene::MarkerStyle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::compositor::SceneCompositor;
use crate::fetch::LoadOutcome;

pub const APPLY_TERRAIN_JOB: &str = "apply-terrain";
pub const CONTROLS_JOB: &str = "controls";
pub const DRAW_JOB: &str = "draw";

/// State shared by the frame jobs.
pub struct LoopState<S> {
    pub compositor: SceneCompositor,
    pub renderer: Renderer,
    pub sink: S,
    pub inbox: Inbox<LoadOutcome>,
    pub events: EventBus,
    pub metrics: Metrics,
    pub marker_style: MarkerStyle,
}

pub struct RenderLoop<S> {
    state: LoopState<S>,
    scheduler: Scheduler<LoopState<S>>,
    clock: FrameClock,
    fps: u32,
    max_frames: Option<u64>,
}

impl<S: FrameSink> RenderLoop<S> {
    pub fn new(
        compositor: SceneCompositor,
        renderer: Renderer,
        sink: S,
        inbox: Inbox<LoadOutcome>,
        fps: u32,
    ) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.add_job(Job::with_priority(APPLY_TERRAIN_JOB, 0, apply_terrain::<S>));
        scheduler.add_job(Job::with_priority(CONTROLS_JOB, 10, advance_controls::<S>));
        scheduler.add_job(Job::with_priority(DRAW_JOB, 20, draw::<S>));
        Self {
            state: LoopState {
                compositor,
                renderer,
                sink,
                inbox,
                events: EventBus::new(),
                metrics: Metrics::new(),
                marker_style: MarkerStyle::default(),
            },
            scheduler,
            clock: FrameClock::new(fps),
            fps: fps.max(1),
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.state.marker_style = style;
        self
    }

    pub fn state(&self) -> &LoopState<S> {
        &self.state
    }

    pub fn job_ids(&mut self) -> Vec<&'static str> {
        self.scheduler.job_ids()
    }

    /// One frame timed by the wall clock.
    pub fn tick(&mut self) -> Frame {
        let frame = self.clock.tick();
        self.run_frame(frame);
        frame
    }

    pub fn run_frame(&mut self, frame: Frame) {
        self.scheduler.run_frame(frame, &mut self.state);
    }

    /// Tick at the configured rate until `shutdown` resolves or the frame
    /// limit is hit. Returns the number of frames drawn.
    pub async fn run<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.clock.nominal_dt());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(fps = self.fps, max_frames = ?self.max_frames, "render loop started");
        let stats_every = u64::from(self.fps);
        let mut frames = 0u64;
        let mut elapsed_s = 0.0;
        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                break;
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
                _ = interval.tick() => {
                    elapsed_s = self.tick().time.seconds();
                    frames += 1;
                    if frames % stats_every == 0 {
                        self.report();
                    }
                }
            }
        }
        self.report();
        info!(frames, elapsed_s, "render loop stopped");
        frames
    }

    /// Log a metrics line and flush the event log.
    fn report(&mut self) {
        let state = &mut self.state;
        for event in state.events.drain() {
            if event.kind != EventKind::FrameDrawn {
                debug!(frame = event.frame_index, kind = %event.kind, "{}", event.message);
            }
        }
        info!(metrics = %state.metrics.snapshot(), "render stats");
        state.metrics.reset_frame_times();
    }
}

fn apply_terrain<S>(frame: Frame, state: &mut LoopState<S>) {
    for outcome in state.inbox.drain() {
        match outcome {
            LoadOutcome::Loaded(payload) => {
                match state.compositor.apply_payload(&payload, state.marker_style) {
                    Ok(loaded) => {
                        let vertices = state
                            .compositor
                            .scene()
                            .ground()
                            .as_terrain()
                            .map_or(0, |surface| surface.mesh.vertex_count());
                        state.metrics.inc(Counter::TerrainsApplied);
                        state
                            .metrics
                            .set_gauge(Gauge::TerrainVertices, vertices as i64);
                        state.events.emit(
                            frame,
                            EventKind::TerrainApplied,
                            format!("ground {} replaced {}", loaded.ground, loaded.replaced),
                        );
                        state
                            .events
                            .emit(frame, EventKind::CameraPlaced, "camera aimed at origin");
                    }
                    Err(err) => {
                        warn!(error = %err, "terrain rejected");
                        state.metrics.inc(Counter::TerrainsRejected);
                        state
                            .events
                            .emit(frame, EventKind::TerrainRejected, err.to_string());
                    }
                }
            }
            LoadOutcome::Failed(err) => {
                warn!(error = %err, "elevation fetch failed");
                state.metrics.inc(Counter::FetchFailures);
                state
                    .events
                    .emit(frame, EventKind::FetchFailed, err.to_string());
            }
        }
    }
}

fn advance_controls<S>(frame: Frame, state: &mut LoopState<S>) {
    if state.compositor.update_controls(frame.dt_s) {
        trace!(frame = frame.index, "camera moved");
    }
}

fn draw<S: FrameSink>(frame: Frame, state: &mut LoopState<S>) {
    let scene = state.compositor.scene();
    let render = state.renderer.collect(scene, state.compositor.camera());
    state.sink.present(&render);

    state.metrics.inc(Counter::FramesDrawn);
    state.metrics.record_frame_time(frame.dt_s);
    state
        .metrics
        .set_gauge(Gauge::SceneObjects, scene.object_count() as i64);
    state.events.emit(
        frame,
        EventKind::FrameDrawn,
        format!("{} draws", render.commands.len()),
    );
}
