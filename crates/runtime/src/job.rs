use crate::frame::Frame;

/// A unit of per-frame work executed by the [`Scheduler`](crate::Scheduler).
///
/// `C` is the loop state the job operates on. Jobs are plain function
/// pointers so the schedule stays inspectable and free of captured state.
pub struct Job<C> {
    pub id: &'static str,
    /// Smaller values run earlier.
    pub priority: i32,
    pub run: fn(frame: Frame, ctx: &mut C),
}

impl<C> Job<C> {
    pub fn new(id: &'static str, run: fn(frame: Frame, ctx: &mut C)) -> Self {
        Self {
            id,
            priority: 0,
            run,
        }
    }

    pub fn with_priority(
        id: &'static str,
        priority: i32,
        run: fn(frame: Frame, ctx: &mut C),
    ) -> Self {
        Self { id, priority, run }
    }
}

impl<C> std::fmt::Debug for Job<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
