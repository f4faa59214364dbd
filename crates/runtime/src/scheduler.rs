use crate::frame::Frame;
use crate::job::Job;

/// Runs registered jobs once per frame in `(priority, id, insertion)` order.
pub struct Scheduler<C> {
    next_order: u64,
    jobs: Vec<(u64, Job<C>)>,
    sorted: bool,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            next_order: 0,
            jobs: Vec::new(),
            sorted: true,
        }
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_job(&mut self, job: Job<C>) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.jobs.push((order, job));
        self.sorted = false;
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Job ids in execution order.
    pub fn job_ids(&mut self) -> Vec<&'static str> {
        self.sort();
        self.jobs.iter().map(|(_, job)| job.id).collect()
    }

    /// Run every job for `frame`. Returns the number of jobs run.
    pub fn run_frame(&mut self, frame: Frame, ctx: &mut C) -> usize {
        self.sort();
        for (_order, job) in &self.jobs {
            (job.run)(frame, ctx);
        }
        self.jobs.len()
    }

    fn sort(&mut self) {
        if self.sorted {
            return;
        }
        // Duplicate ids fall back to insertion order.
        self.jobs.sort_by(|(oa, a), (ob, b)| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.id.cmp(b.id))
                .then_with(|| oa.cmp(ob))
        });
        self.sorted = true;
    }
}
