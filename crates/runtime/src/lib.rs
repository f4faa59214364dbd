//! Single-threaded frame runtime: frame timing, ordered per-frame jobs,
//! cross-task delivery into the frame loop, plus events and metrics for
//! observing what each frame did.

pub mod event_bus;
pub mod frame;
pub mod inbox;
pub mod job;
pub mod metrics;
pub mod scheduler;

pub use event_bus::*;
pub use frame::*;
pub use inbox::*;
pub use job::*;
pub use metrics::*;
pub use scheduler::*;
