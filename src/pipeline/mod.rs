//! Pipeline orchestration: batch dispatch, operation journal, and the run entry point

pub mod dispatch;
pub mod journal;
pub mod orchestrator;

pub use orchestrator::{run, run_with, MirrorSummary};
