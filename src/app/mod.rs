//! Run orchestration: rounds, progress, and the end-to-end ping flow.
mod progress;
mod rounds;
mod runner;

pub use rounds::run_rounds;
pub(crate) use runner::run_ping;
