//! Plan generation for TaskWeaver.
//!
//! Turns a task description plus a file selection into a structured
//! implementation plan:
//! - **client**: the keyword and plan model calls
//! - **orchestrator**: context assembly around those calls
//! - **session**: one root, one run at a time, host message handling
//! - **bridge**: the line-delimited JSON host transport

pub mod bridge;
pub mod candidates;
pub mod client;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use candidates::{CandidateSet, CandidateSource};
pub use client::PlanClient;
pub use orchestrator::{AssemblyReport, PlannerOptions, PlanningRun, TaskPlanner};
pub use session::{PLAN_FAILED_MESSAGE, PlanSession};
