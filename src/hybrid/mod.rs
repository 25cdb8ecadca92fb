//! Multi-start orchestration.
//!
//! - [`HybridOrchestrator`] — Greedy first, then GA and ACO under the
//!   remaining deadline; the cheapest verified tour wins
//! - [`select_best`] — Candidate selection with input-order fallback

mod orchestrator;

pub use orchestrator::{
    select_best, HybridOrchestrator, HybridOutcome, INPUT_ORDER, SEQUENTIAL_GA_SHARE,
};
