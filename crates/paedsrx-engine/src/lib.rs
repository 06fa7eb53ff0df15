//! paedsrx-engine
//!
//! Condition matching, weight-based dosing, and treatment plan assembly
//! over a loaded knowledge store, plus the pipeline chaining them to note
//! extraction.

pub mod dosing;
pub mod matcher;
pub mod pipeline;
pub mod planner;

pub use dosing::calculate_dose;
pub use matcher::match_conditions;
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutcome};
pub use planner::assemble;
