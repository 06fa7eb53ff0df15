pub mod condition;
pub mod dose;
pub mod guideline;
pub mod matching;
pub mod patient;
pub mod plan;
