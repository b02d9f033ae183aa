//! Shared data structures for rotating-machinery diagnosis
//!
//! - [`AnalysisConfig`] / [`AnalysisMode`]: per-call scan parameters
//! - [`FaultKind`]: closed fault taxonomy, one value per analysis
//! - [`AnalysisResult`]: the structured diagnosis returned to callers

mod analysis;
mod fault;

pub use analysis::*;
pub use fault::*;
