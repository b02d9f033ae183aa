//! Analysis orchestration
//!
//! Sequences preprocessing, FFT, peak location and classification into a
//! single pure call:
//!
//! ```text
//! samples ─► prepare ─► FFT ─► magnitude spectrum ─┬─► blind peak ─────────────► result
//!                                                  └─► 1×/2×/3× peaks ─► classify ─► result
//! ```
//!
//! Terminal outcomes: `InsufficientData` (short input), `Unmeasurable`
//! (shaft too close to Nyquist), a blind-scan peak, or a harmonic verdict.

mod analyzer;

pub use analyzer::*;
