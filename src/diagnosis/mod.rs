//! Fault diagnosis from harmonic amplitudes
//!
//! Harmonic peak amplitudes are normalized against the spectrum's noise
//! floor and mapped to a [`FaultKind`](crate::types::FaultKind) by ordered
//! threshold rules (first match wins):
//!
//! 1. strong 1× with quiet 2× and 3× → unbalance
//! 2. 2× above 1× and strong → misalignment
//! 3. all three harmonics elevated → looseness
//! 4. otherwise healthy

mod classifier;

pub use classifier::*;
