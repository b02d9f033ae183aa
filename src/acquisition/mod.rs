//! Sample data acquisition module
//!
//! Handles sample ingestion from text files and stdin for the CLI.

pub mod sample_reader;

pub use sample_reader::{parse_samples, read_samples, read_samples_from_path, SampleReadError};
