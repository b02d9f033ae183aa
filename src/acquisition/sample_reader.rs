//! Sample Reader
//!
//! Parses motion-intensity samples exported by a capture layer.
//!
//! Two layouts are accepted:
//! - a JSON array of numbers (`[0.12, 0.15, ...]`)
//! - plain text: numbers separated by whitespace, commas or semicolons,
//!   with `#` starting a comment that runs to the end of the line

use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid number '{token}' on line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("Invalid JSON sample array: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Non-finite sample {value} on line {line}")]
    NonFinite { line: usize, value: f64 },
}

/// Parse samples from an in-memory string.
pub fn parse_samples(input: &str) -> Result<Vec<f64>, SampleReadError> {
    if input.trim_start().starts_with('[') {
        let samples: Vec<f64> = serde_json::from_str(input)?;
        return Ok(samples);
    }

    let mut samples = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().unwrap_or_default();

        for token in line
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|t| !t.is_empty())
        {
            let value: f64 = token.parse().map_err(|_| SampleReadError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })?;
            if !value.is_finite() {
                return Err(SampleReadError::NonFinite {
                    line: line_no,
                    value,
                });
            }
            samples.push(value);
        }
    }

    tracing::debug!(count = samples.len(), "Parsed samples");
    Ok(samples)
}

/// Read and parse every sample from a reader.
pub fn read_samples<R: Read>(mut reader: R) -> Result<Vec<f64>, SampleReadError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_samples(&contents)
}

/// Read samples from a file, or from stdin when `path` is `-`.
pub fn read_samples_from_path(path: &Path) -> Result<Vec<f64>, SampleReadError> {
    if path == Path::new("-") {
        return read_samples(std::io::stdin().lock());
    }
    read_samples(std::fs::File::open(path)?)
}
