/*!
 * Common test utilities for the srtformat test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use srtformat::encoding::{CharsetDetector, CharsetGuess};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given bytes in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample file with loose timestamps, odd indices and a duplicate run
pub const MESSY_SRT: &str = "5\r\n0: 0: 1,0 -->  0: 0: 2,500\r\n  Hello there  \r\n\r\n6\r\n00:00:02,500 --> 00:00:04,000\r\nHello there\r\n\r\n\r\n9\r\n0:0:5,0 --> 0:0:7,250\r\nGeneral Kenobi\r\nYou are a bold one\r\n";

/// What `MESSY_SRT` formats to
pub const MESSY_SRT_FORMATTED: &str = "1\n00:00:01,000 --> 00:00:04,000\nHello there\n\n2\n00:00:05,000 --> 00:00:07,250\nGeneral Kenobi\nYou are a bold one\n\n";

/// Detector that always answers with the same guess
pub struct MockDetector {
    guess: Option<CharsetGuess>,
}

impl MockDetector {
    pub fn new(guess: Option<CharsetGuess>) -> Self {
        Self { guess }
    }
}

impl CharsetDetector for MockDetector {
    fn detect(&self, _bytes: &[u8]) -> Option<CharsetGuess> {
        self.guess.clone()
    }
}
