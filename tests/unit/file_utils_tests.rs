/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use srtformat::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.srt", b"1\n")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for directories and missing files
#[test]
fn test_file_exists_withDirectoryOrMissingFile_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.srt")));

    Ok(())
}

/// Test that bytes round-trip unchanged, including non-UTF-8 content
#[test]
fn test_read_bytes_withBinaryContent_shouldReturnExactBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = [0xEF, 0xBB, 0xBF, b'1', 0xA4, 0x0A];
    let test_file = common::create_test_file(temp_dir.path(), "raw.srt", &content)?;

    assert_eq!(FileManager::read_bytes(&test_file)?, content);

    Ok(())
}

/// Test that write_bytes truncates longer existing content
#[test]
fn test_write_bytes_withShorterContent_shouldTruncate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "out.srt", b"a much longer original body")?;

    FileManager::write_bytes(&test_file, b"short")?;

    assert_eq!(FileManager::read_bytes(&test_file)?, b"short");

    Ok(())
}

/// Test that reading a missing file names it in the error
#[test]
fn test_read_bytes_withMissingFile_shouldMentionPath() {
    let err = FileManager::read_bytes("definitely_missing_12345.srt").unwrap_err();
    assert!(format!("{:#}", err).contains("definitely_missing_12345.srt"));
}
