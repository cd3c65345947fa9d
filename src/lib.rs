/*!
 * # srtformat - SubRip subtitle normalizer
 *
 * A Rust library for rewriting `.srt` files into canonical UTF-8 SRT.
 *
 * ## Features
 *
 * - Strip UTF-8 / UTF-16 byte order marks
 * - Detect GB18030, Big5 and UTF-16 input and transcode it to UTF-8
 * - Accept loose timestamps such as `0: 1: 2,342 -->  0: 1: 5,334`
 * - Renumber cues from 1
 * - Merge back-to-back cues that repeat the same text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `encoding`: BOM handling, charset detection and transcoding
 * - `subtitle_processor`: SRT parser state machine, cue coalescing, emission
 * - `formatter`: The whole pipeline behind one call
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoding;
pub mod errors;
pub mod file_utils;
pub mod formatter;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use encoding::{Charset, CharsetDetector, CharsetGuess, ChardetDetector};
pub use errors::{ConfigError, SrtError};
pub use formatter::{format_srt, FormatOptions, SrtFormatter};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry, Timestamp};
