/*!
 * End-to-end formatting: raw bytes in, canonical SRT bytes out.
 */

use log::debug;

use crate::encoding::{normalize_to_utf8, ChardetDetector, Charset, CharsetDetector};
use crate::errors::SrtError;
use crate::subtitle_processor::SubtitleCollection;

/// Knobs of the formatting pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Merge contiguous cues with identical text
    pub coalesce: bool,
    /// Decode with this charset instead of asking the detector
    pub encoding: Option<Charset>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            coalesce: true,
            encoding: None,
        }
    }
}

/// Normalizes SRT files: transcode, parse, coalesce, emit.
///
/// Holds no per-file state, so one formatter can serve any number of files.
pub struct SrtFormatter {
    detector: Box<dyn CharsetDetector>,
    options: FormatOptions,
}

impl SrtFormatter {
    /// Formatter using the default chardetng-based detector
    pub fn new(options: FormatOptions) -> Self {
        Self::with_detector(Box::new(ChardetDetector), options)
    }

    /// Formatter with a custom charset classifier
    pub fn with_detector(detector: Box<dyn CharsetDetector>, options: FormatOptions) -> Self {
        Self { detector, options }
    }

    /// Decode and parse `raw` into cues
    pub fn parse(&self, raw: &[u8]) -> Result<SubtitleCollection, SrtError> {
        let source = normalize_to_utf8(raw, self.detector.as_ref(), self.options.encoding.as_ref())?;
        let collection = SubtitleCollection::parse_srt_bytes(&source.bytes, self.options.coalesce)?;
        debug!("Parsed {} cue(s) from {} input", collection.len(), source.charset);
        Ok(collection)
    }

    /// Canonical SRT bytes for `raw`
    pub fn format(&self, raw: &[u8]) -> Result<Vec<u8>, SrtError> {
        Ok(self.parse(raw)?.to_srt_bytes())
    }
}

impl Default for SrtFormatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

/// Format `raw` with default options
pub fn format_srt(raw: &[u8]) -> Result<Vec<u8>, SrtError> {
    SrtFormatter::default().format(raw)
}
