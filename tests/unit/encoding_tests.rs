/*!
 * Tests for charset detection and transcoding
 */

use encoding_rs::{BIG5, GB18030};

use srtformat::encoding::{normalize_to_utf8, Charset, CharsetGuess, ChardetDetector, CharsetDetector};
use srtformat::errors::SrtError;
use srtformat::formatter::{FormatOptions, SrtFormatter};
use crate::common::MockDetector;

const SIMPLIFIED: &str = "1\n00:00:01,000 --> 00:00:03,000\n我们明天早上八点在火车站见面，请不要迟到。\n\n\
                          2\n00:00:04,000 --> 00:00:06,000\n没问题，我会提前十分钟到达那里等你。\n\n\
                          3\n00:00:07,000 --> 00:00:09,000\n记得带上护照和车票，还有给奶奶买的礼物。\n\n";

const TRADITIONAL: &str = "1\n00:00:01,000 --> 00:00:03,000\n我們明天早上八點在火車站見面，請不要遲到。\n\n\
                           2\n00:00:04,000 --> 00:00:06,000\n沒問題，我會提前十分鐘到達那裡等你。\n\n\
                           3\n00:00:07,000 --> 00:00:09,000\n記得帶上護照和車票，還有給奶奶買的禮物。\n\n";

#[test]
fn test_chardetDetector_withGb18030Subtitles_shouldGuessGb18030() {
    let (encoded, _, _) = GB18030.encode(SIMPLIFIED);
    let guess = ChardetDetector.detect(&encoded).unwrap();
    assert_eq!(guess.charset, Charset::Gb18030);
    assert_eq!(guess.language, Some("zh-CN"));
}

#[test]
fn test_chardetDetector_withBig5Subtitles_shouldGuessBig5() {
    let (encoded, _, _) = BIG5.encode(TRADITIONAL);
    let guess = ChardetDetector.detect(&encoded).unwrap();
    assert_eq!(guess.charset, Charset::Big5);
}

#[test]
fn test_formatter_withDetectedGb18030_shouldEmitUtf8() {
    let (encoded, _, _) = GB18030.encode(SIMPLIFIED);
    let output = SrtFormatter::default().format(&encoded).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), SIMPLIFIED);
}

#[test]
fn test_formatter_withDetectedBig5_shouldEmitUtf8() {
    let (encoded, _, _) = BIG5.encode(TRADITIONAL);
    let output = SrtFormatter::default().format(&encoded).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), TRADITIONAL);
}

#[test]
fn test_formatter_withUtf8Input_shouldPassThrough() {
    let output = SrtFormatter::default().format(SIMPLIFIED.as_bytes()).unwrap();
    assert_eq!(output, SIMPLIFIED.as_bytes());
}

#[test]
fn test_formatter_withUtf16LeBom_shouldTranscode() {
    let mut raw = vec![0xFF, 0xFE];
    raw.extend(SIMPLIFIED.encode_utf16().flat_map(|unit| unit.to_le_bytes()));

    let output = SrtFormatter::default().format(&raw).unwrap();

    assert_eq!(output, SIMPLIFIED.as_bytes());
}

#[test]
fn test_formatter_withMockDetectorNoGuess_shouldFailDetect() {
    let formatter = SrtFormatter::with_detector(Box::new(MockDetector::new(None)), FormatOptions::default());
    let result = formatter.format(b"1\n00:00:01,000 --> 00:00:02,000\nA\n");
    assert!(matches!(result, Err(SrtError::Detect)));
}

#[test]
fn test_formatter_withMockUtf16Label_shouldTranscodeWithoutBom() {
    let raw: Vec<u8> = "1\n00:00:01,000 --> 00:00:02,000\nA\n"
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    let detector = MockDetector::new(Some(CharsetGuess::new(Charset::Utf16be, true)));
    let formatter = SrtFormatter::with_detector(Box::new(detector), FormatOptions::default());

    let output = formatter.format(&raw).unwrap();

    assert_eq!(output, b"1\n00:00:01,000 --> 00:00:02,000\nA\n\n");
}

#[test]
fn test_normalize_withIllegalGb18030_shouldFailTranscode() {
    let detector = MockDetector::new(Some(CharsetGuess::new(Charset::Gb18030, true)));
    let result = normalize_to_utf8(&[0x81, 0x20], &detector, None);
    assert!(matches!(result, Err(SrtError::Transcode { .. })));
}
