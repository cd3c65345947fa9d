use std::borrow::Cow;
use std::fmt;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, BIG5, GB18030, GBK, UTF_16BE, UTF_16LE, UTF_8};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::SrtError;

// @module: Byte-source normalization (BOM handling, charset detection, transcoding)

// @const: Bytes inspected by the UTF-16 NUL-pattern sniffer
const UTF16_SNIFF_LEN: usize = 4096;

/// Charset of an input file, as far as the formatter cares
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    Utf8,
    Gb18030,
    Big5,
    Utf16le,
    Utf16be,
    /// Anything else the classifier reports; passed through untouched
    #[serde(skip)]
    Other(String),
}

impl Charset {
    // @returns: Charset for an encoding_rs encoding
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        // chardetng reports simplified Chinese as GBK; GB18030 is its superset
        if encoding == GBK || encoding == GB18030 {
            Self::Gb18030
        } else if encoding == BIG5 {
            Self::Big5
        } else if encoding == UTF_8 {
            Self::Utf8
        } else if encoding == UTF_16LE {
            Self::Utf16le
        } else if encoding == UTF_16BE {
            Self::Utf16be
        } else {
            Self::Other(encoding.name().to_string())
        }
    }

    /// Decoder to run for this charset, `None` for pass-through
    pub fn decoder(&self) -> Option<&'static Encoding> {
        match self {
            Self::Gb18030 => Some(GB18030),
            Self::Big5 => Some(BIG5),
            Self::Utf16le => Some(UTF_16LE),
            Self::Utf16be => Some(UTF_16BE),
            Self::Utf8 | Self::Other(_) => None,
        }
    }

    /// Whether this charset can be forced on the command line or in config
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Gb18030 => write!(f, "GB-18030"),
            Self::Big5 => write!(f, "Big5"),
            Self::Utf16le => write!(f, "UTF-16LE"),
            Self::Utf16be => write!(f, "UTF-16BE"),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Best guess of a charset classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetGuess {
    pub charset: Charset,
    /// Language the encoding implies, when it implies one
    pub language: Option<&'static str>,
    /// Whether the classifier considers the guess reliable
    pub confident: bool,
}

impl CharsetGuess {
    pub fn new(charset: Charset, confident: bool) -> Self {
        let language = language_hint(&charset);
        Self { charset, language, confident }
    }

    /// Language hint for diagnostics, `unknown` when the charset implies none
    pub fn language_label(&self) -> &'static str {
        self.language.unwrap_or("unknown")
    }
}

/// Statistical charset classifier used by the normalizer
pub trait CharsetDetector: Send + Sync {
    /// Best guess for `bytes`, or `None` when the classifier has no candidate
    fn detect(&self, bytes: &[u8]) -> Option<CharsetGuess>;
}

/// Default classifier: BOM-less UTF-16 sniffing, then chardetng
#[derive(Debug, Default, Clone, Copy)]
pub struct ChardetDetector;

impl CharsetDetector for ChardetDetector {
    fn detect(&self, bytes: &[u8]) -> Option<CharsetGuess> {
        // chardetng never proposes UTF-16, so look for the NUL pattern first
        if let Some(charset) = sniff_utf16(bytes) {
            return Some(CharsetGuess::new(charset, true));
        }

        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        let (encoding, confident) = detector.guess_assess(None, true);
        Some(CharsetGuess::new(Charset::from_encoding(encoding), confident))
    }
}

/// UTF-8 bytes produced by the normalizer
#[derive(Debug)]
pub struct NormalizedSource<'a> {
    pub bytes: Cow<'a, [u8]>,
    /// Charset the input was read as
    pub charset: Charset,
}

/// Result of byte-order-mark inspection
#[derive(Debug, PartialEq, Eq)]
pub enum BomKind {
    None,
    Utf8,
    Utf16le,
    Utf16be,
}

/// Identify a leading BOM, returning its kind and the bytes after it
pub fn strip_bom(raw: &[u8]) -> (BomKind, &[u8]) {
    match Encoding::for_bom(raw) {
        Some((encoding, len)) if encoding == UTF_8 => (BomKind::Utf8, &raw[len..]),
        Some((encoding, len)) if encoding == UTF_16LE => (BomKind::Utf16le, &raw[len..]),
        Some((encoding, len)) if encoding == UTF_16BE => (BomKind::Utf16be, &raw[len..]),
        _ => (BomKind::None, raw),
    }
}

/// Turn raw file bytes into UTF-8.
///
/// A UTF-16 BOM decides the encoding outright. Otherwise `forced` wins over the
/// classifier; GB18030, Big5 and UTF-16 are transcoded and everything else is
/// passed through as is, invalid sequences included.
pub fn normalize_to_utf8<'a>(
    raw: &'a [u8],
    detector: &dyn CharsetDetector,
    forced: Option<&Charset>,
) -> Result<NormalizedSource<'a>, SrtError> {
    let (bom, body) = strip_bom(raw);

    let charset = match bom {
        BomKind::Utf16le => Some(Charset::Utf16le),
        BomKind::Utf16be => Some(Charset::Utf16be),
        BomKind::Utf8 => Some(Charset::Utf8),
        BomKind::None => None,
    };

    let charset = if let Some(charset) = charset {
        info!("Input charset: {} (byte order mark)", charset);
        charset
    } else if let Some(charset) = forced {
        info!("Input charset: {} (forced)", charset);
        charset.clone()
    } else {
        let guess = detector.detect(body).ok_or(SrtError::Detect)?;
        info!("Input charset: {} language: {}", guess.charset, guess.language_label());
        if !guess.confident {
            debug!("Charset guess {} is low confidence", guess.charset);
        }
        guess.charset
    };

    let bytes = match charset.decoder() {
        Some(encoding) => Cow::Owned(transcode(body, encoding, &charset)?),
        None => Cow::Borrowed(body),
    };

    Ok(NormalizedSource { bytes, charset })
}

// @decodes: bytes with `encoding`, illegal sequences are fatal
fn transcode(bytes: &[u8], encoding: &'static Encoding, charset: &Charset) -> Result<Vec<u8>, SrtError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned().into_bytes())
        .ok_or_else(|| SrtError::Transcode { encoding: charset.to_string() })
}

// @detects: BOM-less UTF-16 from the position of NUL bytes in mostly-ASCII text
fn sniff_utf16(bytes: &[u8]) -> Option<Charset> {
    let sample = &bytes[..bytes.len().min(UTF16_SNIFF_LEN)];
    let pairs = sample.len() / 2;
    if pairs < 2 {
        return None;
    }

    let even_nuls = sample.iter().step_by(2).filter(|b| **b == 0).count();
    let odd_nuls = sample.iter().skip(1).step_by(2).filter(|b| **b == 0).count();

    // SRT is dominated by digits and punctuation, so one half of the
    // code units should be almost entirely NUL
    if odd_nuls * 10 >= pairs * 4 && even_nuls * 20 < pairs {
        Some(Charset::Utf16le)
    } else if even_nuls * 10 >= pairs * 4 && odd_nuls * 20 < pairs {
        Some(Charset::Utf16be)
    } else {
        None
    }
}

// @returns: Language implied by a charset
fn language_hint(charset: &Charset) -> Option<&'static str> {
    match charset {
        Charset::Gb18030 => Some("zh-CN"),
        Charset::Big5 => Some("zh-TW"),
        Charset::Other(label) => match label.as_str() {
            "Shift_JIS" | "EUC-JP" | "ISO-2022-JP" => Some("ja"),
            "EUC-KR" => Some("ko"),
            _ => None,
        },
        _ => None,
    }
}
