//! Character encodings supported for reading and writing pom files

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Byte sequence at offset {offset} is not valid {encoding}")]
    Decode { encoding: Encoding, offset: usize },
    #[error("Character {ch:?} cannot be encoded as {encoding}")]
    Encode { encoding: Encoding, ch: char },
}

/// Encoding used for the pom file and its sorted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl Encoding {
    /// Canonical name, as written into the XML declaration
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Ascii => "US-ASCII",
        }
    }

    /// Decode raw file content. A leading UTF-8 byte order mark is dropped.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).map_err(|e| EncodingError::Decode {
                    encoding: *self,
                    offset: e.utf8_error().valid_up_to(),
                })
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(EncodingError::Decode {
                    encoding: *self,
                    offset,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
        }
    }

    /// Encode text for writing
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 | Encoding::Ascii => {
                let limit = if *self == Encoding::Ascii { 0x7F } else { 0xFF };
                text.chars()
                    .map(|ch| {
                        u8::try_from(u32::from(ch))
                            .ok()
                            .filter(|b| u32::from(*b) <= limit)
                            .ok_or(EncodingError::Encode {
                                encoding: *self,
                                ch,
                            })
                    })
                    .collect()
            }
        }
    }

    /// Whether a name declared in a document denotes this encoding
    pub fn matches(&self, declared: &str) -> bool {
        declared.parse::<Encoding>().is_ok_and(|e| e == *self)
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Encoding::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" => Ok(Encoding::Latin1),
            "US-ASCII" | "ASCII" => Ok(Encoding::Ascii),
            _ => Err(format!("Unsupported encoding: {}", s)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("utf-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("UTF8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("iso_8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("Latin1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("us-ascii".parse::<Encoding>().unwrap(), Encoding::Ascii);
        assert!("EBCDIC".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let text = Encoding::Utf8.decode(b"\xEF\xBB\xBF<project/>").unwrap();
        assert_eq!(text, "<project/>");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = Encoding::Utf8.decode(b"<a>\xFF</a>");
        assert_eq!(
            result,
            Err(EncodingError::Decode {
                encoding: Encoding::Utf8,
                offset: 3
            })
        );
    }

    #[test]
    fn test_latin1_round_trip() {
        let bytes = b"<name>Bj\xF6rn</name>";
        let text = Encoding::Latin1.decode(bytes).unwrap();
        assert_eq!(text, "<name>Björn</name>");
        assert_eq!(Encoding::Latin1.encode(&text).unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_ascii_rejects_non_ascii() {
        assert!(Encoding::Ascii.decode(b"caf\xE9").is_err());
        assert!(matches!(
            Encoding::Ascii.encode("café"),
            Err(EncodingError::Encode { ch: 'é', .. })
        ));
    }

    #[test]
    fn test_latin1_rejects_wide_chars() {
        assert!(Encoding::Latin1.encode("€").is_err());
    }

    #[test]
    fn test_matches_declared_name() {
        assert!(Encoding::Utf8.matches("utf-8"));
        assert!(!Encoding::Utf8.matches("ISO-8859-1"));
        assert!(!Encoding::Utf8.matches("windows-1252"));
    }
}
