//! Code128-style string validation
//!
//! This is a loose approximation of the Code128 symbology: it classifies a
//! string as code set C (digits) or code set B (printable ASCII). There are no
//! start/stop symbols and no code-set switching, and `checksum` is not the
//! standard mod-103 check symbol.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const PRINTABLE_MIN: u32 = 32;
const PRINTABLE_MAX: u32 = 126;
const CHECKSUM_MODULUS: u64 = 103;
const MIN_LENGTH: usize = 2;

/// Code set a valid barcode string falls into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbology {
    #[serde(rename = "Code128-B")]
    Code128B,
    #[serde(rename = "Code128-C")]
    Code128C,
}

impl Symbology {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbology::Code128B => "Code128-B",
            Symbology::Code128C => "Code128-C",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Numeric,
    Text,
}

impl DataFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::Numeric => "numeric",
            DataFormat::Text => "text",
        }
    }
}

/// Details of an accepted barcode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedBarcode {
    pub symbology: Symbology,
    pub length: usize,
    pub format: DataFormat,
}

/// Outcome of validating one string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub data: String,
    pub verdict: Result<DecodedBarcode, ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_ok()
    }

    pub fn symbology(&self) -> Option<Symbology> {
        self.verdict.as_ref().ok().map(|d| d.symbology)
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.verdict.as_ref().err().copied()
    }
}

/// Visual encoding of a barcode string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBarcode {
    pub original: String,
    pub encoded: String,
    pub checksum: u8,
}

pub fn validate(input: &str) -> ValidationResult {
    let verdict = classify(input);
    if let Err(error) = &verdict {
        tracing::trace!(input, %error, "Barcode rejected");
    }

    ValidationResult {
        data: input.to_string(),
        verdict,
    }
}

/// Same as [`validate`]; a "decode" here never looks past the string itself
pub fn decode(input: &str) -> ValidationResult {
    validate(input)
}

fn classify(input: &str) -> Result<DecodedBarcode, ValidationError> {
    let length = input.chars().count();
    if length < MIN_LENGTH {
        return Err(ValidationError::TooShort);
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        return Ok(DecodedBarcode {
            symbology: Symbology::Code128C,
            length,
            format: DataFormat::Numeric,
        });
    }

    if is_printable_ascii(input) {
        return Ok(DecodedBarcode {
            symbology: Symbology::Code128B,
            length,
            format: DataFormat::Text,
        });
    }

    Err(ValidationError::InvalidCharacters)
}

pub fn is_printable_ascii(input: &str) -> bool {
    input
        .chars()
        .all(|c| (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&(c as u32)))
}

/// Sum of `code point * 1-based position`, modulo 103
pub fn checksum(data: &str) -> u8 {
    let sum = data
        .chars()
        .enumerate()
        .fold(0u64, |acc, (i, c)| (acc + c as u64 * (i as u64 + 1)) % CHECKSUM_MODULUS);
    sum as u8
}

/// Returns `None` if any character falls outside printable ASCII
pub fn encode(data: &str) -> Option<EncodedBarcode> {
    if !is_printable_ascii(data) {
        return None;
    }

    Some(EncodedBarcode {
        original: data.to_string(),
        encoded: data.to_string(),
        checksum: checksum(data),
    })
}
