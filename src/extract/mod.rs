//! Field extraction from identity card OCR text.
//!
//! Each field has its own heuristic behind its own function so that patterns
//! can be tuned independently. None of them fail: a field that cannot be found
//! comes back as an empty string.

pub mod patterns;

use serde::{Deserialize, Serialize};

use patterns::{ADDRESS_LINE, CARD_NUMBER, DATE_OF_BIRTH, HOLDER_NAME};

/// Fields recognized on an identity card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Card number, "dddd dddd dddd".
    pub number: String,
    /// Holder name.
    pub name: String,
    /// Date of birth, "DD/MM/YYYY".
    pub dob: String,
    /// Address lines joined with single spaces.
    pub address: String,
}

/// Build a record from the OCR text of both card sides.
///
/// Number, name and date of birth come from the front side; the address comes
/// from the back side.
pub fn extract(front_text: &str, back_text: &str) -> ExtractedRecord {
    ExtractedRecord {
        number: extract_number(front_text),
        name: extract_name(front_text),
        dob: extract_dob(front_text),
        address: extract_address(back_text),
    }
}

/// First "dddd dddd dddd" group in the text, verbatim.
pub fn extract_number(text: &str) -> String {
    CARD_NUMBER
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Capitalized words following a "To" prefix.
pub fn extract_name(text: &str) -> String {
    HOLDER_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First "DD/MM/YYYY" in the text. The date is not validated.
pub fn extract_dob(text: &str) -> String {
    DATE_OF_BIRTH
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Lines carrying an address keyword or a 6-digit postal code, in input order.
pub fn extract_address(text: &str) -> String {
    text.split('\n')
        .filter(|line| ADDRESS_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
