//! Regex patterns for identity card field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 12-digit card number printed in groups of four: "1234 5678 9012"
    pub static ref CARD_NUMBER: Regex = Regex::new(
        r"[0-9]{4}\s[0-9]{4}\s[0-9]{4}"
    ).unwrap();

    // Holder name following the "To" line of the printed address block.
    // Words after the first must stay on the same line.
    pub static ref HOLDER_NAME: Regex = Regex::new(
        r"To\s+([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)"
    ).unwrap();

    // DD/MM/YYYY
    pub static ref DATE_OF_BIRTH: Regex = Regex::new(
        r"[0-9]{2}/[0-9]{2}/[0-9]{4}"
    ).unwrap();

    // Address keywords or a standalone 6-digit postal code.
    // Case folding and word boundaries are ASCII-only, so a non-ASCII letter
    // glued to a keyword still counts as a boundary.
    pub static ref ADDRESS_LINE: Regex = Regex::new(
        r"(?i-u)\b(?:HOUSE|STREET|ROAD|DISTRICT|STATE|PIN|[0-9]{6})\b"
    ).unwrap();
}
