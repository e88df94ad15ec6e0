//! Identity card OCR: upload the front and back photos of a card, get back the
//! card number, holder name, date of birth and address.
//!
//! [`extract`] holds the field heuristics and can be used on its own with text
//! from any OCR source. The rest of the crate is the HTTP service around it.

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod extract;
pub mod preprocessing;
pub mod server;

pub use config::{Args, Config};
pub use engine::{OcrEngine, OcrResult};
pub use error::OcrError;
pub use extract::{extract, ExtractedRecord};
