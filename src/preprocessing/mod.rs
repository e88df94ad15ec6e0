//! Image preprocessing applied to card photos before OCR.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessingResult, Preset, StepTiming};
