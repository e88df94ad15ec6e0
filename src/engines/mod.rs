//! OCR engine implementations
//!
//! Engines are conditionally compiled based on feature flags. The server holds
//! exactly one of them for its lifetime.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

#[cfg(any(feature = "engine-ocrs", feature = "engine-leptess"))]
mod download;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::sync::Arc;

/// Names of the engines compiled into this binary, in preference order
pub fn available() -> Vec<&'static str> {
    let mut names = Vec::new();

    #[cfg(feature = "engine-ocrs")]
    names.push("ocrs");

    #[cfg(feature = "engine-leptess")]
    names.push("leptess");

    names
}

/// Initialize the engine requested in the config, or the first available one
pub fn create(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let names = available();
    let name = match config.engine.as_deref() {
        Some(requested) => names
            .iter()
            .copied()
            .find(|n| n.eq_ignore_ascii_case(requested))
            .ok_or_else(|| {
                OcrError::InitializationError(format!(
                    "Engine '{}' is not available (compiled engines: {})",
                    requested,
                    names.join(", ")
                ))
            })?,
        None => names.first().copied().ok_or_else(|| {
            OcrError::InitializationError(
                "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess".to_string(),
            )
        })?,
    };

    tracing::info!("Initializing {} engine...", name);
    init(name, config)
}

fn init(name: &str, config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    // `config` is unused when no engine feature is enabled
    let _ = config;
    match name {
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => Ok(Arc::new(ocrs::OcrsEngine::new(config)?)),
        #[cfg(feature = "engine-leptess")]
        "leptess" => Ok(Arc::new(leptess::LeptessEngine::new(config)?)),
        other => Err(OcrError::InitializationError(format!(
            "Unknown engine '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_engine_is_rejected() {
        let config = Config {
            engine: Some("paddle".to_string()),
            ..Config::default()
        };

        let err = create(&config).err().expect("engine should be rejected");
        assert!(matches!(err, OcrError::InitializationError(_)));
        assert!(err.to_string().contains("paddle"));
    }

    #[cfg(feature = "engine-ocrs")]
    #[test]
    fn test_ocrs_is_preferred_when_compiled() {
        assert_eq!(available().first(), Some(&"ocrs"));
    }
}
