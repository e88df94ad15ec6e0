use crate::preprocessing::Preset;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "idcard-ocr-server")]
#[command(about = "Extracts identity card fields from front/back photos")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "OCR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// OCR engine to use ("ocrs" or "leptess"); defaults to the first one compiled in
    #[arg(long, env = "OCR_ENGINE")]
    pub engine: Option<String>,

    /// Language for OCR (Tesseract language code, e.g. "eng")
    #[arg(long, env = "OCR_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Maximum size of each uploaded image in bytes (default: 5MB)
    #[arg(long, env = "OCR_MAX_FILE_SIZE", default_value = "5242880")]
    pub max_file_size: usize,

    /// Preprocessing preset applied before OCR (none, minimal, default)
    #[arg(long, env = "OCR_PREPROCESS", default_value = "default")]
    pub preprocess: Preset,

    /// Allowed CORS origin; repeat or separate with commas. Any origin when unset
    #[arg(long = "cors-origin", env = "OCR_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Path to tessdata directory (downloaded to the cache dir if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub engine: Option<String>,
    pub language: String,
    pub max_file_size: usize,
    pub preprocess: Preset,
    pub cors_origins: Vec<String>,
    pub tessdata_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            engine: None,
            language: "eng".to_string(),
            max_file_size: 5 * 1024 * 1024,
            preprocess: Preset::Default,
            cors_origins: Vec::new(),
            tessdata_path: None,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            engine: args.engine,
            language: args.language,
            max_file_size: args.max_file_size,
            preprocess: args.preprocess,
            cors_origins: args
                .cors_origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            tessdata_path: args.tessdata_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_default() {
        let args = Args::try_parse_from(["idcard-ocr-server"]).unwrap();
        let config = Config::from(args);
        let default = Config::default();

        assert_eq!(config.max_file_size, default.max_file_size);
        assert_eq!(config.preprocess, default.preprocess);
        assert_eq!(config.language, default.language);
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let args = Args::try_parse_from([
            "idcard-ocr-server",
            "--cors-origin",
            "http://localhost:5173, https://example.com",
        ])
        .unwrap();
        let config = Config::from(args);

        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "https://example.com"]
        );
    }

    #[test]
    fn test_preset_is_parsed() {
        let args =
            Args::try_parse_from(["idcard-ocr-server", "--preprocess", "none"]).unwrap();
        assert_eq!(args.preprocess, Preset::None);

        assert!(Args::try_parse_from(["idcard-ocr-server", "--preprocess", "extreme"]).is_err());
    }
}
