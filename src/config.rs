use crate::defaults;
use crate::error::{RecapError, Result};
use crate::transcribe::SplitPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub transcription: TranscriptionConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

/// Backend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Transcription and splitting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: String,
    pub max_chunk_bytes: usize,
    pub min_chunk_count: usize,
    pub max_split_depth: u8,
}

/// Text-generation configuration for the analysis stages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
}

/// Artifact output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: defaults::TRANSCRIPTION_MODEL.to_string(),
            max_chunk_bytes: defaults::MAX_CHUNK_BYTES,
            min_chunk_count: defaults::MIN_CHUNK_COUNT,
            max_split_depth: defaults::MAX_SPLIT_DEPTH,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: defaults::GENERATION_MODEL.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RecapError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                RecapError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing; invalid TOML is still
    /// an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(RecapError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - RECAP_BASE_URL → api.base_url
    /// - RECAP_TRANSCRIPTION_MODEL → transcription.model
    /// - RECAP_GENERATION_MODEL → generation.model
    /// - RECAP_OUTPUT_DIR → output.dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("RECAP_BASE_URL")
            && !base_url.is_empty()
        {
            self.api.base_url = base_url;
        }

        if let Ok(model) = std::env::var("RECAP_TRANSCRIPTION_MODEL")
            && !model.is_empty()
        {
            self.transcription.model = model;
        }

        if let Ok(model) = std::env::var("RECAP_GENERATION_MODEL")
            && !model.is_empty()
        {
            self.generation.model = model;
        }

        if let Ok(dir) = std::env::var("RECAP_OUTPUT_DIR")
            && !dir.is_empty()
        {
            self.output.dir = PathBuf::from(dir);
        }

        self
    }

    /// Reject configuration values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.transcription.max_chunk_bytes == 0 {
            return Err(RecapError::ConfigInvalidValue {
                key: "transcription.max_chunk_bytes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.transcription.min_chunk_count == 0 {
            return Err(RecapError::ConfigInvalidValue {
                key: "transcription.min_chunk_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The splitting policy described by this configuration.
    pub fn split_policy(&self) -> SplitPolicy {
        SplitPolicy {
            max_chunk_bytes: self.transcription.max_chunk_bytes,
            min_chunk_count: self.transcription.min_chunk_count,
            max_split_depth: self.transcription.max_split_depth,
        }
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/recap/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("recap")
            .join("config.toml")
    }
}
