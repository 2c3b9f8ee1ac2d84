use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::AppError;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub api_base: String,
}

// Keep the credential out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl LLMConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Settings read from the agent configuration file (`config.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub system_prompt: String,
}

impl AgentConfig {
    /// Load the agent configuration file. Missing file or missing `system_prompt`
    /// are both errors; there is no default prompt.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = ::config::File::from(path)
            .format(::config::FileFormat::Json)
            .required(true);

        let settings = ::config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let system_prompt = settings.get_string("system_prompt").map_err(|e| {
            AppError::Config(format!("{} has no usable `system_prompt`: {}", path.display(), e))
        })?;

        Ok(Self { system_prompt })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let agent_config_path =
            env::var("AGENT_CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string());

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                upload_dir: env::var("UPLOAD_FOLDER")
                    .unwrap_or_else(|_| "uploads".to_string())
                    .into(),
                static_dir: env::var("STATIC_DIR")
                    .unwrap_or_else(|_| "static".to_string())
                    .into(),
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
            },
            llm: LLMConfig {
                api_key: env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
                temperature: env::var("TEMPERATURE")
                    .unwrap_or_else(|_| "0.3".to_string())
                    .parse()
                    .context("TEMPERATURE must be a floating point number")?,
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            },
            agent: AgentConfig::load(Path::new(&agent_config_path))?,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
