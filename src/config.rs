use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::llm::groq::GROQ_API_BASE;

pub const MISSING_API_KEY: &str =
    "GROQ_API_KEY is missing. Please set it in your environment variables.";

const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";
const DEFAULT_ARXIV_API_BASE: &str = "http://export.arxiv.org/api/query";
const DEFAULT_SERPAPI_BASE: &str = "https://serpapi.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub groq_api_key: String,
    pub api_base: String,
    pub model: String,
}

// Keep the credential out of startup logs.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("groq_api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub arxiv_api_base: String,
    pub serpapi_key: Option<String>,
    pub serpapi_base: String,
    pub scholar_enabled: bool,
    pub topic_expansion: bool,
}

impl SearchConfig {
    /// Scholar needs both the switch and a key.
    pub fn scholar_key(&self) -> Option<&str> {
        if self.scholar_enabled {
            self.serpapi_key.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let flag = |key: &str, default: bool| -> Result<bool> {
            match var(key) {
                Some(v) => v
                    .parse::<bool>()
                    .with_context(|| format!("{} must be true or false, got {:?}", key, v)),
                None => Ok(default),
            }
        };

        let Some(groq_api_key) = var("GROQ_API_KEY") else {
            bail!(MISSING_API_KEY);
        };

        let port: u16 = match var("PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", v))?,
            None => 8501,
        };

        Ok(Self {
            server: ServerConfig {
                port,
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                cors_allowed_origins: var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|| "http://localhost:8501".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            llm: LLMConfig {
                groq_api_key,
                api_base: var("GROQ_API_BASE").unwrap_or_else(|| GROQ_API_BASE.to_string()),
                model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            search: SearchConfig {
                arxiv_api_base: var("ARXIV_API_BASE")
                    .unwrap_or_else(|| DEFAULT_ARXIV_API_BASE.to_string()),
                serpapi_key: var("SERPAPI_API_KEY"),
                serpapi_base: var("SERPAPI_BASE")
                    .unwrap_or_else(|| DEFAULT_SERPAPI_BASE.to_string()),
                scholar_enabled: flag("SCHOLAR_ENABLED", true)?,
                topic_expansion: flag("TOPIC_EXPANSION", true)?,
            },
            logging: LoggingConfig {
                log_dir: var("LOG_DIR").map(PathBuf::from),
            },
        })
    }
}
