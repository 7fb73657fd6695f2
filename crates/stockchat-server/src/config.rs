//! Server configuration
//!
//! Everything comes from the environment (after an optional `.env` load in
//! `main`). The model credential is resolved from `OPENAI_API_KEY` or,
//! failing that, from a local key file; having neither is fatal at startup.

use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use stockchat_llm::OpenAiConfig;

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_KEY_FILE: &str = "API_KEY";
const DEFAULT_CHART_DIR: &str = "charts";
const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Runtime configuration for the stockchat server
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to listen on (`STOCKCHAT_ADDR`)
    pub listen_addr: SocketAddr,

    /// Model used for both completion rounds (`OPENAI_MODEL`)
    pub model: String,

    /// Model API credential, base URL, and timeout
    pub llm: OpenAiConfig,

    /// Directory for rendered chart artifacts (`STOCKCHAT_CHART_DIR`)
    pub chart_dir: PathBuf,

    /// CORS origin allow-list (`STOCKCHAT_ALLOWED_ORIGINS`, comma-separated)
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = env::var("STOCKCHAT_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .context("invalid STOCKCHAT_ADDR")?;

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let mut llm = match OpenAiConfig::from_env() {
            Ok(cfg) => cfg,
            Err(_) => {
                let key_file = env::var("OPENAI_API_KEY_FILE")
                    .unwrap_or_else(|_| DEFAULT_KEY_FILE.to_string());
                let mut cfg = OpenAiConfig::from_key_file(&key_file).with_context(|| {
                    format!(
                        "model API credential missing: set OPENAI_API_KEY or provide the key file {key_file}"
                    )
                })?;
                if let Ok(base) = env::var("OPENAI_API_BASE") {
                    cfg = cfg.with_api_base(base);
                }
                cfg
            }
        };
        if let Ok(secs) = env::var("STOCKCHAT_TIMEOUT_SECS") {
            llm = llm.with_timeout(secs.parse().context("invalid STOCKCHAT_TIMEOUT_SECS")?);
        }

        let chart_dir = env::var("STOCKCHAT_CHART_DIR")
            .unwrap_or_else(|_| DEFAULT_CHART_DIR.to_string())
            .into();

        let allowed_origins = env::var("STOCKCHAT_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ORIGIN.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            model,
            llm,
            chart_dir,
            allowed_origins,
        })
    }
}
