use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::assistant_core::DEFAULT_MAX_LENGTH;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3030";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Host and port browsers use to reach the websocket endpoint.
    pub reachable_addr: String,
    pub model: String,
    pub api_base: Option<String>,
    pub max_length: u16,
    pub generation_timeout: Duration,
    /// Replaces the built-in knowledge table when set.
    pub knowledge_path: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Config> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr: SocketAddr = var("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address such as 127.0.0.1:3030")?;
        let reachable_addr = var("REACHABLE_ADDR").unwrap_or_else(|| listen_addr.to_string());

        let max_length = match var("MAX_LENGTH") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("MAX_LENGTH must be a number up to 65535, got '{value}'"))?,
            None => DEFAULT_MAX_LENGTH as u16,
        };
        if max_length == 0 {
            bail!("MAX_LENGTH must be greater than zero");
        }

        let timeout_secs = match var("GENERATION_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .with_context(|| format!("GENERATION_TIMEOUT_SECS must be a number, got '{value}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("GENERATION_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            listen_addr,
            reachable_addr,
            model: var("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: var("OPENAI_API_BASE"),
            max_length,
            generation_timeout: Duration::from_secs(timeout_secs),
            knowledge_path: var("KNOWLEDGE_PATH").map(PathBuf::from),
        })
    }
}
