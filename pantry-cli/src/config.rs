use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use pantry_core::SweepPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_pantry_home;

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmSection,
    pub sweep: SweepSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// OpenAI-compatible API root; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Prefer the OPENROUTER_API_KEY environment variable over storing it here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "x-ai/grok-4.1-fast:free".to_string(),
            temperature: 0.7,
            max_tokens: 450,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSection {
    pub threshold_days: i64,
    pub hour: u32,
    pub minute: u32,
    /// IANA zone the daily hour is read in.
    pub timezone: String,
}

impl Default for SweepSection {
    fn default() -> Self {
        let policy = SweepPolicy::default();
        Self {
            threshold_days: policy.threshold_days,
            hour: policy.hour,
            minute: policy.minute,
            timezone: "UTC".to_string(),
        }
    }
}

impl SweepSection {
    pub fn policy(&self) -> SweepPolicy {
        SweepPolicy {
            threshold_days: self.threshold_days,
            hour: self.hour,
            minute: self.minute,
        }
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| anyhow!("invalid timezone in config: {}", self.timezone))
    }
}

impl LlmSection {
    /// Environment wins over the config file. `None` means run offline.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.api_key.clone())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pantry_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
