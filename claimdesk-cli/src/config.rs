use anyhow::{Context, Result};
use claimdesk_engine::{CounterpartyRates, DEFAULT_ANNUAL_RATE, EngineConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".claimdesk";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub interest: InterestSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestSection {
    #[serde(default = "default_annual_rate")]
    pub default_annual_rate: f64,
    /// Agreed annual rates keyed by counterparty name
    #[serde(default)]
    pub counterparty_rates: BTreeMap<String, f64>,
}

fn default_annual_rate() -> f64 {
    DEFAULT_ANNUAL_RATE
}

impl Default for InterestSection {
    fn default() -> Self {
        Self {
            default_annual_rate: DEFAULT_ANNUAL_RATE,
            counterparty_rates: BTreeMap::new(),
        }
    }
}

impl InterestSection {
    pub fn rate_provider(&self) -> CounterpartyRates {
        let mut rates = CounterpartyRates::new(self.default_annual_rate);
        for (cpty, rate) in &self.counterparty_rates {
            rates.insert(cpty, *rate);
        }
        rates
    }
}

fn config_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(CONFIG_DIR))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Explicit path if given, else `~/.claimdesk/config.toml`
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load config; a missing file yields defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let dir = config_dir()?;
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
            dir.join(CONFIG_FILE)
        }
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
