use std::fs::File;
use std::io::{Write, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use anyhow::{Result, Context, anyhow};
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://api.harvardartmuseums.org/object";
pub const DEFAULT_DB_PATH: &str = "artifacts.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const KEY_API_KEY: &str = "HARVARD_API_KEY";
const KEY_ENDPOINT: &str = "HARVARD_API_ENDPOINT";
const KEY_DB_PATH: &str = "ARTIFACT_DB_PATH";
const KEY_TIMEOUT: &str = "HARVARD_TIMEOUT_SECS";

const KEYS: [&str; 4] = [KEY_API_KEY, KEY_ENDPOINT, KEY_DB_PATH, KEY_TIMEOUT];

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub db_path: String,
    pub timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppSettings {
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured. Set {} in the environment or the env file, or pass --api-key.",
                    KEY_API_KEY
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            KEY_API_KEY => self.api_key = Some(value.to_string()),
            KEY_ENDPOINT => self.endpoint = value.to_string(),
            KEY_DB_PATH => self.db_path = value.to_string(),
            KEY_TIMEOUT => {
                self.timeout_secs = value.parse().with_context(|| {
                    format!("{} must be a number of seconds, got '{}'", KEY_TIMEOUT, value)
                })?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Main entry point to resolve settings.
/// Defaults, then the env file (if present), then process environment variables.
pub fn load_settings(env_path: &Path) -> Result<AppSettings> {
    load_settings_with(env_path, |key| std::env::var(key).ok())
}

fn load_settings_with<F>(env_path: &Path, lookup: F) -> Result<AppSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = AppSettings::default();

    // 1. Env file
    if env_path.exists() {
        for (key, value) in load_from_env(env_path)? {
            settings.apply(&key, &value)?;
        }
        info!("Loaded settings from {:?}", env_path);
    } else {
        debug!("No env file at {:?}, using defaults", env_path);
    }

    // 2. Process environment wins over the file
    for key in KEYS {
        if let Some(value) = lookup(key) {
            debug!("Overriding {} from environment", key);
            settings.apply(key, value.trim())?;
        }
    }

    Ok(settings)
}

fn load_from_env(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reader = BufReader::new(file);

    let mut pairs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            pairs.push((key.trim().to_string(), value.to_string()));
        }
    }

    Ok(pairs)
}

pub fn save_to_env(path: &Path, settings: &AppSettings) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    writeln!(file, "# artifact-harvest settings")?;
    writeln!(file, "{}={}", KEY_API_KEY, settings.api_key.as_deref().unwrap_or(""))?;
    writeln!(file, "{}={}", KEY_ENDPOINT, settings.endpoint)?;
    writeln!(file, "{}={}", KEY_DB_PATH, settings.db_path)?;
    writeln!(file, "{}={}", KEY_TIMEOUT, settings.timeout_secs)?;
    Ok(())
}
