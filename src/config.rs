use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Verb used for `/appointments/{id}` updates. The backend decides which one it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMethod {
    #[default]
    Put,
    Patch,
}

impl UpdateMethod {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PUT" => Some(UpdateMethod::Put),
            "PATCH" => Some(UpdateMethod::Patch),
            _ => None,
        }
    }
}

/// Raw `KEY=VALUE` pairs from a config file, with environment fallback.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::Parse {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// File value first, then the process environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let api_url = self
            .get("API_URL")
            .ok_or(ConfigError::Missing("API_URL"))?
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "API_URL",
                value: api_url,
            });
        }

        let update_method = match self.get("UPDATE_METHOD") {
            Some(raw) => UpdateMethod::parse(&raw).ok_or(ConfigError::Invalid {
                key: "UPDATE_METHOD",
                value: raw,
            })?,
            None => UpdateMethod::default(),
        };

        let timezone = match self.get("TIMEZONE") {
            Some(raw) => raw.trim().parse::<Tz>().map_err(|_| ConfigError::Invalid {
                key: "TIMEZONE",
                value: raw,
            })?,
            None => Tz::UTC,
        };

        let timeout_secs = match self.get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Settings {
            api_url,
            update_method,
            timezone,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted { &value[1..value.len() - 1] } else { value }
}

/// Validated settings every component reads from.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub update_method: UpdateMethod,
    pub timezone: Tz,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            update_method: UpdateMethod::default(),
            timezone: Tz::UTC,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
