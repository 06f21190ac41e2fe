use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_LOG_LEVEL: &str = "info";

/// `KEY=VALUE` settings file. Lookups fall back to the process environment.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the environment variable of the same name.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
            .or_else(|| env::var(key).ok())
            .filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Show the day when no subcommand is given.
    Cli,
    /// Start listening when no subcommand is given.
    Listen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSettings {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub run_mode: RunMode,
}

impl PlannerSettings {
    pub fn resolve(config: &AppConfig) -> Self {
        let run_mode = match config.lookup("RUN_MODE").as_deref() {
            Some("listen") => RunMode::Listen,
            Some("cli") | None => RunMode::Cli,
            Some(other) => {
                eprintln!("Invalid run mode {}, using cli", other);
                RunMode::Cli
            }
        };
        Self {
            data_dir: PathBuf::from(
                config
                    .lookup("DATA_DIR")
                    .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            ),
            log_level: config
                .lookup("LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_dir: config.lookup("LOG_DIR").map(PathBuf::from),
            run_mode,
        }
    }
}
