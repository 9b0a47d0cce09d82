use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::api::{DEFAULT_API_BASE, DEFAULT_ENTITY_LIMIT};

pub const API_BASE_ENV: &str = "POKEGRID_API_BASE";
pub const DATA_DIR_ENV: &str = "POKEGRID_DATA_DIR";
pub const LOG_ENV: &str = "POKEGRID_LOG";

const STORE_FILE: &str = "state.json";
const LOG_FILE: &str = "pokegrid.log";

/// Command-line values before environment and defaults are applied.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub entity_limit: Option<u32>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub api_base: String,
    pub entity_limit: u32,
    pub data_dir: PathBuf,
}

impl RuntimeConfig {
    /// Flags win over environment, environment over defaults.
    pub fn resolve(overrides: ConfigOverrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = overrides
            .api_base
            .or_else(|| env(API_BASE_ENV))
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let data_dir = overrides
            .data_dir
            .or_else(|| env(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            entity_limit: overrides.entity_limit.unwrap_or(DEFAULT_ENTITY_LIMIT),
            data_dir,
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokegrid")
}

/// Routes `tracing` output to a log file; the terminal belongs to the UI.
/// Logging stays off when the file cannot be opened.
pub fn init_tracing(log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = File::options().create(true).append(true).open(log_path) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}
