use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub images: ImageConfig,
}

/// Simulated latency of the in-memory user store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Delay before `list` answers, in milliseconds (default: 1000).
    #[serde(default = "default_list_latency")]
    pub list_latency_ms: u64,
    /// Delay before add/remove/clear answer, in milliseconds (default: 500).
    #[serde(default = "default_mutation_latency")]
    pub mutation_latency_ms: u64,
}

/// How repository-backed intents are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Every repository call runs in its own task. Completions race:
    /// the last one to finish wins the user list and clears the
    /// loading flag even while other calls are still in flight.
    #[default]
    Concurrent,
    /// Repository calls run one at a time, in submission order, on a
    /// single worker task. The loading flag stays set until the queue
    /// drains.
    Serialized,
}

/// Intent dispatcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub mode: DispatchMode,
    /// Dispatch `LoadUsers` as soon as the dispatcher is built (default: true).
    #[serde(default = "default_load_on_start")]
    pub load_on_start: bool,
}

/// Where captured and attached photos are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Directory for saved images. Defaults to the platform cache dir.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

fn default_list_latency() -> u64 {
    1000
}

fn default_mutation_latency() -> u64 {
    500
}

fn default_load_on_start() -> bool {
    true
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            list_latency_ms: default_list_latency(),
            mutation_latency_ms: default_mutation_latency(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            load_on_start: default_load_on_start(),
        }
    }
}

impl ImageConfig {
    /// Configured directory, or `<cache dir>/userdesk/images`.
    ///
    /// Falls back to the current directory if no cache dir is known.
    pub fn resolved_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("userdesk")
                .join("images")
        })
    }
}
