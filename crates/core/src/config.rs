use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model_store: ModelStoreConfig,
    pub source: SourceConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            model_store: ModelStoreConfig::from_env(),
            source: SourceConfig::from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  model_store: base_url={}, timeout={}s",
            self.model_store.base_url,
            self.model_store.timeout_secs
        );
        tracing::info!("  source:      cache_capacity={}", self.source.cache_capacity);
    }
}

// ── Model store ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ModelStoreConfig {
    fn from_env() -> Self {
        Self {
            base_url: env_or("MODEL_STORE_URL", "http://localhost:8008"),
            timeout_secs: env_u64("MODEL_STORE_TIMEOUT_SECS", 10),
        }
    }
}

// ── Detector source ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Maximum number of live detector instances kept in the cache.
    pub cache_capacity: u32,
}

impl SourceConfig {
    fn from_env() -> Self {
        Self {
            cache_capacity: env_u32("DETECTOR_CACHE_CAPACITY", 10_000),
        }
    }
}
