use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifies a monitored metric: a name plus a flat tag map.
///
/// Tags are what the model service matches detector mappings against, so
/// they are part of the key's identity, not decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricKey {
    pub name: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl MetricKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: HashMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// A single metric observation: epoch-second timestamp plus value.
///
/// Observations for a given detector must arrive in time order. The core
/// does not validate ordering; out-of-order delivery silently corrupts the
/// running statistics of any stateful detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: i64,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}
