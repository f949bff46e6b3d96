pub mod anomaly;
pub mod config;
pub mod document;
pub mod metric;

pub use anomaly::*;
pub use config::{Config, ModelStoreConfig, SourceConfig};
pub use document::*;
pub use metric::*;
