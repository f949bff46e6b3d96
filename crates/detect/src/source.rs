//! Detector lookup: model store client plus per-UUID instance cache.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use driftwatch_core::{DetectorDocument, DetectorUuid, MetricKey, ModelStoreConfig};
use lru::LruCache;
use tracing::{debug, info};

use crate::detector::Detector;
use crate::error::{DetectorError, Result};
use crate::factory::DetectorRegistry;

/// Handle to a cached detector instance.
///
/// The mutex is the single-writer discipline: whoever classifies locks the
/// detector for the duration of the call, so per-algorithm state is never
/// mutated concurrently. The cache's own lock is only ever held for
/// lookup/insert, never across a classification.
pub type SharedDetector = Arc<Mutex<Box<dyn Detector>>>;

/// Read access to persisted detector documents and metric mappings.
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn find_detector_document(&self, uuid: DetectorUuid) -> Result<DetectorDocument>;

    /// UUIDs of the detectors mapped to a metric's tags.
    async fn find_detector_mappings(&self, metric: &MetricKey) -> Result<Vec<DetectorUuid>>;
}

/// HTTP model-store client.
pub struct HttpModelStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpModelStore {
    pub fn new(config: &ModelStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ModelStore for HttpModelStore {
    async fn find_detector_document(&self, uuid: DetectorUuid) -> Result<DetectorDocument> {
        let url = format!("{}/api/v2/detectors/{}", self.base_url, uuid);
        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DetectorError::DocumentNotFound(uuid));
        }
        let document = response.error_for_status()?.json().await?;
        Ok(document)
    }

    async fn find_detector_mappings(&self, metric: &MetricKey) -> Result<Vec<DetectorUuid>> {
        let url = format!("{}/api/detector-mappings/search", self.base_url);
        let uuids = self
            .client
            .post(&url)
            .json(&metric.tags)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(uuids)
    }
}

/// Caches built detector instances by UUID, delegating misses to the model
/// store and the registry.
///
/// Guarantees at most one live detector instance per UUID within a process.
/// There is no cross-process consistency: each process builds and mutates
/// its own copy of detector state, which is acceptable as long as the
/// surrounding transport routes each metric to exactly one process.
pub struct DetectorSource {
    registry: DetectorRegistry,
    store: Arc<dyn ModelStore>,
    cache: Mutex<LruCache<DetectorUuid, SharedDetector>>,
}

impl DetectorSource {
    pub fn new(registry: DetectorRegistry, store: Arc<dyn ModelStore>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            registry,
            store,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Find or build the detector for a UUID, memoized.
    pub async fn find_detector(&self, uuid: DetectorUuid) -> Result<SharedDetector> {
        if let Some(detector) = self.cache.lock().unwrap().get(&uuid) {
            debug!("Detector cache hit: {}", uuid);
            return Ok(Arc::clone(detector));
        }

        info!("Detector cache miss: {} — fetching document", uuid);
        let document = self.store.find_detector_document(uuid).await?;
        let detector: SharedDetector = Arc::new(Mutex::new(self.registry.build(&document)?));

        // Another task may have built the same detector while we fetched;
        // the first insert wins so a UUID never has two live instances.
        let mut cache = self.cache.lock().unwrap();
        if let Some(existing) = cache.get(&uuid) {
            return Ok(Arc::clone(existing));
        }
        cache.put(uuid, Arc::clone(&detector));
        Ok(detector)
    }

    /// Detectors mapped to a metric, resolved through the model store.
    pub async fn find_detectors_for(&self, metric: &MetricKey) -> Result<Vec<SharedDetector>> {
        let uuids = self.store.find_detector_mappings(metric).await?;
        let mut detectors = Vec::with_capacity(uuids.len());
        for uuid in uuids {
            detectors.push(self.find_detector(uuid).await?);
        }
        Ok(detectors)
    }

    /// Drop a cached instance, discarding its running state. The next
    /// lookup rebuilds from the (possibly updated) document.
    pub fn evict(&self, uuid: DetectorUuid) {
        if self.cache.lock().unwrap().pop(&uuid).is_some() {
            info!("Evicted detector: {}", uuid);
        }
    }
}
