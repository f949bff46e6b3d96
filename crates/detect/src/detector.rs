//! The common detector contract.

use driftwatch_core::{AnomalyResult, DetectorUuid, Observation};

/// An online anomaly detector bound to a single detector UUID.
///
/// Each instance owns its running statistics exclusively. `classify` is a
/// short, CPU-bound computation that updates that state exactly once per
/// observation; two concurrent calls on the same instance corrupt it. The
/// surrounding dispatch layer must deliver each detector's observations as
/// one ordered sequence (see [`crate::source::DetectorSource`], which hands
/// out per-detector mutex handles for exactly this reason).
pub trait Detector: Send {
    /// UUID of the configuration document this detector was built from.
    fn uuid(&self) -> DetectorUuid;

    /// Registry type string this detector was built as, e.g. `"ewma"`.
    fn name(&self) -> &'static str;

    /// Classify one observation, updating the running statistics.
    fn classify(&mut self, obs: &Observation) -> AnomalyResult;
}
