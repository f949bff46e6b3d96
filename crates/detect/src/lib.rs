//! Online anomaly detection engines for streaming metrics.
//!
//! This crate provides:
//! - Six incremental statistical detectors behind a common [`Detector`]
//!   contract: constant threshold, EWMA, PEWMA, CUSUM, Shewhart individuals
//!   control chart, and Holt-Winters triple exponential smoothing
//! - Point/interval forecaster strategies plus a generic forecasting
//!   detector used by the legacy configuration namespace
//! - A type-keyed [`factory::DetectorRegistry`] that turns persisted
//!   configuration documents into validated detector instances
//! - A caching [`source::DetectorSource`] that memoizes one live detector
//!   per UUID over a model-store client

pub mod algo;
pub mod classifier;
pub mod detector;
pub mod error;
pub mod factory;
pub mod filter;
pub mod forecast;
pub mod mapper;
pub mod schema;
pub mod source;
pub mod stats;

pub use detector::Detector;
pub use error::{DetectorError, Result};
