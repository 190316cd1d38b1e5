//! Descriptive statistics of a daily temperature time series.
//!
//! A [`Processor`] wraps one [`TemperatureSeries`] and computes, each at most
//! once per argument set:
//! - rolling mean
//! - first difference
//! - lag autocorrelation (single lag or a lazy pass over all lags)
//! - strict local maxima and minima
//!
//! [`Processor::process`] aligns all of them in one [`ResultTable`], which
//! [`data::save_table`] exports as CSV or MessagePack.

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod manager;
pub mod processor;
pub mod series;
pub mod stats;
mod utils;

pub use cache::CallCache;
pub use config::Config;
pub use error::ProcessingError;
pub use processor::{Autocorrelations, Extrema, Extremum, Processor, ResultTable, Row};
pub use series::TemperatureSeries;
