//! Cached descriptive statistics of a temperature series.
//!
//! [`Processor`] borrows one immutable [`TemperatureSeries`] and memoizes
//! every derived metric per argument set, so repeated requests (including the
//! ones issued while assembling the [`ResultTable`]) are computed once.

use crate::cache::CallCache;
use crate::error::ProcessingError;
use crate::series::TemperatureSeries;
use crate::stats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Rolling mean window used by [`Processor::process`].
pub const DEFAULT_WINDOW: usize = 7;

/// Shortest series any operation accepts.
const MIN_LEN: usize = 2;

/// A local maximum or minimum of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub index: usize,
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Sparse local extrema; positions that are neither are absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Extrema {
    pub maxima: Vec<Extremum>,
    pub minima: Vec<Extremum>,
}

/// One row of the result table, aligned with one input date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub date: NaiveDate,
    pub temperature: f64,
    pub moving_average: Option<f64>,
    pub differential: Option<f64>,
    /// Autocorrelation at lag equal to this row's position, not a per-date value.
    pub autocorrelation: Option<f64>,
    pub maxima: Option<f64>,
    pub minima: Option<f64>,
}

/// Temperature and every derived metric, one row per input date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub window: usize,
    pub rows: Vec<Row>,
}

/// Metric operations and their caches.
///
/// Kept apart from the table cache so a table can be assembled from cached
/// metrics while its own cache entry is being filled.
struct SeriesMetrics<'s> {
    series: &'s TemperatureSeries,
    moving_averages: CallCache<usize, Vec<Option<f64>>>,
    differentials: CallCache<(), Vec<Option<f64>>>,
    autocorrelations: CallCache<usize, Option<f64>>,
    extrema: CallCache<(), Extrema>,
}

impl<'s> SeriesMetrics<'s> {
    fn new(series: &'s TemperatureSeries) -> Self {
        Self {
            series,
            moving_averages: CallCache::new(),
            differentials: CallCache::new(),
            autocorrelations: CallCache::new(),
            extrema: CallCache::new(),
        }
    }

    fn moving_average(&mut self, window: usize) -> Result<&[Option<f64>], ProcessingError> {
        let series = self.series;
        let vals = self.moving_averages.get_or_try_insert_with(window, || {
            require_len(series, MIN_LEN)?;
            if window == 0 {
                return Err(ProcessingError::invalid_argument(
                    "window must be a positive integer, but is 0",
                ));
            }
            log::debug!("computing moving average with window {window}");
            Ok(stats::rolling_mean(series.temperatures(), window))
        })?;
        Ok(vals.as_slice())
    }

    fn differential(&mut self) -> Result<&[Option<f64>], ProcessingError> {
        let series = self.series;
        let vals = self.differentials.get_or_try_insert_with((), || {
            require_len(series, MIN_LEN)?;
            log::debug!("computing differential");
            Ok(stats::differential(series.temperatures()))
        })?;
        Ok(vals.as_slice())
    }

    fn autocorrelation(&mut self, lag: usize) -> Result<Option<f64>, ProcessingError> {
        let series = self.series;
        let val = self.autocorrelations.get_or_try_insert_with(lag, || {
            require_len(series, MIN_LEN)?;
            let n_vals = series.len();
            if lag >= n_vals {
                return Err(ProcessingError::invalid_argument(format!(
                    "lag must be less than the series length {n_vals}, but is {lag}"
                )));
            }
            log::debug!("computing autocorrelation at lag {lag}");
            Ok(stats::autocorrelation(series.temperatures(), lag))
        })?;
        Ok(*val)
    }

    fn extrema(&mut self) -> Result<&Extrema, ProcessingError> {
        let series = self.series;
        self.extrema.get_or_try_insert_with((), || {
            require_len(series, MIN_LEN)?;
            log::debug!("computing local extrema");
            let (i_maxima, i_minima) = stats::local_extrema(series.temperatures());
            let to_extremum = |index: usize| Extremum {
                index,
                date: series.dates()[index],
                temperature: series.temperatures()[index],
            };
            Ok(Extrema {
                maxima: i_maxima.into_iter().map(to_extremum).collect(),
                minima: i_minima.into_iter().map(to_extremum).collect(),
            })
        })
    }

    fn build_table(&mut self, window: usize) -> Result<ResultTable, ProcessingError> {
        let series = self.series;
        require_len(series, MIN_LEN)?;
        let n_rows = series.len();

        let moving_average = self.moving_average(window)?.to_vec();
        let differential = self.differential()?.to_vec();
        let autocorrelation = Autocorrelations::new(self).collect::<Result<Vec<_>, _>>()?;
        if autocorrelation.iter().all(Option::is_none) {
            log::warn!("series is constant, autocorrelation is undefined at every lag");
        }

        let extrema = self.extrema()?;
        let mut maxima = vec![None; n_rows];
        for ext in &extrema.maxima {
            maxima[ext.index] = Some(ext.temperature);
        }
        let mut minima = vec![None; n_rows];
        for ext in &extrema.minima {
            minima[ext.index] = Some(ext.temperature);
        }

        let rows = (0..n_rows)
            .map(|i_row| Row {
                date: series.dates()[i_row],
                temperature: series.temperatures()[i_row],
                moving_average: moving_average[i_row],
                differential: differential[i_row],
                autocorrelation: autocorrelation[i_row],
                maxima: maxima[i_row],
                minima: minima[i_row],
            })
            .collect();

        Ok(ResultTable { window, rows })
    }
}

fn require_len(series: &TemperatureSeries, required: usize) -> Result<(), ProcessingError> {
    let actual = series.len();
    if actual < required {
        return Err(ProcessingError::InsufficientData { required, actual });
    }
    Ok(())
}

/// Derived statistics of one temperature series.
///
/// Every operation is memoized per argument set for the lifetime of the
/// processor. Failed calls are not memoized.
pub struct Processor<'s> {
    metrics: SeriesMetrics<'s>,
    tables: CallCache<usize, ResultTable>,
}

impl<'s> Processor<'s> {
    pub fn new(series: &'s TemperatureSeries) -> Self {
        Self {
            metrics: SeriesMetrics::new(series),
            tables: CallCache::new(),
        }
    }

    /// Rolling mean over `window` values, `None` until the window is full.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero window, `InsufficientData` for series
    /// shorter than two values.
    pub fn moving_average(&mut self, window: usize) -> Result<&[Option<f64>], ProcessingError> {
        self.metrics.moving_average(window)
    }

    /// First difference, `None` at the first position.
    pub fn differential(&mut self) -> Result<&[Option<f64>], ProcessingError> {
        self.metrics.differential()
    }

    /// Autocorrelation at `lag`, `None` for a constant series.
    ///
    /// # Errors
    /// `InvalidArgument` if `lag` is not less than the series length.
    pub fn autocorrelation(&mut self, lag: usize) -> Result<Option<f64>, ProcessingError> {
        self.metrics.autocorrelation(lag)
    }

    /// Strict local maxima and minima, excluding the endpoints.
    pub fn extrema(&mut self) -> Result<&Extrema, ProcessingError> {
        self.metrics.extrema()
    }

    /// Autocorrelation at every lag from 0 to `len - 1`, computed lazily.
    ///
    /// Each call starts a new pass; lags already computed come from the cache.
    pub fn autocorrelations(&mut self) -> Autocorrelations<'_, 's> {
        Autocorrelations::new(&mut self.metrics)
    }

    /// Result table with the default rolling mean window.
    pub fn process(&mut self) -> Result<&ResultTable, ProcessingError> {
        self.process_with_window(DEFAULT_WINDOW)
    }

    /// Result table with every metric aligned to the input dates.
    ///
    /// The autocorrelation column holds the value at lag `i` on row `i`.
    pub fn process_with_window(&mut self, window: usize) -> Result<&ResultTable, ProcessingError> {
        let Self { metrics, tables } = self;
        tables.get_or_try_insert_with(window, || metrics.build_table(window))
    }
}

/// Lazy pass over the autocorrelation of every lag.
///
/// Yields exactly one item per lag and then stops for good.
pub struct Autocorrelations<'p, 's> {
    metrics: &'p mut SeriesMetrics<'s>,
    next_lag: usize,
    n_lags: usize,
}

impl<'p, 's> Autocorrelations<'p, 's> {
    fn new(metrics: &'p mut SeriesMetrics<'s>) -> Self {
        let n_lags = metrics.series.len();
        Self {
            metrics,
            next_lag: 0,
            n_lags,
        }
    }
}

impl Iterator for Autocorrelations<'_, '_> {
    type Item = Result<Option<f64>, ProcessingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_lag >= self.n_lags {
            return None;
        }
        let lag = self.next_lag;
        self.next_lag += 1;
        Some(self.metrics.autocorrelation(lag))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_lags - self.next_lag;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Autocorrelations<'_, '_> {}

impl FusedIterator for Autocorrelations<'_, '_> {}
