//! Date-indexed temperature series.

use crate::error::ProcessingError;
use chrono::NaiveDate;

/// Daily temperature observations indexed by strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    dates: Vec<NaiveDate>,
    temperatures: Vec<f64>,
}

impl TemperatureSeries {
    /// Build a series from parallel date and temperature columns.
    ///
    /// # Errors
    /// Returns [`ProcessingError::InvalidSeries`] if the columns differ in
    /// length, the dates are not strictly increasing, or a temperature is not
    /// finite.
    pub fn new(dates: Vec<NaiveDate>, temperatures: Vec<f64>) -> Result<Self, ProcessingError> {
        if dates.len() != temperatures.len() {
            return Err(ProcessingError::invalid_series(format!(
                "{} dates but {} temperatures",
                dates.len(),
                temperatures.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ProcessingError::invalid_series(format!(
                "dates must be strictly increasing, but {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        if let Some(i_val) = temperatures.iter().position(|val| !val.is_finite()) {
            return Err(ProcessingError::invalid_series(format!(
                "temperature on {} is not finite",
                dates[i_val]
            )));
        }
        Ok(Self {
            dates,
            temperatures,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(n_days: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        start.iter_days().take(n_days).collect()
    }

    #[test]
    fn test_valid_series() {
        let series = TemperatureSeries::new(days(3), vec![1.0, -2.5, 0.0]).unwrap();

        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.temperatures(), &[1.0, -2.5, 0.0]);
        assert_eq!(series.dates()[2], NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
    }

    #[test]
    fn test_empty_series_is_representable() {
        let series = TemperatureSeries::new(Vec::new(), Vec::new()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_gaps_are_allowed() {
        let mut dates = days(4);
        dates.remove(1);
        assert!(TemperatureSeries::new(dates, vec![1.0, 2.0, 3.0]).is_ok());
    }

    #[test]
    fn test_length_mismatch() {
        let result = TemperatureSeries::new(days(3), vec![1.0, 2.0]);
        assert!(matches!(result, Err(ProcessingError::InvalidSeries(_))));
    }

    #[test]
    fn test_duplicate_dates() {
        let mut dates = days(3);
        dates[2] = dates[1];
        let result = TemperatureSeries::new(dates, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(ProcessingError::InvalidSeries(_))));
    }

    #[test]
    fn test_decreasing_dates() {
        let mut dates = days(3);
        dates.reverse();
        let result = TemperatureSeries::new(dates, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(ProcessingError::InvalidSeries(_))));
    }

    #[test]
    fn test_non_finite_temperature() {
        let result = TemperatureSeries::new(days(3), vec![1.0, f64::NAN, 3.0]);
        assert!(matches!(result, Err(ProcessingError::InvalidSeries(_))));
    }
}
