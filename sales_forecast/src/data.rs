//! Monthly sales series and the CSV loader that builds it

use crate::config::DataConfig;
use crate::error::{ForecastError, Result};
use crate::month::MonthStamp;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One month of observed sales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Month of the observation
    pub month: MonthStamp,
    /// Observed value (units sold)
    pub value: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(month: MonthStamp, value: f64) -> Self {
        Self { month, value }
    }
}

/// Historical sales, ordered by month.
///
/// Months are strictly increasing and values are finite and non-negative.
/// Gaps between months are allowed. A series is never empty, so the last
/// training month always exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSeries {
    observations: Vec<Observation>,
    values: Vec<f64>,
}

impl SalesSeries {
    /// Create a validated series from observations already in month order
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(ForecastError::DataError(
                "Empty time series data".to_string(),
            ));
        }

        for obs in &observations {
            if !obs.value.is_finite() || obs.value < 0.0 {
                return Err(ForecastError::DataError(format!(
                    "Value for {} must be a finite non-negative number, got {}",
                    obs.month, obs.value
                )));
            }
        }

        if let Some(pair) = observations
            .windows(2)
            .find(|pair| pair[0].month >= pair[1].month)
        {
            return Err(ForecastError::DataError(format!(
                "Months must be strictly increasing: {} is followed by {}",
                pair[0].month, pair[1].month
            )));
        }

        let values = observations.iter().map(|obs| obs.value).collect();

        Ok(Self {
            observations,
            values,
        })
    }

    /// Create a contiguous monthly series starting at `start`
    pub fn from_values(start: MonthStamp, values: &[f64]) -> Result<Self> {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let offset = u32::try_from(i).map_err(|_| {
                    ForecastError::DataError("Series is too long".to_string())
                })?;
                Ok(Observation::new(start.add_months(offset)?, value))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(observations)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations in month order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Observed values in month order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First month of the series
    pub fn first_month(&self) -> MonthStamp {
        self.observations[0].month
    }

    /// Last month of the series, the reference point for forecast horizons
    pub fn last_month(&self) -> MonthStamp {
        self.observations[self.observations.len() - 1].month
    }

    /// Exact-match lookup of the value stored for `month`
    pub fn value_at(&self, month: MonthStamp) -> Option<f64> {
        self.observations
            .binary_search_by(|obs| obs.month.cmp(&month))
            .ok()
            .map(|i| self.observations[i].value)
    }

    /// Whether `month` is a row of the series
    pub fn contains(&self, month: MonthStamp) -> bool {
        self.value_at(month).is_some()
    }

    /// Mean of the values
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Data loader for sales CSV files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a sales series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P, config: &DataConfig) -> Result<SalesSeries> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| ForecastError::ArtifactUnavailable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let series = Self::from_reader(file, config)?;
        tracing::debug!(
            path = %path.display(),
            rows = series.len(),
            last = %series.last_month(),
            "loaded sales series"
        );

        Ok(series)
    }

    /// Load a sales series from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R, config: &DataConfig) -> Result<SalesSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let date_idx = Self::column_index(&headers, &config.date_column)?;
        let value_idx = Self::column_index(&headers, &config.value_column)?;

        let mut observations = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;

            let label = record.get(date_idx).unwrap_or_default();
            let month = MonthStamp::parse(label, &config.date_format).map_err(|err| {
                ForecastError::DataError(format!(
                    "Row {}: cannot parse month {:?}: {}",
                    row + 1,
                    label,
                    err
                ))
            })?;

            let raw = record.get(value_idx).unwrap_or_default();
            let value = raw.parse::<f64>().map_err(|err| {
                ForecastError::DataError(format!(
                    "Row {}: cannot parse value {:?}: {}",
                    row + 1,
                    raw,
                    err
                ))
            })?;

            observations.push(Observation::new(month, value));
        }

        SalesSeries::new(observations)
    }

    fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| ForecastError::DataError(format!("No column named {:?} in data", name)))
    }
}
