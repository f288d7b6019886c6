//! Persisted model parameters
//!
//! Parameters are estimated elsewhere and stored as JSON, one model per file:
//!
//! ```json
//! {
//!   "kind": "arima",
//!   "name": "ARIMA",
//!   "params": { "ar": [0.4], "ma": [-0.3], "d": 1, "seasonal_d": 1, "period": 12 }
//! }
//! ```

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::models::{
    Arima, ArimaParams, BoxedForecaster, ExponentialSmoothing, ForecastModel, HoltWintersParams,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A stored model: its family, optional display name and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    ExponentialSmoothing {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        params: HoltWintersParams,
    },
    Arima {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        params: ArimaParams,
    },
}

impl ModelArtifact {
    /// Load an artifact from a JSON file.
    ///
    /// A missing, unreadable or malformed file is reported as
    /// [`ForecastError::ArtifactUnavailable`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| ForecastError::ArtifactUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|err| unavailable(err.to_string()))?;
        serde_json::from_str(&text).map_err(|err| unavailable(err.to_string()))
    }

    /// Parse an artifact from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| ForecastError::ParseError(err.to_string()))
    }

    /// Render the artifact as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| ForecastError::ParseError(err.to_string()))
    }

    /// Write the artifact to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Build the model and apply it to the series
    pub fn apply(&self, series: &SalesSeries) -> Result<BoxedForecaster> {
        match self {
            ModelArtifact::ExponentialSmoothing { name, params } => {
                let mut model = ExponentialSmoothing::new(params.clone())?;
                if let Some(name) = name {
                    model = model.with_name(name.clone());
                }
                Ok(Box::new(model.apply(series)?))
            }
            ModelArtifact::Arima { name, params } => {
                let mut model = Arima::new(params.clone())?;
                if let Some(name) = name {
                    model = model.with_name(name.clone());
                }
                Ok(Box::new(model.apply(series)?))
            }
        }
    }
}

impl From<ExponentialSmoothing> for ModelArtifact {
    fn from(model: ExponentialSmoothing) -> Self {
        ModelArtifact::ExponentialSmoothing {
            name: Some(model.name().to_string()),
            params: model.params().clone(),
        }
    }
}

impl From<Arima> for ModelArtifact {
    fn from(model: Arima) -> Self {
        ModelArtifact::Arima {
            name: Some(model.name().to_string()),
            params: model.params().clone(),
        }
    }
}
