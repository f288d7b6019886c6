//! Resolving a target month against the sales history
//!
//! A target month is either already in the history, lies some whole number
//! of months after its end, or is neither: a month before the last
//! observation that has no row. Only the second case ever reaches a
//! forecaster.

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::month::MonthStamp;
use chrono::NaiveDate;
use std::fmt;
use std::num::NonZeroU32;

/// A positive number of monthly forecast steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Horizon(NonZeroU32);

impl Horizon {
    /// Create a horizon, rejecting zero and negative month counts
    pub fn new(months: i64) -> Result<Self> {
        u32::try_from(months)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ForecastError::InvalidHorizon { months })
    }

    /// Number of monthly steps
    pub fn months(&self) -> u32 {
        self.0.get()
    }

    /// Number of monthly steps as a length
    pub fn steps(&self) -> usize {
        self.0.get() as usize
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.0)
    }
}

/// A target month measured against the last month of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastRequest {
    target: MonthStamp,
    reference: MonthStamp,
}

impl ForecastRequest {
    /// Build a request for `target` against the end of `series`
    pub fn new(target: MonthStamp, series: &SalesSeries) -> Self {
        Self {
            target,
            reference: series.last_month(),
        }
    }

    /// Build a request from any date; the day of month is dropped
    pub fn for_date(date: NaiveDate, series: &SalesSeries) -> Self {
        Self::new(MonthStamp::from_date(date), series)
    }

    /// The month asked about
    pub fn target(&self) -> MonthStamp {
        self.target
    }

    /// The last month of the history
    pub fn reference(&self) -> MonthStamp {
        self.reference
    }

    /// Signed month distance from the reference to the target
    pub fn months_diff(&self) -> i64 {
        self.reference.months_until(&self.target)
    }
}

/// Outcome of resolving a target month
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonOutcome {
    /// The month is a row of the history
    Historical { month: MonthStamp, value: f64 },
    /// The month lies after the history; forecast this many steps
    Future { target: MonthStamp, horizon: Horizon },
    /// Nothing to look up and nothing to forecast
    Unavailable { target: MonthStamp, months_diff: i64 },
}

impl HorizonOutcome {
    /// The horizon to forecast, if any
    pub fn horizon(&self) -> Option<Horizon> {
        match self {
            HorizonOutcome::Future { horizon, .. } => Some(*horizon),
            _ => None,
        }
    }

    /// Whether there is neither a stored value nor a horizon
    pub fn is_unavailable(&self) -> bool {
        matches!(self, HorizonOutcome::Unavailable { .. })
    }
}

/// Resolve a target month against the series.
///
/// The exact-match lookup runs first; only months without a row fall through
/// to the month-difference arithmetic.
pub fn resolve(series: &SalesSeries, target: MonthStamp) -> HorizonOutcome {
    resolve_request(series, &ForecastRequest::new(target, series))
}

/// Resolve a prepared request against a series.
///
/// The horizon is always measured from the last month of `series`. A request
/// built against another series is rebuilt against this one.
pub fn resolve_request(series: &SalesSeries, request: &ForecastRequest) -> HorizonOutcome {
    let request = if request.reference() == series.last_month() {
        *request
    } else {
        tracing::warn!(
            reference = %request.reference(),
            last = %series.last_month(),
            "request reference is not the end of the series; rebuilding"
        );
        ForecastRequest::new(request.target(), series)
    };
    let target = request.target();

    if let Some(value) = series.value_at(target) {
        tracing::debug!(%target, value, "target month found in history");
        return HorizonOutcome::Historical {
            month: target,
            value,
        };
    }

    let months_diff = request.months_diff();
    match Horizon::new(months_diff) {
        Ok(horizon) => {
            tracing::debug!(%target, reference = %request.reference(), %horizon, "resolved forecast horizon");
            HorizonOutcome::Future { target, horizon }
        }
        Err(_) => {
            tracing::debug!(%target, months_diff, "target month has no data and no horizon");
            HorizonOutcome::Unavailable {
                target,
                months_diff,
            }
        }
    }
}
