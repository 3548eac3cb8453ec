//! Row-limit policy for client-supplied `limit` parameters.

use crate::analysis::DEFAULT_ANALYSIS_LIMIT;
use crate::trends::DEFAULT_TRENDS_LIMIT;

/// Default ceiling applied to client-supplied limits.
pub const DEFAULT_MAX_LIMIT: i64 = 500;

/// Defaults and bounds for client-supplied row limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    /// Limit used for trends when none is given.
    pub trends_default: i64,
    /// Limit used for analysis when none is given.
    pub analysis_default: i64,
    /// Upper bound for any limit. `None` leaves limits unbounded.
    pub max: Option<i64>,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            trends_default: DEFAULT_TRENDS_LIMIT,
            analysis_default: DEFAULT_ANALYSIS_LIMIT,
            max: Some(DEFAULT_MAX_LIMIT),
        }
    }
}

impl LimitPolicy {
    /// Effective limit for a trends read.
    pub fn trends(&self, requested: Option<i64>) -> i64 {
        self.bound(requested.unwrap_or(self.trends_default))
    }

    /// Effective limit for an analysis read.
    pub fn analysis(&self, requested: Option<i64>) -> i64 {
        self.bound(requested.unwrap_or(self.analysis_default))
    }

    fn bound(&self, limit: i64) -> i64 {
        let limit = limit.max(0);
        match self.max {
            Some(max) => limit.min(max.max(0)),
            None => limit,
        }
    }
}
