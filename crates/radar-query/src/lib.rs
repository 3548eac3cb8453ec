//! Read operations over the current snapshot.
//!
//! Every operation degrades to an empty result when the snapshot or a table
//! is missing, or when a query fails. The [`Outcome`] type keeps those cases
//! apart so they can be logged distinctly even though clients see the same
//! empty response.
//!
//! | Operation | Table | Default limit |
//! |-----------|-------|---------------|
//! | [`fetch_trends`] | `news_items` | 50 |
//! | [`fetch_analysis`] | `ai_analysis` | 20 |
//! | [`collect_diagnostics`] | all | n/a |

mod analysis;
mod diagnostics;
mod error;
mod limit;
mod outcome;
pub mod row;
mod service;
mod trends;

pub use analysis::{fetch_analysis, ANALYSIS_TABLE, DEFAULT_ANALYSIS_LIMIT};
pub use diagnostics::{collect_diagnostics, diagnose, DebugReport, Diagnostics, TableCount};
pub use error::QueryError;
pub use limit::{LimitPolicy, DEFAULT_MAX_LIMIT};
pub use outcome::{Absence, Outcome};
pub use row::Row;
pub use service::QueryService;
pub use trends::{fetch_trends, TrendItem, TrendQuery, DEFAULT_TRENDS_LIMIT, NEWS_TABLE};
