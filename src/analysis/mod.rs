//! Pure aggregation functions: filtered table in, chart-ready data out.
//!
//! Nothing here performs I/O or mutates its input, and every function accepts
//! an empty table. The only failures are the expected ones in
//! [`crate::error::AnalysisError`].

pub mod company;
pub mod correlation;
pub mod dispatch;
pub mod distribution;
pub mod kpi;
pub mod relationship;
