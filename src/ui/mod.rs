//! egui rendering of the dashboard. Everything here reads [`crate::state::AppState`]
//! and the chart data it produces; no aggregation happens in this layer.

pub mod panels;
pub mod plot;
pub mod table;
