//! Comparison plots of cross-section tables with a ratio panel.
//!
//! The data layer ([`data`]) turns tables into binned series, ratios and axis
//! ranges; [`state`] pairs them into a [`state::ComparisonPlot`] which
//! [`render`] draws and exports.

pub mod app;
pub mod color;
pub mod data;
pub mod render;
pub mod state;
