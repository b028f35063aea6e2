//! Bike Sharing Dashboard
//!
//! Loads the daily and hourly bike-sharing datasets, labels and joins them,
//! and computes the summaries shown by the dashboard window.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
