//! Interactive CSV cleaning: open a file, drop missing or duplicate rows,
//! inspect statistics and a histogram, save the result.

pub mod app;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
