//! Taxpayer risk audit dashboard: CSV loading, risk quadrant derivation,
//! and the filtering behind the egui front end in `main.rs`.

pub mod color;
pub mod config;
pub mod data;
pub mod state;
