//! Core domain types and the synthetic market-data pipeline.

pub mod security;
pub mod candle;
pub mod generator;
pub mod indicator;
pub mod analytics;
pub mod market;
pub mod dashboard;
pub mod settings;
pub mod error;
