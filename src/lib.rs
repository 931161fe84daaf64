//! marketdash: synthetic market data and technical analytics for a stock dashboard.
//!
//! Hexagonal architecture: the pure pipeline lives in [`domain`], port traits
//! in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
