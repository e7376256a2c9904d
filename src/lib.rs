//! Fraud analysis of transaction CSV exports.
//!
//! [`parser`] turns an export into [`models::Record`]s, [`analysis`] filters them and derives
//! the fraud statistics, and [`session`] holds one upload at a time. The monitoring figures
//! in [`simulation`] are random and only keep the dashboards looking live.

pub mod analysis;
pub mod engine;
pub mod models;
pub mod parser;
pub mod scheduler;
pub mod session;
pub mod simulation;
pub mod types;
