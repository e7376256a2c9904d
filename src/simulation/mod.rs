//! Randomised stand-ins for the live monitoring figures.
//!
//! Nothing here is computed from real data. The generators only keep the dashboards moving,
//! and every timer they use is a [`crate::scheduler::TaskHandle`] that stops when dropped.

mod alerts;
mod analysis;
mod dashboard;
mod errors;
mod monitor;
mod scan;
mod sms;

use rand::Rng;
use serde::Serialize;

pub use alerts::{Alert, AlertBoard, AlertStats, AlertStatus};
pub use analysis::{spawn_analysis, AnalysisEvent, AnalysisProgress, ANALYSIS_TICK};
pub use dashboard::{AlertPreview, CategoryCard, DashboardSnapshot, StatCard};
pub use errors::SimulationError;
pub use monitor::{ModelCard, ModelRegistry, ModelStatus, Monitor, PROBABILITY_TICK, RETRAIN_DURATION};
pub use scan::{ScanEvent, ScanRun, SecurityScanner, StepStatus, SCAN_SETTLE_DELAY, SCAN_STEPS, SCAN_TICK};
pub use sms::{SmsCheck, SmsVerdict, SMS_CHECK_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low
}

/// Rounds to one decimal place.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A `+N%` or `-N%` trend label with a random sign.
fn signed_percent<R: Rng>(rng: &mut R, min: u32, max: u32) -> String {
    let sign = if rng.gen_bool(0.5) { '+' } else { '-' };

    format!("{sign}{}%", rng.gen_range(min..=max))
}

fn rising_percent<R: Rng>(rng: &mut R, min: u32, max: u32) -> String {
    format!("+{}%", rng.gen_range(min..=max))
}
