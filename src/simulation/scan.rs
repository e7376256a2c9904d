use std::ops::ControlFlow;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::scheduler::{PeriodicTask, TaskHandle};

pub const SCAN_TICK: Duration = Duration::from_millis(80);
pub const SCAN_DURATION: Duration = Duration::from_millis(4000);
/// Pause between the final scan step and the refreshed dashboard.
pub const SCAN_SETTLE_DELAY: Duration = Duration::from_millis(500);

pub const SCAN_STEPS: [&str; 4] = [
    "Credit Card Fraud Scan",
    "UPI Fraud Detection",
    "SMS Phishing Analysis",
    "Online Transaction Check"
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Done
}

/// Progress of one security scan through its fixed steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRun {
    #[serde(skip)]
    elapsed: Duration,
    #[serde(skip)]
    total: Duration,
    #[serde(skip)]
    tick: Duration,
    progress: f64,
    current_step: usize,
    statuses: [StepStatus; SCAN_STEPS.len()]
}

impl Default for ScanRun {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanRun {
    pub fn new() -> Self {
        Self::with_timing(SCAN_DURATION, SCAN_TICK)
    }

    pub fn with_timing(total: Duration, tick: Duration) -> Self {
        let mut statuses = [StepStatus::Pending; SCAN_STEPS.len()];
        statuses[0] = StepStatus::Running;

        Self {
            elapsed: Duration::ZERO,
            total,
            tick,
            progress: 0.0,
            current_step: 0,
            statuses
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn statuses(&self) -> &[StepStatus] {
        &self.statuses
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.total
    }

    /// Moves the scan forward by one tick.
    pub fn advance(&mut self) {
        if self.is_complete() {
            return;
        }

        self.elapsed += self.tick;

        let elapsed = self.elapsed.as_millis();
        let total = self.total.as_millis().max(1);
        let step_duration = (total / SCAN_STEPS.len() as u128).max(1);

        self.progress = (elapsed as f64 / total as f64 * 100.0).min(100.0);
        self.current_step = ((elapsed / step_duration) as usize).min(SCAN_STEPS.len() - 1);

        for (index, status) in self.statuses.iter_mut().enumerate() {
            *status = match index {
                index if index < self.current_step => StepStatus::Done,
                index if index == self.current_step => StepStatus::Running,
                _ => StepStatus::Pending
            };
        }

        if self.is_complete() {
            self.statuses = [StepStatus::Done; SCAN_STEPS.len()];
            self.progress = 100.0;
        }
    }
}

#[derive(Debug)]
pub enum ScanEvent {
    Progress(ScanRun),
    Completed
}

/// Runs at most one security scan at a time.
pub struct SecurityScanner {
    total: Duration,
    tick: Duration,
    running: Option<TaskHandle>
}

impl Default for SecurityScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityScanner {
    pub fn new() -> Self {
        Self::with_timing(SCAN_DURATION, SCAN_TICK)
    }

    pub fn with_timing(total: Duration, tick: Duration) -> Self {
        Self { total, tick, running: None }
    }

    pub fn is_scanning(&self) -> bool {
        self.running.as_ref().is_some_and(TaskHandle::is_active)
    }

    /// Starts a scan and returns its event stream, or `None` while a scan is still running.
    pub fn start(&mut self) -> Option<mpsc::UnboundedReceiver<ScanEvent>> {
        if self.is_scanning() {
            debug!("Security scan already running, ignoring start request");
            return None;
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let mut run = ScanRun::with_timing(self.total, self.tick);

        self.running = Some(PeriodicTask::spawn(self.tick, move || {
            run.advance();

            if sender.send(ScanEvent::Progress(run.clone())).is_err() {
                return ControlFlow::Break(());
            }

            if run.is_complete() {
                let _ = sender.send(ScanEvent::Completed);
                return ControlFlow::Break(());
            }

            ControlFlow::Continue(())
        }));

        Some(receiver)
    }

    pub fn stop(&mut self) {
        if let Some(mut handle) = self.running.take() {
            handle.cancel();
        }
    }
}
