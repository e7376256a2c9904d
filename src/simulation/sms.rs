use std::time::Duration;

use serde::Serialize;
use tokio::sync::oneshot;
use tracing::debug;

use crate::scheduler::{PeriodicTask, TaskHandle};
use crate::simulation::{Severity, SimulationError};

pub const SMS_CHECK_DELAY: Duration = Duration::from_millis(2000);

const PHISHING_REASONS: [&str; 4] = [
    "Contains suspicious financial terms",
    "Requests personal information",
    "Suspicious URL pattern detected",
    "Matches known phishing templates"
];

/// Outcome of an SMS phishing check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsVerdict {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub prediction: &'static str,
    pub confidence: f64,
    pub reasons: Vec<&'static str>,
    pub severity: Severity
}

impl SmsVerdict {
    /// The verdict every check settles on. The message text is never inspected.
    pub fn phishing() -> Self {
        Self {
            kind: "SMS Analysis",
            prediction: "Phishing Detected",
            confidence: 94.5,
            reasons: PHISHING_REASONS.to_vec(),
            severity: Severity::High
        }
    }
}

/// Single-flight SMS phishing detector.
#[derive(Debug)]
pub struct SmsCheck {
    delay: Duration,
    running: Option<TaskHandle>
}

impl Default for SmsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsCheck {
    pub fn new() -> Self {
        Self::with_delay(SMS_CHECK_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, running: None }
    }

    pub fn is_detecting(&self) -> bool {
        self.running.as_ref().is_some_and(TaskHandle::is_active)
    }

    /// Starts checking `message` and returns the receiver its verdict arrives on.
    ///
    /// A blank message or a check that is still running is refused. Dropping the detector
    /// before the delay elapses closes the receiver without a verdict.
    pub fn detect(&mut self, message: &str) -> Result<oneshot::Receiver<SmsVerdict>, SimulationError> {
        if message.trim().is_empty() {
            return Err(SimulationError::EmptyMessage);
        }

        if self.is_detecting() {
            return Err(SimulationError::DetectionInProgress);
        }

        debug!("Checking SMS message of {} characters", message.chars().count());

        let (sender, receiver) = oneshot::channel();

        self.running = Some(PeriodicTask::delay(self.delay, move || {
            if sender.send(SmsVerdict::phishing()).is_err() {
                debug!("SMS verdict receiver dropped before the check finished");
            }
        }));

        Ok(receiver)
    }

    pub fn cancel(&mut self) {
        if let Some(mut handle) = self.running.take() {
            handle.cancel();
        }
    }
}
