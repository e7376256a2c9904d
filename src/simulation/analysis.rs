use std::ops::ControlFlow;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tracing::debug;

use crate::models::Record;
use crate::scheduler::{PeriodicTask, TaskHandle};

pub const ANALYSIS_TICK: Duration = Duration::from_millis(200);

const MIN_STEP: f64 = 5.0;
const MAX_STEP: f64 = 20.0;
const COMPLETE: f64 = 100.0;

#[derive(Debug)]
pub enum AnalysisEvent {
    Progress(f64),
    Complete(Vec<Record>)
}

/// Percentage shown while the "AI analysis" of an upload runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisProgress {
    percent: f64
}

impl AnalysisProgress {
    pub fn new() -> Self {
        Self { percent: 0.0 }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= COMPLETE
    }

    /// Moves forward by a random step and clamps at 100.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> f64 {
        self.percent = (self.percent + rng.gen_range(MIN_STEP..MAX_STEP)).min(COMPLETE);
        self.percent
    }
}

/// Holds back already parsed records behind a fake progress bar.
///
/// Emits one `Progress` per tick and a single `Complete` carrying the records once progress
/// reaches 100. Dropping the handle or the receiver ends the run early.
pub fn spawn_analysis<R>(records: Vec<Record>, tick: Duration, mut rng: R) -> (TaskHandle, mpsc::UnboundedReceiver<AnalysisEvent>)
where
    R: Rng + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let mut progress = AnalysisProgress::new();
    let mut pending = Some(records);

    let handle = PeriodicTask::spawn(tick, move || {
        let percent = progress.advance(&mut rng);

        if sender.send(AnalysisEvent::Progress(percent)).is_err() {
            debug!("Analysis progress receiver dropped, stopping");
            return ControlFlow::Break(());
        }

        if !progress.is_complete() {
            return ControlFlow::Continue(());
        }

        if let Some(records) = pending.take() {
            if sender.send(AnalysisEvent::Complete(records)).is_err() {
                debug!("Analysis completed after its receiver was dropped");
            }
        }

        ControlFlow::Break(())
    });

    (handle, receiver)
}
