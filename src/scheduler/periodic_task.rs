use std::ops::ControlFlow;
use std::time::Duration;

use tokio::spawn;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::trace;

/// tokio intervals panic on a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawns timer driven callbacks on the runtime.
pub struct PeriodicTask;

impl PeriodicTask {
    /// Calls `tick` once every `period`, starting one period from now, until it breaks or
    /// the returned handle is cancelled or dropped.
    pub fn spawn<F>(period: Duration, mut tick: F) -> TaskHandle
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let join = spawn(async move {
            let mut ticker = interval(period.max(MIN_PERIOD));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            //NOTE: The first tick of a tokio interval completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if tick().is_break() {
                    trace!("Periodic task finished after its last tick");
                    break;
                }
            }
        });

        TaskHandle::new(join)
    }

    /// Calls `callback` once after `delay` unless the handle is cancelled or dropped first.
    pub fn delay<F>(delay: Duration, callback: F) -> TaskHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let join = spawn(async move {
            sleep(delay).await;
            callback();
        });

        TaskHandle::new(join)
    }
}

/// Owns a running simulated task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct TaskHandle {
    join: Option<JoinHandle<()>>
}

impl TaskHandle {
    fn new(join: JoinHandle<()>) -> Self {
        Self { join: Some(join) }
    }

    pub fn cancel(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.join.as_ref().is_some_and(|join| !join.is_finished())
    }

    /// Waits for the task to run to completion on its own.
    pub async fn finished(mut self) -> Result<(), JoinError> {
        match self.join.take() {
            Some(join) => join.await,
            None => Ok(())
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
