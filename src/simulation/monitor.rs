use std::ops::ControlFlow;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::scheduler::{PeriodicTask, TaskHandle};
use crate::simulation::{round_tenth, SimulationError};

pub const PROBABILITY_TICK: Duration = Duration::from_secs(2);
pub const RETRAIN_DURATION: Duration = Duration::from_secs(3);

const PROBABILITY_FLOOR: f64 = 1.0;
const PROBABILITY_CEILING: f64 = 45.0;
const PROBABILITY_SWING: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Active,
    Retraining
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCard {
    pub name: &'static str,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub last_trained: String,
    pub status: ModelStatus,
    pub fraud_probability: f64
}

impl ModelCard {
    fn new(name: &'static str, accuracy: f64, precision: f64, recall: f64, last_trained: &str, fraud_probability: f64) -> Self {
        Self {
            name,
            accuracy,
            precision,
            recall,
            last_trained: last_trained.to_string(),
            status: ModelStatus::Active,
            fraud_probability
        }
    }
}

/// The detection models listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRegistry {
    models: Vec<ModelCard>
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ModelRegistry {
    pub fn seeded() -> Self {
        Self {
            models: vec![
                ModelCard::new("Credit Card Fraud Detector", 99.2, 98.5, 99.5, "2 days ago", 12.4),
                ModelCard::new("UPI Fraud Analyzer", 98.9, 97.8, 98.5, "5 days ago", 8.7),
                ModelCard::new("SMS Phishing Classifier", 99.5, 99.1, 99.3, "1 day ago", 15.2),
                ModelCard::new("Transaction Anomaly Detection", 97.6, 96.8, 97.9, "3 days ago", 6.3)
            ]
        }
    }

    pub fn models(&self) -> &[ModelCard] {
        &self.models
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.models.iter().map(|model| model.fraud_probability).collect()
    }

    /// Random walk of every live fraud probability, kept within 1% and 45%.
    pub fn step_probabilities<R: Rng>(&mut self, rng: &mut R) {
        for model in &mut self.models {
            let delta = (rng.gen_range(0.0..1.0) - 0.5) * PROBABILITY_SWING;
            model.fraud_probability = round_tenth(model.fraud_probability + delta).clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING);
        }
    }

    pub fn begin_retrain(&mut self, name: &str) -> Result<(), SimulationError> {
        let model = self.find_mut(name)?;

        if model.status == ModelStatus::Retraining {
            return Err(SimulationError::AlreadyRetraining { name: name.to_string() });
        }

        model.status = ModelStatus::Retraining;
        info!("Retraining started for [{name}]");

        Ok(())
    }

    pub fn finish_retrain<R: Rng>(&mut self, name: &str, rng: &mut R) -> Result<(), SimulationError> {
        let model = self.find_mut(name)?;

        model.accuracy = round_tenth(99.0 + rng.gen_range(0.0..0.9));
        model.precision = round_tenth(98.0 + rng.gen_range(0.0..1.5));
        model.recall = round_tenth(98.5 + rng.gen_range(0.0..1.2));
        model.last_trained = "Just now".to_string();
        model.status = ModelStatus::Active;
        info!("Retraining complete for [{name}]");

        Ok(())
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut ModelCard, SimulationError> {
        self.models.iter_mut()
            .find(|model| model.name == name)
            .ok_or_else(|| SimulationError::UnknownModel { name: name.to_string() })
    }
}

enum MonitorSignal {
    Tick,
    Retrained(String)
}

/// Drives the admin dashboard: probability ticks plus an optional model retrain.
pub struct Monitor {
    registry: ModelRegistry,
    interval: Duration,
    retrain_after: Duration
}

impl Monitor {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry,
            interval: PROBABILITY_TICK,
            retrain_after: RETRAIN_DURATION
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_retrain_duration(mut self, retrain_after: Duration) -> Self {
        self.retrain_after = retrain_after;
        self
    }

    /// Runs for `ticks` probability updates and hands back the final registry.
    ///
    /// `on_tick` sees the registry after every update. A retrain that has not finished when
    /// the last tick arrives is abandoned and the model stays in `Retraining`.
    pub async fn run<R, F, E>(mut self, ticks: u32, retrain: Option<&str>, mut rng: R, mut on_tick: F) -> Result<ModelRegistry, E>
    where
        R: Rng,
        F: FnMut(u32, &ModelRegistry) -> Result<(), E>,
        E: From<SimulationError>,
    {
        if ticks == 0 {
            return Ok(self.registry);
        }

        let (sender, mut receiver) = mpsc::unbounded_channel();

        let tick_sender = sender.clone();
        let _ticker = PeriodicTask::spawn(self.interval, move || {
            match tick_sender.send(MonitorSignal::Tick) {
                Ok(_) => ControlFlow::Continue(()),
                Err(_) => ControlFlow::Break(())
            }
        });

        let _retrainer: Option<TaskHandle> = match retrain {
            Some(name) => {
                self.registry.begin_retrain(name)?;

                let name = name.to_string();
                let retrain_sender = sender.clone();

                Some(PeriodicTask::delay(self.retrain_after, move || {
                    let _ = retrain_sender.send(MonitorSignal::Retrained(name));
                }))
            }
            None => None
        };

        drop(sender);

        let mut completed = 0;

        while completed < ticks {
            match receiver.recv().await {
                Some(MonitorSignal::Tick) => {
                    self.registry.step_probabilities(&mut rng);
                    completed += 1;
                    on_tick(completed, &self.registry)?;
                }
                Some(MonitorSignal::Retrained(name)) => {
                    self.registry.finish_retrain(&name, &mut rng)?;
                }
                None => {
                    debug!("Monitor signals closed after {completed} ticks");
                    break;
                }
            }
        }

        Ok(self.registry)
    }
}
