use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Alert [{alert_id}] is not on the board")]
    AlertNotFound {
        alert_id: u32
    },
    #[error("Model [{name}] is not registered")]
    UnknownModel {
        name: String
    },
    #[error("Model [{name}] is already retraining")]
    AlreadyRetraining {
        name: String
    },
    #[error("SMS message is empty")]
    EmptyMessage,
    #[error("An SMS check is already running")]
    DetectionInProgress
}
