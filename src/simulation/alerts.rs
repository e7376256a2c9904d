use serde::Serialize;
use tracing::info;

use crate::simulation::{Severity, SimulationError};

/// Threats blocked earlier in the day that are no longer on the board.
const BLOCKED_BEFORE_SESSION: usize = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Investigating,
    Resolved
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: u32,
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub location: &'static str,
    pub status: AlertStatus,
    pub risk_score: u8,
    pub affected_accounts: u32,
    pub total_amount: &'static str
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    pub active: usize,
    pub investigating: usize,
    pub blocked_today: usize,
    pub total_monitored: usize
}

/// Alerts page state. Blocking removes an alert, the other actions only change its status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
    #[serde(skip)]
    seeded: usize
}

impl Default for AlertBoard {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AlertBoard {
    pub fn seeded() -> Self {
        let alerts = vec![
            Alert {
                id: 1,
                severity: Severity::Critical,
                title: "Multiple Failed Credit Card Attempts",
                description: "Detected 15 failed transactions from the same IP address within 5 minutes",
                location: "Mumbai, India",
                status: AlertStatus::Active,
                risk_score: 94,
                affected_accounts: 8,
                total_amount: "₹4,56,780"
            },
            Alert {
                id: 2,
                severity: Severity::High,
                title: "Suspicious UPI Transaction Pattern",
                description: "Unusual transaction velocity detected for user ID 78934",
                location: "Delhi, India",
                status: AlertStatus::Active,
                risk_score: 82,
                affected_accounts: 3,
                total_amount: "₹2,34,567"
            },
            Alert {
                id: 3,
                severity: Severity::Medium,
                title: "Phishing SMS Campaign Detected",
                description: "New phishing template identified targeting bank customers",
                location: "Bangalore, India",
                status: AlertStatus::Investigating,
                risk_score: 67,
                affected_accounts: 1247,
                total_amount: "₹12,45,000"
            },
            Alert {
                id: 4,
                severity: Severity::Low,
                title: "Unusual Login Location",
                description: "User login from new geographic location",
                location: "Chennai, India",
                status: AlertStatus::Active,
                risk_score: 35,
                affected_accounts: 1,
                total_amount: "₹0"
            },
            Alert {
                id: 5,
                severity: Severity::Critical,
                title: "Payment Gateway Anomaly",
                description: "Unusual traffic spike detected on payment endpoint",
                location: "Multiple",
                status: AlertStatus::Active,
                risk_score: 91,
                affected_accounts: 156,
                total_amount: "₹45,67,890"
            }
        ];

        Self { seeded: alerts.len(), alerts }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn investigate(&mut self, alert_id: u32) -> Result<(), SimulationError> {
        self.find_mut(alert_id)?.status = AlertStatus::Investigating;
        Ok(())
    }

    pub fn resolve(&mut self, alert_id: u32) -> Result<(), SimulationError> {
        self.find_mut(alert_id)?.status = AlertStatus::Resolved;
        info!("Alert [{alert_id}] marked as resolved");
        Ok(())
    }

    /// Removes the alert from the board and returns it.
    pub fn block(&mut self, alert_id: u32) -> Result<Alert, SimulationError> {
        let index = self.alerts.iter()
            .position(|alert| alert.id == alert_id)
            .ok_or(SimulationError::AlertNotFound { alert_id })?;

        let alert = self.alerts.remove(index);
        info!("Threat [{}] blocked and its source blacklisted", alert.title);

        Ok(alert)
    }

    pub fn stats(&self) -> AlertStats {
        let count = |status: AlertStatus| self.alerts.iter().filter(|alert| alert.status == status).count();

        AlertStats {
            active: count(AlertStatus::Active),
            investigating: count(AlertStatus::Investigating),
            blocked_today: self.seeded - self.alerts.len() + BLOCKED_BEFORE_SESSION,
            total_monitored: self.alerts.len()
        }
    }

    fn find_mut(&mut self, alert_id: u32) -> Result<&mut Alert, SimulationError> {
        self.alerts.iter_mut()
            .find(|alert| alert.id == alert_id)
            .ok_or(SimulationError::AlertNotFound { alert_id })
    }
}
