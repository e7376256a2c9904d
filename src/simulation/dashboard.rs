use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::simulation::{rising_percent, round_tenth, signed_percent, Severity};

struct AlertTemplate {
    kind: &'static str,
    descriptions: [&'static str; 3]
}

const ALERT_TEMPLATES: [AlertTemplate; 4] = [
    AlertTemplate {
        kind: "Credit Card Fraud",
        descriptions: ["Suspicious transaction pattern detected", "Unusual spending spike detected", "Card used in multiple countries"]
    },
    AlertTemplate {
        kind: "UPI Fraud",
        descriptions: ["Multiple failed authentication attempts", "Rapid successive transfers detected", "Unknown device login attempt"]
    },
    AlertTemplate {
        kind: "SMS Phishing",
        descriptions: ["Malicious link detected in SMS", "Fake bank OTP message intercepted", "Impersonation attempt flagged"]
    },
    AlertTemplate {
        kind: "Online Transaction",
        descriptions: ["Unusual payment gateway activity", "Proxy/VPN transaction detected", "High-value transaction from new device"]
    }
];

const TIME_LABELS: [&str; 6] = ["Just now", "1 min ago", "3 min ago", "5 min ago", "10 min ago", "15 min ago"];
const PREVIEW_SEVERITIES: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPreview {
    pub kind: &'static str,
    pub description: &'static str,
    pub time: &'static str,
    pub severity: Severity
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCard {
    pub name: &'static str,
    pub detections: u32,
    pub trend: String
}

/// Everything the main dashboard shows, regenerated after each security scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: Vec<StatCard>,
    pub recent_alerts: Vec<AlertPreview>,
    pub fraud_categories: Vec<CategoryCard>
}

impl DashboardSnapshot {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self {
            stats: generate_stats(rng),
            recent_alerts: generate_alerts(rng),
            fraud_categories: generate_categories(rng)
        }
    }
}

fn generate_stats<R: Rng>(rng: &mut R) -> Vec<StatCard> {
    let threats_blocked: u32 = rng.gen_range(800..=2000);
    let active_alerts: u32 = rng.gen_range(5..=50);
    let scanned_hundreds: u32 = rng.gen_range(200..=800);
    let accuracy = round_tenth(99.0 + rng.gen_range(0.0..0.9));
    let accuracy_change = round_tenth(rng.gen_range(0.0..0.5));

    vec![
        StatCard {
            title: "Threats Blocked",
            value: group_thousands(threats_blocked),
            change: rising_percent(rng, 5, 25)
        },
        StatCard {
            title: "Active Alerts",
            value: active_alerts.to_string(),
            change: signed_percent(rng, 1, 15)
        },
        StatCard {
            title: "Transactions Scanned",
            value: format!("{:.1}K", scanned_hundreds as f64 / 10.0),
            change: rising_percent(rng, 10, 40)
        },
        StatCard {
            title: "Detection Accuracy",
            value: format!("{accuracy:.1}%"),
            change: format!("+{accuracy_change:.1}%")
        }
    ]
}

fn generate_alerts<R: Rng>(rng: &mut R) -> Vec<AlertPreview> {
    ALERT_TEMPLATES.iter()
        .enumerate()
        .map(|(index, template)| AlertPreview {
            kind: template.kind,
            description: template.descriptions.choose(rng).copied().unwrap_or(template.descriptions[0]),
            time: TIME_LABELS[index],
            severity: PREVIEW_SEVERITIES.choose(rng).copied().unwrap_or(Severity::Low)
        })
        .collect()
}

fn generate_categories<R: Rng>(rng: &mut R) -> Vec<CategoryCard> {
    vec![
        CategoryCard {
            name: "Credit Card Fraud",
            detections: rng.gen_range(200..=600),
            trend: rising_percent(rng, 5, 20)
        },
        CategoryCard {
            name: "UPI Fraud",
            detections: rng.gen_range(100..=400),
            trend: rising_percent(rng, 2, 15)
        },
        CategoryCard {
            name: "SMS Scams",
            detections: rng.gen_range(80..=300),
            trend: signed_percent(rng, 1, 10)
        },
        CategoryCard {
            name: "Online Payments",
            detections: rng.gen_range(50..=250),
            trend: rising_percent(rng, 5, 18)
        }
    ]
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
