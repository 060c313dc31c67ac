use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::LoanScenario;
use super::reference::ReferenceData;

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 850;
pub const MIN_LOAN_AMOUNT: f64 = 10_000.0;
pub const MIN_PROPERTY_VALUE: f64 = 20_000.0;
pub const MAX_INTAKE_LTV: f64 = 0.97;

/// A single field that failed intake checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every issue found on a submitted scenario.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scenario rejected: {}", summarize(.issues))]
pub struct ScenarioRejected {
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Form-collection checks applied before a scenario reaches the engine.
#[derive(Debug, Clone)]
pub struct ScenarioValidator {
    reference: Arc<ReferenceData>,
}

impl Default for ScenarioValidator {
    fn default() -> Self {
        Self::new(Arc::new(ReferenceData::default()))
    }
}

impl ScenarioValidator {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    /// Returns the normalized scenario, or all issues at once.
    pub fn validate(&self, scenario: LoanScenario) -> Result<LoanScenario, ScenarioRejected> {
        let mut scenario = scenario;
        scenario.property_state = scenario.property_state.trim().to_ascii_uppercase();
        scenario.property_county = scenario.property_county.trim().to_string();

        let mut issues = Vec::new();

        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&scenario.credit_score) {
            issues.push(FieldIssue::new(
                "credit_score",
                format!(
                    "must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE} (found {})",
                    scenario.credit_score
                ),
            ));
        }

        if !(scenario.annual_income > 0.0) {
            issues.push(FieldIssue::new("annual_income", "must be greater than zero"));
        }

        if !(scenario.loan_amount >= MIN_LOAN_AMOUNT) {
            issues.push(FieldIssue::new(
                "loan_amount",
                format!("must be at least ${MIN_LOAN_AMOUNT:.0}"),
            ));
        }

        if !(scenario.property_value >= MIN_PROPERTY_VALUE) {
            issues.push(FieldIssue::new(
                "property_value",
                format!("must be at least ${MIN_PROPERTY_VALUE:.0}"),
            ));
        } else if scenario.loan_amount > scenario.property_value * MAX_INTAKE_LTV {
            issues.push(FieldIssue::new(
                "loan_amount",
                format!(
                    "must not exceed {:.0}% of the property value",
                    MAX_INTAKE_LTV * 100.0
                ),
            ));
        }

        if !(scenario.monthly_debt_payments >= 0.0) {
            issues.push(FieldIssue::new(
                "monthly_debt_payments",
                "must not be negative",
            ));
        }

        if scenario.property_state.len() != 2 || !self.reference.is_known_state(&scenario.property_state)
        {
            issues.push(FieldIssue::new(
                "property_state",
                format!(
                    "must be a two-letter US state code (found '{}')",
                    scenario.property_state
                ),
            ));
        }

        if scenario.property_county.is_empty() {
            issues.push(FieldIssue::new("property_county", "is required"));
        }

        if issues.is_empty() {
            Ok(scenario)
        } else {
            Err(ScenarioRejected { issues })
        }
    }
}
