use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{EligibilityResult, LoanScenario, Product};
use super::intake::{ScenarioRejected, ScenarioValidator};
use super::metrics::InvalidScenario;
use super::reference::{AreaIncomeLimit, ReferenceData};
use super::EligibilityEngine;

/// Engine output plus reference lookups for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    #[serde(flatten)]
    pub result: EligibilityResult,
    /// 80% AMI limit for the scenario's county, when the table covers it.
    pub area_income_limit: Option<AreaIncomeLimit>,
}

/// Service composing intake validation, the engine, and reference data.
pub struct EligibilityService {
    validator: ScenarioValidator,
    engine: EligibilityEngine,
    reference: Arc<ReferenceData>,
}

impl EligibilityService {
    pub fn new(engine: EligibilityEngine, reference: Arc<ReferenceData>) -> Self {
        Self {
            validator: ScenarioValidator::new(reference.clone()),
            engine,
            reference,
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Validate, evaluate, and attach the county income limit.
    pub fn check(&self, scenario: LoanScenario) -> Result<EligibilityReport, EligibilityServiceError> {
        let scenario = self.validator.validate(scenario).map_err(|err| {
            warn!(issues = err.issues.len(), "loan scenario failed intake validation");
            err
        })?;

        let result = self.engine.evaluate(&scenario)?;

        debug!(
            ltv = result.calculated_ltv,
            dti = result.calculated_dti,
            home_ready = result.is_eligible_for(Product::HomeReady),
            home_possible = result.is_eligible_for(Product::HomePossible),
            suggestions = result.fix_suggestions.len(),
            "evaluated loan scenario"
        );

        let area_income_limit = self
            .reference
            .income_limit(&scenario.property_state, &scenario.property_county)
            .cloned();

        Ok(EligibilityReport {
            result,
            area_income_limit,
        })
    }
}

impl Default for EligibilityService {
    fn default() -> Self {
        Self::new(EligibilityEngine::default(), Arc::new(ReferenceData::default()))
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Rejected(#[from] ScenarioRejected),
    #[error(transparent)]
    Invalid(#[from] InvalidScenario),
}
