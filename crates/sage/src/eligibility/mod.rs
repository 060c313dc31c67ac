//! HomeReady and Home Possible eligibility scoring.
//!
//! The engine is pure: a scenario goes in, derived ratios are computed, both
//! product rule sets run over them, and the result carries violations, a
//! recommendation, and fix suggestions. Intake validation, reference data,
//! and the HTTP surface wrap around it without changing its output.

pub mod domain;
pub mod fixes;
pub mod intake;
pub mod metrics;
pub mod recommendation;
pub mod reference;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DerivedMetrics, Difficulty, EligibilityResult, FixSuggestion, Gse, LoanScenario, LoanTerm,
    Occupancy, Product, ProductResult, PropertyType, RuleViolation,
};
pub use fixes::FixPolicy;
pub use intake::{FieldIssue, ScenarioRejected, ScenarioValidator};
pub use metrics::{
    InvalidScenario, MetricCalculator, PaymentModel, ESTIMATED_PAYMENT_FACTOR,
    ESTIMATED_TAX_INSURANCE_RATE,
};
pub use recommendation::Recommendation;
pub use reference::{AreaIncomeLimit, ReferenceData, ReferenceDataError};
pub use router::eligibility_router;
pub use rules::{Comparator, Metric, ProductRules, RuleBook, RuleDefinition, Threshold};
pub use service::{EligibilityReport, EligibilityService, EligibilityServiceError};

/// Stateless evaluator combining the metric calculator, rule book, and fix policy.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    calculator: MetricCalculator,
    rules: RuleBook,
    fixes: FixPolicy,
}

impl EligibilityEngine {
    pub fn new(calculator: MetricCalculator, rules: RuleBook, fixes: FixPolicy) -> Self {
        Self {
            calculator,
            rules,
            fixes,
        }
    }

    pub fn with_payment_model(payment_model: PaymentModel) -> Self {
        Self {
            calculator: MetricCalculator::new(payment_model),
            ..Self::default()
        }
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn evaluate(&self, scenario: &LoanScenario) -> Result<EligibilityResult, InvalidScenario> {
        let metrics = self.calculator.derive(scenario)?;

        let home_ready = ProductResult::new(
            self.rules.home_ready.product,
            self.rules.home_ready.evaluate(scenario, &metrics),
        );
        let home_possible = ProductResult::new(
            self.rules.home_possible.product,
            self.rules.home_possible.evaluate(scenario, &metrics),
        );

        let recommendation =
            Recommendation::from_outcomes(home_ready.eligible, home_possible.eligible);
        let fix_suggestions = self.fixes.suggest(scenario, &metrics);

        Ok(EligibilityResult {
            scenario: scenario.clone(),
            calculated_ltv: metrics.loan_to_value,
            calculated_dti: metrics.debt_to_income,
            products: vec![home_ready, home_possible],
            recommendation: recommendation.message().to_string(),
            fix_suggestions,
        })
    }
}

/// Evaluates a scenario with the standard rule book and flat payment estimate.
pub fn evaluate(scenario: &LoanScenario) -> Result<EligibilityResult, InvalidScenario> {
    EligibilityEngine::default().evaluate(scenario)
}
