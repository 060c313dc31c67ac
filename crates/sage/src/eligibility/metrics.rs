use serde::{Deserialize, Serialize};

use super::domain::{DerivedMetrics, LoanScenario, LoanTerm};

/// Monthly payment per dollar borrowed used by the flat estimate.
///
/// This stands in for a full amortization schedule; swap the `PaymentModel`
/// rather than touching rule thresholds when a precise figure is needed.
pub const ESTIMATED_PAYMENT_FACTOR: f64 = 0.006;

/// Annual rate assumed by the amortized estimate when none is configured.
pub const DEFAULT_AMORTIZATION_RATE: f64 = 0.06;

/// Annual property taxes and insurance as a share of property value, added
/// to principal and interest by the amortized estimate.
pub const ESTIMATED_TAX_INSURANCE_RATE: f64 = 0.015;

/// Raised when a scenario would force a division by zero.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidScenario {
    #[error("property value must be greater than zero (found {0})")]
    NonPositivePropertyValue(f64),
    #[error("annual income must be greater than zero (found {0})")]
    NonPositiveIncome(f64),
}

/// Strategy for estimating the new housing payment that feeds DTI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentModel {
    FlatFactor { factor: f64 },
    Amortized { annual_rate: f64 },
}

impl Default for PaymentModel {
    fn default() -> Self {
        PaymentModel::FlatFactor {
            factor: ESTIMATED_PAYMENT_FACTOR,
        }
    }
}

impl PaymentModel {
    /// New housing payment for a scenario. The flat factor covers the whole
    /// payment; the amortized model adds taxes and insurance on top of
    /// principal and interest.
    pub fn monthly_payment(&self, scenario: &LoanScenario) -> f64 {
        match *self {
            PaymentModel::FlatFactor { factor } => scenario.loan_amount * factor,
            PaymentModel::Amortized { annual_rate } => {
                principal_and_interest(
                    scenario.loan_amount,
                    annual_rate,
                    scenario.loan_term_years,
                ) + scenario.property_value * ESTIMATED_TAX_INSURANCE_RATE / 12.0
            }
        }
    }
}

fn principal_and_interest(loan_amount: f64, annual_rate: f64, term: LoanTerm) -> f64 {
    let periods = f64::from(term.months());
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate <= 0.0 {
        return loan_amount / periods;
    }
    let growth = (1.0 + monthly_rate).powf(periods);
    loan_amount * (monthly_rate * growth) / (growth - 1.0)
}

/// Derives LTV and DTI from a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricCalculator {
    payment_model: PaymentModel,
}

impl MetricCalculator {
    pub fn new(payment_model: PaymentModel) -> Self {
        Self { payment_model }
    }

    pub fn derive(&self, scenario: &LoanScenario) -> Result<DerivedMetrics, InvalidScenario> {
        // `!(x > 0.0)` also rejects NaN.
        if !(scenario.property_value > 0.0) {
            return Err(InvalidScenario::NonPositivePropertyValue(
                scenario.property_value,
            ));
        }
        if !(scenario.annual_income > 0.0) {
            return Err(InvalidScenario::NonPositiveIncome(scenario.annual_income));
        }

        let loan_to_value = scenario.loan_amount / scenario.property_value;
        let monthly_income = scenario.annual_income / 12.0;
        let estimated_monthly_payment = self.payment_model.monthly_payment(scenario);
        let debt_to_income =
            (scenario.monthly_debt_payments + estimated_monthly_payment) / monthly_income;

        Ok(DerivedMetrics {
            loan_to_value,
            debt_to_income,
            monthly_income,
            estimated_monthly_payment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::tests::common::scenario;

    #[test]
    fn derives_ratios_with_flat_payment_factor() {
        let metrics = MetricCalculator::default()
            .derive(&scenario())
            .expect("valid scenario");

        assert_eq!(metrics.loan_to_value, 350_000.0 / 400_000.0);
        assert_eq!(metrics.estimated_monthly_payment, 350_000.0 * 0.006);
        assert_eq!(
            metrics.debt_to_income,
            (500.0 + 350_000.0 * 0.006) / (75_000.0 / 12.0)
        );
    }

    #[test]
    fn rejects_zero_property_value() {
        let mut input = scenario();
        input.property_value = 0.0;

        let err = MetricCalculator::default()
            .derive(&input)
            .expect_err("zero property value rejected");
        assert_eq!(err, InvalidScenario::NonPositivePropertyValue(0.0));
    }

    #[test]
    fn rejects_non_positive_or_nan_income() {
        let mut input = scenario();
        input.annual_income = -1.0;
        assert!(matches!(
            MetricCalculator::default().derive(&input),
            Err(InvalidScenario::NonPositiveIncome(_))
        ));

        input.annual_income = f64::NAN;
        assert!(MetricCalculator::default().derive(&input).is_err());
    }

    #[test]
    fn ltv_is_not_clamped() {
        let mut input = scenario();
        input.loan_amount = 500_000.0;

        let metrics = MetricCalculator::default()
            .derive(&input)
            .expect("valid scenario");
        assert_eq!(metrics.loan_to_value, 1.25);
    }

    #[test]
    fn amortized_model_uses_loan_term() {
        let principal = principal_and_interest(350_000.0, 0.06, LoanTerm::Thirty);
        assert!((principal - 2098.43).abs() < 0.01, "got {principal}");

        let model = PaymentModel::Amortized {
            annual_rate: DEFAULT_AMORTIZATION_RATE,
        };
        let mut input = scenario();
        let thirty = model.monthly_payment(&input);
        input.loan_term_years = LoanTerm::Fifteen;
        let fifteen = model.monthly_payment(&input);

        assert!(fifteen > thirty);
    }

    #[test]
    fn amortized_model_adds_taxes_and_insurance() {
        let calculator = MetricCalculator::new(PaymentModel::Amortized {
            annual_rate: DEFAULT_AMORTIZATION_RATE,
        });
        let metrics = calculator.derive(&scenario()).expect("valid scenario");

        // $2,098.43 principal and interest plus $500 of taxes and insurance.
        assert!(
            (metrics.estimated_monthly_payment - 2598.43).abs() < 0.01,
            "got {}",
            metrics.estimated_monthly_payment
        );
        assert!(
            (metrics.debt_to_income - 0.4957).abs() < 0.0001,
            "got {}",
            metrics.debt_to_income
        );
    }

    #[test]
    fn amortized_model_handles_zero_rate() {
        let model = PaymentModel::Amortized { annual_rate: 0.0 };
        let mut input = scenario();
        input.loan_amount = 360_000.0;
        input.property_value = 400_000.0;

        let payment = model.monthly_payment(&input);
        assert!((payment - 1_500.0).abs() < 1e-9, "got {payment}");
    }
}
