use std::io::Cursor;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::eligibility::domain::{
    DerivedMetrics, LoanScenario, LoanTerm, Occupancy, PropertyType,
};
use crate::eligibility::reference::ReferenceData;
use crate::eligibility::{EligibilityEngine, EligibilityService};

/// 680 credit, $75k income, $350k on a $400k single-family primary home.
pub(crate) fn scenario() -> LoanScenario {
    LoanScenario {
        credit_score: 680,
        annual_income: 75_000.0,
        is_first_time_buyer: true,
        loan_amount: 350_000.0,
        property_value: 400_000.0,
        loan_term_years: LoanTerm::Thirty,
        monthly_debt_payments: 500.0,
        property_type: PropertyType::SingleFamily,
        property_state: "CA".to_string(),
        property_county: "Los Angeles".to_string(),
        occupancy: Occupancy::Primary,
    }
}

/// Scenario whose DTI lands on `dti` with $6,250 monthly income.
pub(crate) fn scenario_with_dti(dti: f64) -> LoanScenario {
    let mut input = scenario();
    let monthly_income = input.annual_income / 12.0;
    input.monthly_debt_payments = dti * monthly_income - input.loan_amount * 0.006;
    input
}

pub(crate) fn metrics_with(loan_to_value: f64, debt_to_income: f64) -> DerivedMetrics {
    DerivedMetrics {
        loan_to_value,
        debt_to_income,
        monthly_income: 6_250.0,
        estimated_monthly_payment: 2_100.0,
    }
}

pub(crate) fn reference_data() -> Arc<ReferenceData> {
    let data = ReferenceData::us_states()
        .with_income_limits_from_reader(Cursor::new(
            "state,county,median_income\nCA,Los Angeles,98200\n",
        ))
        .expect("reference data loads");
    Arc::new(data)
}

pub(crate) fn service() -> Arc<EligibilityService> {
    Arc::new(EligibilityService::new(
        EligibilityEngine::default(),
        reference_data(),
    ))
}

pub(crate) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
