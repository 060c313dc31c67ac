use super::common::*;
use crate::eligibility::domain::{Difficulty, Product};
use crate::eligibility::evaluate;
use crate::eligibility::rules::{MAX_DTI, MIN_CREDIT_SCORE};

#[test]
fn dti_fix_quotes_exact_debt_reduction() {
    let input = scenario_with_dti(0.47);

    let result = evaluate(&input).expect("valid scenario");

    assert!((result.calculated_dti - 0.47).abs() < 1e-12);
    let suggestion = &result.fix_suggestions[0];
    assert_eq!(
        suggestion.description,
        "Reduce monthly debt payments by $125/month"
    );
    assert!(suggestion.impact.contains("Home Possible"));
    assert_eq!(suggestion.difficulty, Difficulty::Moderate);
}

#[test]
fn dti_fix_rounds_partial_dollars_up() {
    let mut input = scenario();
    input.monthly_debt_payments = 900.0;

    let result = evaluate(&input).expect("valid scenario");

    // (0.48 - 0.45) * 6250 = 187.5
    assert_eq!(
        result.fix_suggestions[0].description,
        "Reduce monthly debt payments by $188/month"
    );
}

#[test]
fn no_dti_fix_at_the_home_possible_limit() {
    let input = scenario_with_dti(0.45);

    let result = evaluate(&input).expect("valid scenario");

    assert!(!result
        .product(Product::HomePossible)
        .expect("home possible")
        .violates(MAX_DTI));
    assert!(result
        .fix_suggestions
        .iter()
        .all(|suggestion| !suggestion.description.starts_with("Reduce monthly debt")));
}

#[test]
fn all_applicable_fixes_are_emitted_in_order() {
    let mut input = scenario();
    input.credit_score = 650;
    input.loan_amount = 380_000.0;
    input.monthly_debt_payments = 900.0;

    let result = evaluate(&input).expect("valid scenario");

    let descriptions: Vec<&str> = result
        .fix_suggestions
        .iter()
        .map(|suggestion| suggestion.description.as_str())
        .collect();
    assert_eq!(descriptions.len(), 3, "{descriptions:?}");
    assert!(descriptions[0].starts_with("Reduce monthly debt payments by $"));
    // (0.95 - 0.90) * 400000
    assert_eq!(descriptions[1], "Increase down payment by $20,000");
    assert_eq!(descriptions[2], "Improve credit score to 660+");
}

#[test]
fn credit_below_home_ready_minimum_gets_no_credit_fix() {
    let mut input = scenario();
    input.credit_score = 600;

    let result = evaluate(&input).expect("valid scenario");

    assert!(result.products.iter().all(|product| product.violates(MIN_CREDIT_SCORE)));
    assert!(result.fix_suggestions.is_empty());
}
