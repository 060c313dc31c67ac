use serde::{Deserialize, Serialize};

use super::domain::{DerivedMetrics, Difficulty, FixSuggestion, LoanScenario};

/// Targets the fix generator aims for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixPolicy {
    /// Stricter of the two product DTI limits (Home Possible).
    pub target_dti: f64,
    pub target_ltv: f64,
    /// Scores in `[credit_floor, credit_target)` get a credit suggestion.
    pub credit_floor: u16,
    pub credit_target: u16,
}

impl Default for FixPolicy {
    fn default() -> Self {
        Self {
            target_dti: 0.45,
            target_ltv: 0.90,
            credit_floor: 620,
            credit_target: 660,
        }
    }
}

impl FixPolicy {
    /// Emits DTI, LTV, then credit suggestions, skipping any already satisfied.
    pub fn suggest(&self, scenario: &LoanScenario, metrics: &DerivedMetrics) -> Vec<FixSuggestion> {
        let mut suggestions = Vec::new();

        if metrics.debt_to_income > self.target_dti {
            let reduction =
                round_up_dollars((metrics.debt_to_income - self.target_dti) * metrics.monthly_income);
            suggestions.push(FixSuggestion {
                description: format!(
                    "Reduce monthly debt payments by {}/month",
                    format_dollars(reduction)
                ),
                impact: format!(
                    "Projected: brings DTI from {:.1}% to {:.0}% or below, qualifying for Home Possible",
                    metrics.debt_to_income * 100.0,
                    self.target_dti * 100.0
                ),
                difficulty: Difficulty::Moderate,
            });
        }

        if metrics.loan_to_value > self.target_ltv {
            let additional =
                round_up_dollars((metrics.loan_to_value - self.target_ltv) * scenario.property_value);
            suggestions.push(FixSuggestion {
                description: format!("Increase down payment by {}", format_dollars(additional)),
                impact: format!(
                    "Projected: lowers LTV from {:.1}% to {:.0}%",
                    metrics.loan_to_value * 100.0,
                    self.target_ltv * 100.0
                ),
                difficulty: Difficulty::Hard,
            });
        }

        if (self.credit_floor..self.credit_target).contains(&scenario.credit_score) {
            suggestions.push(FixSuggestion {
                description: format!("Improve credit score to {}+", self.credit_target),
                impact: format!(
                    "Projected: meets the Home Possible minimum credit score of {}",
                    self.credit_target
                ),
                difficulty: Difficulty::Moderate,
            });
        }

        suggestions
    }
}

/// Rounds up to whole dollars after settling to cents, so float noise such as
/// 125.00000000000011 does not become 126.
pub fn round_up_dollars(amount: f64) -> u64 {
    let cents = (amount * 100.0).round();
    let dollars = (cents / 100.0).ceil();
    if dollars <= 0.0 {
        0
    } else {
        dollars as u64
    }
}

/// `1234567` -> `$1,234,567`
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
