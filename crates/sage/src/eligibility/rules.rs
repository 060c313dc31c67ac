use serde::{Deserialize, Serialize};

use super::domain::{DerivedMetrics, LoanScenario, Occupancy, Product, RuleViolation};

/// Scenario attribute a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CreditScore,
    DebtToIncome,
    LoanToValue,
    Occupancy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    AtLeast,
    AtMost,
    Equals,
}

impl Comparator {
    fn symbol(self) -> &'static str {
        match self {
            Comparator::AtLeast => ">=",
            Comparator::AtMost => "<=",
            Comparator::Equals => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Score(u16),
    Ratio(f64),
    Occupancy(Occupancy),
}

/// One declarative underwriting rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    pub description: String,
    pub metric: Metric,
    pub comparator: Comparator,
    pub threshold: Threshold,
    pub citation: String,
}

/// Value pulled from a scenario for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Observed {
    Score(u16),
    Ratio(f64),
    Occupancy(Occupancy),
}

impl RuleDefinition {
    pub fn new(
        name: &str,
        description: &str,
        metric: Metric,
        comparator: Comparator,
        threshold: Threshold,
        citation: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            metric,
            comparator,
            threshold,
            citation: citation.to_string(),
        }
    }

    /// Returns a violation when the scenario fails this rule. Bounds are inclusive.
    pub fn check(
        &self,
        scenario: &LoanScenario,
        metrics: &DerivedMetrics,
    ) -> Option<RuleViolation> {
        let observed = match self.metric {
            Metric::CreditScore => Observed::Score(scenario.credit_score),
            Metric::DebtToIncome => Observed::Ratio(metrics.debt_to_income),
            Metric::LoanToValue => Observed::Ratio(metrics.loan_to_value),
            Metric::Occupancy => Observed::Occupancy(scenario.occupancy),
        };

        if self.passes(observed) {
            return None;
        }

        Some(RuleViolation {
            rule_name: self.name.clone(),
            rule_description: self.description.clone(),
            actual_value: format_observed(observed),
            required_value: self.required_value(),
            citation: self.citation.clone(),
        })
    }

    fn passes(&self, observed: Observed) -> bool {
        match (observed, self.threshold) {
            (Observed::Score(actual), Threshold::Score(limit)) => {
                compare(f64::from(actual), self.comparator, f64::from(limit))
            }
            (Observed::Ratio(actual), Threshold::Ratio(limit)) => {
                compare(actual, self.comparator, limit)
            }
            (Observed::Occupancy(actual), Threshold::Occupancy(required)) => {
                match self.comparator {
                    Comparator::Equals => actual == required,
                    Comparator::AtLeast | Comparator::AtMost => false,
                }
            }
            // A threshold of the wrong shape can never be satisfied.
            _ => false,
        }
    }

    pub fn required_value(&self) -> String {
        let value = match self.threshold {
            Threshold::Score(score) => score.to_string(),
            Threshold::Ratio(ratio) => format!("{:.0}%", ratio * 100.0),
            Threshold::Occupancy(occupancy) => occupancy.code().to_string(),
        };
        match self.comparator {
            Comparator::Equals => value,
            other => format!("{} {}", other.symbol(), value),
        }
    }
}

fn compare(actual: f64, comparator: Comparator, limit: f64) -> bool {
    match comparator {
        Comparator::AtLeast => actual >= limit,
        Comparator::AtMost => actual <= limit,
        Comparator::Equals => actual == limit,
    }
}

fn format_observed(observed: Observed) -> String {
    match observed {
        Observed::Score(score) => score.to_string(),
        Observed::Ratio(ratio) => format!("{:.1}%", ratio * 100.0),
        Observed::Occupancy(occupancy) => occupancy.code().to_string(),
    }
}

/// Ordered rule list for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRules {
    pub product: Product,
    pub rules: Vec<RuleDefinition>,
}

impl ProductRules {
    /// Runs every rule without short-circuiting so all failures are reported.
    pub fn evaluate(&self, scenario: &LoanScenario, metrics: &DerivedMetrics) -> Vec<RuleViolation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(scenario, metrics))
            .collect()
    }

    pub fn rule(&self, name: &str) -> Option<&RuleDefinition> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Fannie Mae HomeReady (Selling Guide B5-6-01, B5-6-02).
    pub fn home_ready() -> Self {
        Self {
            product: Product::HomeReady,
            rules: vec![
                RuleDefinition::new(
                    MIN_CREDIT_SCORE,
                    "Minimum credit score requirement",
                    Metric::CreditScore,
                    Comparator::AtLeast,
                    Threshold::Score(620),
                    "Fannie Mae Selling Guide B5-6-02",
                ),
                RuleDefinition::new(
                    MAX_DTI,
                    "Maximum debt-to-income ratio",
                    Metric::DebtToIncome,
                    Comparator::AtMost,
                    Threshold::Ratio(0.50),
                    "Fannie Mae Selling Guide B5-6-02",
                ),
                RuleDefinition::new(
                    MAX_LTV,
                    "Maximum loan-to-value ratio",
                    Metric::LoanToValue,
                    Comparator::AtMost,
                    Threshold::Ratio(0.97),
                    "Fannie Mae Selling Guide B5-6-01",
                ),
                RuleDefinition::new(
                    OCCUPANCY,
                    "Property must be primary residence",
                    Metric::Occupancy,
                    Comparator::Equals,
                    Threshold::Occupancy(Occupancy::Primary),
                    "Fannie Mae Selling Guide B5-6-01",
                ),
            ],
        }
    }

    /// Freddie Mac Home Possible (Guide 4501).
    pub fn home_possible() -> Self {
        Self {
            product: Product::HomePossible,
            rules: vec![
                RuleDefinition::new(
                    MIN_CREDIT_SCORE,
                    "Minimum credit score requirement",
                    Metric::CreditScore,
                    Comparator::AtLeast,
                    Threshold::Score(660),
                    "Freddie Mac Guide 4501.5",
                ),
                RuleDefinition::new(
                    MAX_DTI,
                    "Maximum debt-to-income ratio",
                    Metric::DebtToIncome,
                    Comparator::AtMost,
                    Threshold::Ratio(0.45),
                    "Freddie Mac Guide 4501.5, 5401.2",
                ),
                RuleDefinition::new(
                    MAX_LTV,
                    "Maximum loan-to-value ratio",
                    Metric::LoanToValue,
                    Comparator::AtMost,
                    Threshold::Ratio(0.97),
                    "Freddie Mac Guide 4501.7",
                ),
                RuleDefinition::new(
                    OCCUPANCY,
                    "Property must be primary residence",
                    Metric::Occupancy,
                    Comparator::Equals,
                    Threshold::Occupancy(Occupancy::Primary),
                    "Freddie Mac Guide 4501.4",
                ),
            ],
        }
    }
}

pub const MIN_CREDIT_SCORE: &str = "min_credit_score";
pub const MAX_DTI: &str = "max_dti";
pub const MAX_LTV: &str = "max_ltv";
pub const OCCUPANCY: &str = "occupancy";

/// Rule sets for both products. HomeReady is always reported first.
///
/// The LTV and occupancy rules are kept per product even though they match
/// today; each GSE revises its guide independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    pub home_ready: ProductRules,
    pub home_possible: ProductRules,
}

impl RuleBook {
    pub fn standard() -> Self {
        Self {
            home_ready: ProductRules::home_ready(),
            home_possible: ProductRules::home_possible(),
        }
    }

    pub fn products(&self) -> [&ProductRules; 2] {
        [&self.home_ready, &self.home_possible]
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}
