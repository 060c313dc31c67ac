use std::fmt;

use serde::{Deserialize, Serialize};

/// Loan scenario submitted for an eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub credit_score: u16,
    pub annual_income: f64,
    pub is_first_time_buyer: bool,
    pub loan_amount: f64,
    pub property_value: f64,
    #[serde(default)]
    pub loan_term_years: LoanTerm,
    pub monthly_debt_payments: f64,
    pub property_type: PropertyType,
    pub property_state: String,
    pub property_county: String,
    #[serde(default)]
    pub occupancy: Occupancy,
}

/// Supported fixed-rate terms. Serialized as the bare number of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LoanTerm {
    Fifteen,
    Twenty,
    #[default]
    Thirty,
}

impl LoanTerm {
    pub fn years(self) -> u8 {
        match self {
            LoanTerm::Fifteen => 15,
            LoanTerm::Twenty => 20,
            LoanTerm::Thirty => 30,
        }
    }

    pub fn months(self) -> u32 {
        u32::from(self.years()) * 12
    }
}

impl TryFrom<u8> for LoanTerm {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            15 => Ok(LoanTerm::Fifteen),
            20 => Ok(LoanTerm::Twenty),
            30 => Ok(LoanTerm::Thirty),
            other => Err(format!("loan term must be 15, 20, or 30 years (found {other})")),
        }
    }
}

impl From<LoanTerm> for u8 {
    fn from(value: LoanTerm) -> Self {
        value.years()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "single_family")]
    SingleFamily,
    #[serde(rename = "condo")]
    Condo,
    #[serde(rename = "pud")]
    Pud,
    #[serde(rename = "2_unit")]
    TwoUnit,
    #[serde(rename = "3_unit")]
    ThreeUnit,
    #[serde(rename = "4_unit")]
    FourUnit,
    #[serde(rename = "manufactured")]
    Manufactured,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        PropertyType::SingleFamily,
        PropertyType::Condo,
        PropertyType::Pud,
        PropertyType::TwoUnit,
        PropertyType::ThreeUnit,
        PropertyType::FourUnit,
        PropertyType::Manufactured,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "single_family",
            PropertyType::Condo => "condo",
            PropertyType::Pud => "pud",
            PropertyType::TwoUnit => "2_unit",
            PropertyType::ThreeUnit => "3_unit",
            PropertyType::FourUnit => "4_unit",
            PropertyType::Manufactured => "manufactured",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    #[default]
    Primary,
    Secondary,
    Investment,
}

impl Occupancy {
    pub fn code(self) -> &'static str {
        match self {
            Occupancy::Primary => "primary",
            Occupancy::Secondary => "secondary",
            Occupancy::Investment => "investment",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "primary" => Some(Occupancy::Primary),
            "secondary" => Some(Occupancy::Secondary),
            "investment" => Some(Occupancy::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Affordable-lending products evaluated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "HomeReady")]
    HomeReady,
    #[serde(rename = "Home Possible")]
    HomePossible,
}

impl Product {
    pub fn label(self) -> &'static str {
        match self {
            Product::HomeReady => "HomeReady",
            Product::HomePossible => "Home Possible",
        }
    }

    pub fn gse(self) -> Gse {
        match self {
            Product::HomeReady => Gse::FannieMae,
            Product::HomePossible => Gse::FreddieMac,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Government-sponsored enterprise backing a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gse {
    FannieMae,
    FreddieMac,
}

impl Gse {
    pub fn label(self) -> &'static str {
        match self {
            Gse::FannieMae => "Fannie Mae",
            Gse::FreddieMac => "Freddie Mac",
        }
    }
}

/// Ratios derived from a scenario; the single source of truth for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub loan_to_value: f64,
    pub debt_to_income: f64,
    pub monthly_income: f64,
    pub estimated_monthly_payment: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule_name: String,
    pub rule_description: String,
    pub actual_value: String,
    pub required_value: String,
    pub citation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResult {
    pub product_name: Product,
    pub gse: Gse,
    pub eligible: bool,
    pub violations: Vec<RuleViolation>,
}

impl ProductResult {
    pub fn new(product: Product, violations: Vec<RuleViolation>) -> Self {
        Self {
            product_name: product,
            gse: product.gse(),
            eligible: violations.is_empty(),
            violations,
        }
    }

    pub fn violates(&self, rule_name: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.rule_name == rule_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

/// Advisory remediation step. `impact` is a projection, not a re-evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub description: String,
    pub impact: String,
    pub difficulty: Difficulty,
}

/// Complete output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub scenario: LoanScenario,
    pub calculated_ltv: f64,
    pub calculated_dti: f64,
    pub products: Vec<ProductResult>,
    pub recommendation: String,
    pub fix_suggestions: Vec<FixSuggestion>,
}

impl EligibilityResult {
    pub fn product(&self, product: Product) -> Option<&ProductResult> {
        self.products
            .iter()
            .find(|result| result.product_name == product)
    }

    pub fn is_eligible_for(&self, product: Product) -> bool {
        self.product(product)
            .map(|result| result.eligible)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_codes() {
        for kind in PropertyType::ALL {
            let wire = serde_json::to_value(kind).expect("serializes");
            assert_eq!(wire, kind.to_string());
        }
        assert_eq!(Occupancy::Investment.to_string(), "investment");
        assert_eq!(
            serde_json::to_value(Occupancy::Secondary).expect("serializes"),
            "secondary"
        );
    }
}
