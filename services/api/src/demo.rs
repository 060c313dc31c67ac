use crate::infra::{build_service, parse_loan_term, parse_occupancy, parse_property_type};
use clap::Args;
use sage::config::AppConfig;
use sage::eligibility::{
    EligibilityEngine, EligibilityReport, EligibilityResult, LoanScenario, LoanTerm, Occupancy,
    PropertyType,
};
use sage::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// JSON file holding a loan scenario; replaces the individual flags
    #[arg(long)]
    pub(crate) scenario: Option<PathBuf>,
    /// Borrower credit score (300-850)
    #[arg(long, required_unless_present = "scenario")]
    pub(crate) credit_score: Option<u16>,
    /// Gross annual income in dollars
    #[arg(long, required_unless_present = "scenario")]
    pub(crate) annual_income: Option<f64>,
    /// Requested loan amount in dollars
    #[arg(long, required_unless_present = "scenario")]
    pub(crate) loan_amount: Option<f64>,
    /// Appraised property value in dollars
    #[arg(long, required_unless_present = "scenario")]
    pub(crate) property_value: Option<f64>,
    /// Existing monthly debt payments in dollars
    #[arg(long, default_value_t = 0.0)]
    pub(crate) monthly_debt: f64,
    /// Loan term in years (15, 20, or 30)
    #[arg(long, value_parser = parse_loan_term, default_value = "30")]
    pub(crate) loan_term: LoanTerm,
    /// Property type code (single_family, condo, pud, 2_unit, 3_unit, 4_unit, manufactured)
    #[arg(long, value_parser = parse_property_type, default_value = "single_family")]
    pub(crate) property_type: PropertyType,
    /// Two-letter property state code
    #[arg(long, required_unless_present = "scenario")]
    pub(crate) state: Option<String>,
    /// Property county name
    #[arg(long, required_unless_present = "scenario")]
    pub(crate) county: Option<String>,
    /// Occupancy (primary, secondary, investment)
    #[arg(long, value_parser = parse_occupancy, default_value = "primary")]
    pub(crate) occupancy: Occupancy,
    /// Borrower is a first-time home buyer
    #[arg(long)]
    pub(crate) first_time_buyer: bool,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl CheckArgs {
    pub(crate) fn into_scenario(self) -> Result<LoanScenario, AppError> {
        if let Some(path) = self.scenario {
            let raw = std::fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&raw)?);
        }

        Ok(LoanScenario {
            credit_score: required(self.credit_score, "--credit-score")?,
            annual_income: required(self.annual_income, "--annual-income")?,
            is_first_time_buyer: self.first_time_buyer,
            loan_amount: required(self.loan_amount, "--loan-amount")?,
            property_value: required(self.property_value, "--property-value")?,
            loan_term_years: self.loan_term,
            monthly_debt_payments: self.monthly_debt,
            property_type: self.property_type,
            property_state: required(self.state, "--state")?,
            property_county: required(self.county, "--county")?,
            occupancy: self.occupancy,
        })
    }
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::InvalidInput(format!("{flag} is required without --scenario")))
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include violations and fix suggestions for every scenario
    #[arg(long)]
    pub(crate) details: bool,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let json = args.json;
    let scenario = args.into_scenario()?;

    let config = AppConfig::load()?;
    let service = build_service(&config.eligibility)?;
    let report = service.check(scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = EligibilityEngine::with_payment_model(config.eligibility.payment_model);

    println!("Eligibility scenario catalogue");
    for (name, scenario) in demo_scenarios() {
        let result = engine
            .evaluate(&scenario)
            .map_err(|err| AppError::InvalidInput(format!("{name}: {err}")))?;

        println!(
            "\n{} | LTV {:.1}% | DTI {:.1}%",
            name,
            result.calculated_ltv * 100.0,
            result.calculated_dti * 100.0
        );
        for product in &result.products {
            println!(
                "- {}: {}",
                product.product_name,
                if product.eligible { "eligible" } else { "not eligible" }
            );
        }

        if args.details {
            render_findings(&result);
        }
    }

    Ok(())
}

fn render_report(report: &EligibilityReport) {
    let result = &report.result;
    let scenario = &result.scenario;
    println!("Loan eligibility check");
    println!(
        "{} | {} | {}, {}",
        scenario.property_type,
        scenario.occupancy,
        scenario.property_county,
        scenario.property_state
    );
    println!(
        "LTV {:.1}% | DTI {:.1}%",
        result.calculated_ltv * 100.0,
        result.calculated_dti * 100.0
    );

    println!("\nProducts");
    for product in &result.products {
        println!(
            "- {} ({}): {}",
            product.product_name,
            product.gse.label(),
            if product.eligible { "eligible" } else { "not eligible" }
        );
    }

    render_findings(result);

    println!("\nRecommendation");
    println!("{}", result.recommendation);

    match &report.area_income_limit {
        Some(limit) => println!(
            "\nArea income limit for {}, {}: ${:.0} (80% of ${:.0} AMI)",
            limit.county, limit.state, limit.income_limit, limit.area_median_income
        ),
        None => println!("\nArea income limit: not available for this county"),
    }
}

fn render_findings(result: &EligibilityResult) {
    for product in result.products.iter().filter(|product| !product.eligible) {
        println!("  {} violations", product.product_name);
        for violation in &product.violations {
            println!(
                "  - {}: actual {}, required {} [{}]",
                violation.rule_description,
                violation.actual_value,
                violation.required_value,
                violation.citation
            );
        }
    }

    if result.fix_suggestions.is_empty() {
        return;
    }

    println!("  Fix suggestions (projections; re-check after changes)");
    for suggestion in &result.fix_suggestions {
        println!(
            "  - [{}] {} -> {}",
            suggestion.difficulty.label(),
            suggestion.description,
            suggestion.impact
        );
    }
}

fn demo_scenario(
    credit_score: u16,
    annual_income: f64,
    loan_amount: f64,
    property_value: f64,
    monthly_debt_payments: f64,
    property_type: PropertyType,
    occupancy: Occupancy,
) -> LoanScenario {
    LoanScenario {
        credit_score,
        annual_income,
        is_first_time_buyer: true,
        loan_amount,
        property_value,
        loan_term_years: LoanTerm::Thirty,
        monthly_debt_payments,
        property_type,
        property_state: "CA".to_string(),
        property_county: "Los Angeles".to_string(),
        occupancy,
    }
}

pub(crate) fn demo_scenarios() -> Vec<(&'static str, LoanScenario)> {
    use Occupancy::{Investment, Primary};
    use PropertyType::{Condo, SingleFamily, TwoUnit};

    vec![
        (
            "Ideal borrower",
            demo_scenario(720, 75_000.0, 350_000.0, 400_000.0, 500.0, SingleFamily, Primary),
        ),
        (
            "Credit 620",
            demo_scenario(620, 80_000.0, 300_000.0, 350_000.0, 400.0, SingleFamily, Primary),
        ),
        (
            "Credit 640",
            demo_scenario(640, 85_000.0, 320_000.0, 380_000.0, 500.0, SingleFamily, Primary),
        ),
        (
            "DTI near 48%",
            demo_scenario(700, 72_000.0, 300_000.0, 350_000.0, 1_100.0, SingleFamily, Primary),
        ),
        (
            "LTV at 97%",
            demo_scenario(700, 90_000.0, 388_000.0, 400_000.0, 600.0, SingleFamily, Primary),
        ),
        (
            "LTV at 98%",
            demo_scenario(750, 100_000.0, 392_000.0, 400_000.0, 500.0, SingleFamily, Primary),
        ),
        (
            "Credit 580",
            demo_scenario(580, 70_000.0, 250_000.0, 300_000.0, 300.0, SingleFamily, Primary),
        ),
        (
            "Investment property",
            demo_scenario(750, 150_000.0, 300_000.0, 400_000.0, 500.0, SingleFamily, Investment),
        ),
        (
            "High existing debt",
            demo_scenario(720, 60_000.0, 350_000.0, 400_000.0, 1_500.0, SingleFamily, Primary),
        ),
        (
            "Condo",
            demo_scenario(700, 80_000.0, 280_000.0, 320_000.0, 400.0, Condo, Primary),
        ),
        (
            "Owner-occupied 2-unit",
            demo_scenario(720, 95_000.0, 400_000.0, 500_000.0, 600.0, TwoUnit, Primary),
        ),
    ]
}
