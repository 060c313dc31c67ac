use metrics_exporter_prometheus::PrometheusHandle;
use sage::config::EligibilityConfig;
use sage::eligibility::{
    EligibilityEngine, EligibilityService, LoanTerm, Occupancy, PropertyType, ReferenceData,
};
use sage::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the eligibility service from configuration, loading income limits if configured.
pub(crate) fn build_service(config: &EligibilityConfig) -> Result<EligibilityService, AppError> {
    let reference = match &config.income_limits_csv {
        Some(path) => {
            let data = ReferenceData::us_states().with_income_limits_from_path(path)?;
            info!(
                path = %path.display(),
                counties = data.income_limit_count(),
                "loaded area income limits"
            );
            data
        }
        None => ReferenceData::us_states(),
    };

    let engine = EligibilityEngine::with_payment_model(config.payment_model);
    Ok(EligibilityService::new(engine, Arc::new(reference)))
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::from_code(raw).ok_or_else(|| {
        let known: Vec<&str> = PropertyType::ALL.iter().map(|kind| kind.code()).collect();
        format!("unknown property type '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_occupancy(raw: &str) -> Result<Occupancy, String> {
    Occupancy::from_code(raw).ok_or_else(|| {
        format!("unknown occupancy '{raw}' (expected primary, secondary, or investment)")
    })
}

pub(crate) fn parse_loan_term(raw: &str) -> Result<LoanTerm, String> {
    let years = raw
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("failed to parse '{raw}' as years ({err})"))?;
    LoanTerm::try_from(years)
}
