use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Share of area median income that caps HomeReady/Home Possible borrowers.
pub const INCOME_LIMIT_SHARE_OF_AMI: f64 = 0.80;

const US_STATE_CODES: [&str; 56] = [
    "AK", "AL", "AR", "AS", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "GU", "HI", "IA", "ID",
    "IL", "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MP", "MS", "MT", "NC", "ND",
    "NE", "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "PR", "RI", "SC", "SD", "TN", "TX",
    "UT", "VA", "VI", "VT", "WA", "WI", "WV", "WY",
];

#[derive(Debug)]
pub enum ReferenceDataError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidIncome { state: String, county: String },
}

impl std::fmt::Display for ReferenceDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceDataError::Io(err) => write!(f, "failed to read income limits: {}", err),
            ReferenceDataError::Csv(err) => write!(f, "invalid income limit CSV data: {}", err),
            ReferenceDataError::InvalidIncome { state, county } => write!(
                f,
                "median income for {}, {} must be a positive amount",
                county, state
            ),
        }
    }
}

impl std::error::Error for ReferenceDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceDataError::Io(err) => Some(err),
            ReferenceDataError::Csv(err) => Some(err),
            ReferenceDataError::InvalidIncome { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReferenceDataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReferenceDataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct IncomeLimitRow {
    state: String,
    county: String,
    median_income: f64,
}

/// Income limit for one county, derived from its area median income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaIncomeLimit {
    pub state: String,
    pub county: String,
    pub area_median_income: f64,
    pub income_limit: f64,
}

/// Immutable lookup tables injected into intake and the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    states: BTreeSet<String>,
    income_limits: BTreeMap<(String, String), AreaIncomeLimit>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::us_states()
    }
}

impl ReferenceData {
    /// US states, DC, and territories with no income limit table.
    pub fn us_states() -> Self {
        Self {
            states: US_STATE_CODES.iter().map(|code| code.to_string()).collect(),
            income_limits: BTreeMap::new(),
        }
    }

    pub fn is_known_state(&self, code: &str) -> bool {
        self.states.contains(&code.trim().to_ascii_uppercase())
    }

    pub fn with_income_limits_from_path<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<Self, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        self.with_income_limits_from_reader(file)
    }

    /// Loads `state,county,median_income` rows; later rows replace earlier ones.
    pub fn with_income_limits_from_reader<R: Read>(
        mut self,
        reader: R,
    ) -> Result<Self, ReferenceDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        for row in csv_reader.deserialize::<IncomeLimitRow>() {
            let row = row?;
            let state = row.state.to_ascii_uppercase();
            if !(row.median_income > 0.0) {
                return Err(ReferenceDataError::InvalidIncome {
                    state,
                    county: row.county,
                });
            }

            let limit = AreaIncomeLimit {
                state: state.clone(),
                county: row.county.clone(),
                area_median_income: row.median_income,
                income_limit: row.median_income * INCOME_LIMIT_SHARE_OF_AMI,
            };
            self.income_limits
                .insert((state, county_key(&row.county)), limit);
        }

        Ok(self)
    }

    pub fn income_limit(&self, state: &str, county: &str) -> Option<&AreaIncomeLimit> {
        self.income_limits
            .get(&(state.trim().to_ascii_uppercase(), county_key(county)))
    }

    pub fn income_limit_count(&self) -> usize {
        self.income_limits.len()
    }
}

fn county_key(county: &str) -> String {
    let trimmed = county.trim().to_ascii_lowercase();
    trimmed
        .strip_suffix(" county")
        .unwrap_or(&trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LIMITS: &str = "state,county,median_income\nca,Los Angeles County,98200\nTX, Harris ,93000\n";

    #[test]
    fn recognizes_states_case_insensitively() {
        let data = ReferenceData::us_states();
        assert!(data.is_known_state("CA"));
        assert!(data.is_known_state("dc"));
        assert!(!data.is_known_state("ZZ"));
    }

    #[test]
    fn loads_income_limits_from_csv() {
        let data = ReferenceData::us_states()
            .with_income_limits_from_reader(Cursor::new(LIMITS))
            .expect("limits load");

        assert_eq!(data.income_limit_count(), 2);
        let limit = data
            .income_limit("CA", "los angeles")
            .expect("county present");
        assert_eq!(limit.area_median_income, 98_200.0);
        assert_eq!(limit.income_limit, 98_200.0 * INCOME_LIMIT_SHARE_OF_AMI);
        assert!(data.income_limit("tx", "Harris County").is_some());
        assert!(data.income_limit("TX", "Dallas").is_none());
    }

    #[test]
    fn rejects_non_positive_median_income() {
        let err = ReferenceData::us_states()
            .with_income_limits_from_reader(Cursor::new(
                "state,county,median_income\nIA,Polk,0\n",
            ))
            .expect_err("zero income rejected");
        assert!(matches!(err, ReferenceDataError::InvalidIncome { .. }));
    }

    #[test]
    fn surfaces_csv_errors() {
        let err = ReferenceData::us_states()
            .with_income_limits_from_reader(Cursor::new(
                "state,county,median_income\nIA,Polk,lots\n",
            ))
            .expect_err("bad number rejected");
        assert!(matches!(err, ReferenceDataError::Csv(_)));
    }
}
