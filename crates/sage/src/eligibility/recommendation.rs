use serde::{Deserialize, Serialize};

/// Summary outcome across both products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    BothEligible,
    HomeReadyOnly,
    HomePossibleOnly,
    NeitherEligible,
}

impl Recommendation {
    pub fn from_outcomes(home_ready_eligible: bool, home_possible_eligible: bool) -> Self {
        match (home_ready_eligible, home_possible_eligible) {
            (true, true) => Recommendation::BothEligible,
            (true, false) => Recommendation::HomeReadyOnly,
            (false, true) => Recommendation::HomePossibleOnly,
            (false, false) => Recommendation::NeitherEligible,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Recommendation::BothEligible => {
                "This scenario qualifies for both HomeReady (Fannie Mae) and Home Possible \
                 (Freddie Mac). Compare lender rates and fees for both programs to find the \
                 best terms."
            }
            Recommendation::HomeReadyOnly => {
                "This scenario qualifies for Fannie Mae HomeReady but not Freddie Mac Home \
                 Possible. Work with a lender offering HomeReady, and review the fix \
                 suggestions to see what would also qualify it for Home Possible."
            }
            Recommendation::HomePossibleOnly => {
                "This scenario qualifies for Freddie Mac Home Possible but not Fannie Mae \
                 HomeReady. Work with a lender offering Home Possible, and review the fix \
                 suggestions to see what would also qualify it for HomeReady."
            }
            Recommendation::NeitherEligible => {
                "This scenario does not currently qualify for HomeReady or Home Possible. \
                 Review the violations and fix suggestions to see what would change the \
                 outcome."
            }
        }
    }
}
