use super::checks::{Check, Section, GROUP_SIZE};
use crate::{config::Params, TransactionGroup, ValidationError, Verdict};
use serde::Serialize;
use tracing::debug;

/// Eligibility predicate for the fee-payment + asset-transfer group
///
/// Holds only its construction-time parameters, so one validator can be
/// shared across threads and reused for any number of groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupValidator {
    params: Params,
}

impl GroupValidator {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// `true` iff every check holds for `group`
    pub fn evaluate(&self, group: &TransactionGroup) -> bool {
        self.validate(group).is_ok()
    }

    /// Validate a transaction group
    /// Returns Ok(()) if eligible, Err with the first failing check otherwise
    pub fn validate(&self, group: &TransactionGroup) -> Result<(), ValidationError> {
        if group.len() != GROUP_SIZE {
            debug!("Group rejected: {} transactions", group.len());
            return Err(ValidationError::GroupSize {
                expected: GROUP_SIZE,
                got: group.len(),
            });
        }

        match Check::ALL
            .into_iter()
            .find(|check| !check.holds(group, &self.params))
        {
            Some(check) => {
                debug!("Group rejected by check {}", check);
                Err(ValidationError::CheckFailed { check })
            }
            None => Ok(()),
        }
    }

    /// Evaluate every check without stopping at the first failure
    pub fn report(&self, group: &TransactionGroup) -> EvaluationReport {
        let outcomes: Vec<CheckOutcome> = Check::ALL
            .into_iter()
            .map(|check| CheckOutcome::new(check, check.holds(group, &self.params)))
            .collect();

        let report = EvaluationReport {
            asset_id: self.params.asset_id,
            group_size: group.len(),
            verdict: Verdict::from(outcomes.iter().all(|outcome| outcome.passed)),
            outcomes,
        };

        for outcome in report.outcomes.iter().filter(|outcome| !outcome.passed) {
            debug!("Check {} failed", outcome.check);
        }
        report
    }
}

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub number: usize,
    pub check: Check,
    pub section: Section,
    pub description: &'static str,
    pub passed: bool,
}

impl CheckOutcome {
    fn new(check: Check, passed: bool) -> Self {
        Self {
            number: check.number(),
            check,
            section: check.section(),
            description: check.description(),
            passed,
        }
    }
}

/// Exhaustive evaluation of a group, one outcome per check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub asset_id: u64,
    pub group_size: usize,
    pub verdict: Verdict,
    pub outcomes: Vec<CheckOutcome>,
}

impl EvaluationReport {
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn failed(&self) -> Vec<Check> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| outcome.check)
            .collect()
    }
}
