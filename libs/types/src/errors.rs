//! Error types for quadratic funding
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level matching error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchingError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("Round error: {0}")]
    Round(#[from] RoundError),
}

impl MatchingError {
    /// True for the `InvalidInput` kind
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MatchingError::InvalidInput(_))
    }
}

/// Reasons a caller-supplied value is rejected
///
/// Never coerced into a default; always reported back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("negative pool: {pool}")]
    NegativePool { pool: String },

    #[error("contribution amount must be positive: {amount} from {donor_id} to project {project_id}")]
    NonPositiveContribution {
        project_id: String,
        donor_id: String,
        amount: String,
    },

    #[error("negative contribution: {amount} from {donor_id} to project {project_id}")]
    NegativeContribution {
        project_id: String,
        donor_id: String,
        amount: String,
    },

    #[error("malformed ledger entry: {reason}")]
    MalformedEntry { reason: String },

    #[error("invalid donor id: {value:?}")]
    InvalidDonorId { value: String },

    #[error("arithmetic overflow while computing {context}")]
    Overflow { context: String },

    #[error("match cap must be within (0, 1]: {cap}")]
    InvalidMatchCap { cap: String },

    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("unsupported payout precision: {decimals} decimals (max {max})")]
    UnsupportedPrecision { decimals: u32, max: u32 },
}

/// Round lifecycle errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoundError {
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Round must start before it ends: starts {starts_at}, ends {ends_at}")]
    InvalidSchedule { starts_at: String, ends_at: String },

    #[error("Round {round_id} is not accepting contributions (status {status})")]
    NotAcceptingContributions { round_id: String, status: String },

    #[error("Project {project_id} is not eligible in round {round_id}")]
    ProjectNotEligible { round_id: String, project_id: String },

    #[error("Round {round_id} is closed")]
    RoundClosed { round_id: String },

    #[error("Round {round_id} must be closed before finalizing (status {status})")]
    NotClosed { round_id: String, status: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_pool_display() {
        let err = InvalidInput::NegativePool { pool: "-1".to_string() };
        assert_eq!(err.to_string(), "negative pool: -1");
    }

    #[test]
    fn test_matching_error_from_invalid_input() {
        let err: MatchingError = InvalidInput::InvalidWorkerCount.into();
        assert!(err.is_invalid_input());
        assert!(err.to_string().starts_with("Invalid input:"));
    }

    #[test]
    fn test_matching_error_from_round_error() {
        let err: MatchingError = RoundError::NotClosed {
            round_id: "r".to_string(),
            status: "OPEN".to_string(),
        }
        .into();
        assert!(matches!(err, MatchingError::Round(_)));
        assert!(!err.is_invalid_input());
    }
}
