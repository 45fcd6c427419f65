//! Matching round lifecycle
//!
//! A round fixes its matching pool at creation and moves through
//! Pending -> Open -> Closed. The matching engine only ever reads a round.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contribution::Contribution;
use crate::errors::{InvalidInput, MatchingError, RoundError};
use crate::ids::{ProjectId, RoundId};
use crate::ledger::ProjectLedger;

/// Round status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoundStatus {
    /// Created, not yet accepting contributions
    Pending,
    /// Accepting contributions
    Open,
    /// Contributions frozen; matches may be finalized (terminal)
    Closed,
}

impl RoundStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundStatus::Closed)
    }

    pub fn can_transition_to(&self, next: RoundStatus) -> bool {
        matches!(
            (self, next),
            (RoundStatus::Pending, RoundStatus::Open) | (RoundStatus::Open, RoundStatus::Closed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Pending => "PENDING",
            RoundStatus::Open => "OPEN",
            RoundStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funding round with a fixed matching pool
///
/// Deserialized rounds pass the same pool and schedule checks as
/// [`MatchingRound::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoundSnapshot")]
pub struct MatchingRound {
    pub round_id: RoundId,
    pub name: String,
    pool: Decimal,
    projects: BTreeSet<ProjectId>,
    status: RoundStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl MatchingRound {
    /// Create a pending round
    ///
    /// Fails with `InvalidInput` for a negative pool and with
    /// `RoundError::InvalidSchedule` unless `starts_at < ends_at`.
    pub fn new(
        name: impl Into<String>,
        pool: Decimal,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, MatchingError> {
        validate_terms(pool, starts_at, ends_at)?;
        Ok(Self {
            round_id: RoundId::new(),
            name: name.into(),
            pool,
            projects: BTreeSet::new(),
            status: RoundStatus::Pending,
            starts_at,
            ends_at,
        })
    }

    pub fn pool(&self) -> Decimal {
        self.pool
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Eligible projects in ascending id order
    pub fn projects(&self) -> impl Iterator<Item = &ProjectId> {
        self.projects.iter()
    }

    /// Add an eligible project; returns false if it was already eligible
    pub fn add_project(&mut self, project_id: ProjectId) -> Result<bool, RoundError> {
        if self.status.is_terminal() {
            return Err(RoundError::RoundClosed {
                round_id: self.round_id.to_string(),
            });
        }
        Ok(self.projects.insert(project_id))
    }

    pub fn is_eligible(&self, project_id: &ProjectId) -> bool {
        self.projects.contains(project_id)
    }

    pub fn open(&mut self) -> Result<(), RoundError> {
        self.transition(RoundStatus::Open)
    }

    pub fn close(&mut self) -> Result<(), RoundError> {
        self.transition(RoundStatus::Closed)
    }

    fn transition(&mut self, next: RoundStatus) -> Result<(), RoundError> {
        if !self.status.can_transition_to(next) {
            return Err(RoundError::InvalidStateTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn accepts_contributions(&self) -> bool {
        self.status == RoundStatus::Open
    }

    /// Whether `now` falls inside the advertised schedule
    pub fn is_within_schedule(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    /// Admission check for a new contribution
    pub fn check_contribution(&self, contribution: &Contribution) -> Result<(), MatchingError> {
        if !self.accepts_contributions() {
            return Err(RoundError::NotAcceptingContributions {
                round_id: self.round_id.to_string(),
                status: self.status.to_string(),
            }
            .into());
        }
        if !self.is_eligible(&contribution.project_id) {
            return Err(RoundError::ProjectNotEligible {
                round_id: self.round_id.to_string(),
                project_id: contribution.project_id.to_string(),
            }
            .into());
        }
        if !contribution.is_countable() {
            return Err(InvalidInput::NonPositiveContribution {
                project_id: contribution.project_id.to_string(),
                donor_id: contribution.donor_id.to_string(),
                amount: contribution.amount.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Restrict a ledger to this round's eligible projects, keeping ledger order
    pub fn eligible_ledger(&self, ledger: &ProjectLedger) -> ProjectLedger {
        ledger.filtered(|project_id| self.is_eligible(project_id))
    }
}

fn validate_terms(pool: Decimal, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<(), MatchingError> {
    if pool < Decimal::ZERO {
        return Err(InvalidInput::NegativePool { pool: pool.to_string() }.into());
    }
    if starts_at >= ends_at {
        return Err(RoundError::InvalidSchedule {
            starts_at: starts_at.to_rfc3339(),
            ends_at: ends_at.to_rfc3339(),
        }
        .into());
    }
    Ok(())
}

/// Wire form of a round, validated on the way in
#[derive(Deserialize)]
struct RoundSnapshot {
    round_id: RoundId,
    name: String,
    pool: Decimal,
    projects: BTreeSet<ProjectId>,
    status: RoundStatus,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TryFrom<RoundSnapshot> for MatchingRound {
    type Error = MatchingError;

    fn try_from(snapshot: RoundSnapshot) -> Result<Self, Self::Error> {
        validate_terms(snapshot.pool, snapshot.starts_at, snapshot.ends_at)?;
        Ok(Self {
            round_id: snapshot.round_id,
            name: snapshot.name,
            pool: snapshot.pool,
            projects: snapshot.projects,
            status: snapshot.status,
            starts_at: snapshot.starts_at,
            ends_at: snapshot.ends_at,
        })
    }
}
