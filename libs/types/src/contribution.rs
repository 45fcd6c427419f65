//! Contribution records
//!
//! A contribution is one donor transaction to one project within a round.
//! Immutable once recorded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidInput;
use crate::ids::{DonorId, ProjectId};

/// Single donation (mirrors the vault's `Donated(projectId, donor, amount)` event)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contribution {
    pub project_id: ProjectId,
    pub donor_id: DonorId,
    pub amount: Decimal,
}

impl Contribution {
    /// Create a contribution, rejecting zero and negative amounts
    pub fn try_new(
        project_id: ProjectId,
        donor_id: DonorId,
        amount: Decimal,
    ) -> Result<Self, InvalidInput> {
        if amount <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveContribution {
                project_id: project_id.to_string(),
                donor_id: donor_id.to_string(),
                amount: amount.to_string(),
            });
        }
        Ok(Self {
            project_id,
            donor_id,
            amount,
        })
    }

    /// Whether this record counts toward matching
    pub fn is_countable(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}
