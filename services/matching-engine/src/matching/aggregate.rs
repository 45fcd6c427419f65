//! Per-donor aggregation
//!
//! Quadratic funding takes the square root of each donor's *total* to a
//! project, so repeat donations are summed before anything else happens.

use std::collections::HashMap;

use qf_types::errors::InvalidInput;
use qf_types::ids::DonorId;
use qf_types::ledger::ProjectEntry;
use rust_decimal::Decimal;

/// One donor's total contribution to a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorTotal {
    pub donor_id: DonorId,
    pub amount: Decimal,
}

/// Sum each donor's contributions to one project
///
/// Donors are returned in first-contribution order. Zero and negative
/// amounts and contributions filed under the wrong project are rejected.
pub fn aggregate_project(entry: &ProjectEntry) -> Result<Vec<DonorTotal>, InvalidInput> {
    let mut totals: Vec<DonorTotal> = Vec::new();
    let mut positions: HashMap<&DonorId, usize> = HashMap::new();

    for contribution in &entry.contributions {
        if contribution.project_id != entry.project_id {
            return Err(InvalidInput::MalformedEntry {
                reason: format!(
                    "contribution for project {} filed under project {}",
                    contribution.project_id, entry.project_id
                ),
            });
        }
        if contribution.amount < Decimal::ZERO {
            return Err(InvalidInput::NegativeContribution {
                project_id: contribution.project_id.to_string(),
                donor_id: contribution.donor_id.to_string(),
                amount: contribution.amount.to_string(),
            });
        }
        if contribution.amount.is_zero() {
            return Err(InvalidInput::NonPositiveContribution {
                project_id: contribution.project_id.to_string(),
                donor_id: contribution.donor_id.to_string(),
                amount: contribution.amount.to_string(),
            });
        }

        match positions.get(&contribution.donor_id) {
            Some(&position) => {
                let total = &mut totals[position];
                total.amount = total
                    .amount
                    .checked_add(contribution.amount)
                    .ok_or_else(|| InvalidInput::Overflow {
                        context: format!("donor total for project {}", entry.project_id),
                    })?;
            }
            None => {
                positions.insert(&contribution.donor_id, totals.len());
                totals.push(DonorTotal {
                    donor_id: contribution.donor_id.clone(),
                    amount: contribution.amount,
                });
            }
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qf_types::contribution::Contribution;
    use qf_types::ids::ProjectId;

    fn entry(project: u64, donations: &[(u64, &str, i64)]) -> ProjectEntry {
        ProjectEntry {
            project_id: ProjectId::new(project),
            contributions: donations
                .iter()
                .map(|(p, donor, amount)| Contribution {
                    project_id: ProjectId::new(*p),
                    donor_id: DonorId::new(*donor),
                    amount: Decimal::from(*amount),
                })
                .collect(),
        }
    }

    #[test]
    fn test_repeat_donations_are_summed() {
        let totals = aggregate_project(&entry(1, &[(1, "alice", 1), (1, "bob", 2), (1, "alice", 3)])).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].donor_id, DonorId::new("alice"));
        assert_eq!(totals[0].amount, Decimal::from(4));
        assert_eq!(totals[1].amount, Decimal::from(2));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = aggregate_project(&entry(1, &[(1, "alice", 0), (1, "bob", 2)])).unwrap_err();
        assert!(matches!(err, InvalidInput::NonPositiveContribution { .. }));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = aggregate_project(&entry(1, &[(1, "alice", 3), (1, "bob", -5)])).unwrap_err();
        assert!(matches!(err, InvalidInput::NegativeContribution { .. }));
    }

    #[test]
    fn test_misfiled_contribution_rejected() {
        let err = aggregate_project(&entry(1, &[(2, "alice", 3)])).unwrap_err();
        assert!(matches!(err, InvalidInput::MalformedEntry { .. }));
    }

    #[test]
    fn test_overflow_reported() {
        let mut e = entry(1, &[]);
        for _ in 0..2 {
            e.contributions.push(Contribution {
                project_id: ProjectId::new(1),
                donor_id: DonorId::new("whale"),
                amount: Decimal::MAX,
            });
        }
        assert!(matches!(aggregate_project(&e), Err(InvalidInput::Overflow { .. })));
    }
}
