//! Per-round contribution ledger
//!
//! Maps each project to its contributions in insertion order. Project order
//! is the order projects were first seen, which fixes the order of match
//! results downstream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::contribution::Contribution;
use crate::ids::ProjectId;

/// Contributions recorded for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub project_id: ProjectId,
    pub contributions: Vec<Contribution>,
}

impl ProjectEntry {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            contributions: Vec::new(),
        }
    }
}

/// Read-only snapshot of a round's contributions, grouped by project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProjectEntry>", into = "Vec<ProjectEntry>")]
pub struct ProjectLedger {
    entries: Vec<ProjectEntry>,
    index: HashMap<ProjectId, usize>,
}

impl ProjectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from a flat contribution stream
    pub fn from_contributions<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = Contribution>,
    {
        let mut ledger = Self::new();
        for contribution in contributions {
            ledger.record(contribution);
        }
        ledger
    }

    /// Register a project with no contributions yet
    ///
    /// No-op if the project is already present.
    pub fn register_project(&mut self, project_id: ProjectId) {
        self.entry_mut(project_id);
    }

    /// Append a contribution to its project's list
    pub fn record(&mut self, contribution: Contribution) {
        self.entry_mut(contribution.project_id)
            .contributions
            .push(contribution);
    }

    fn entry_mut(&mut self, project_id: ProjectId) -> &mut ProjectEntry {
        let position = match self.index.get(&project_id) {
            Some(&position) => position,
            None => {
                self.entries.push(ProjectEntry::new(project_id));
                let position = self.entries.len() - 1;
                self.index.insert(project_id, position);
                position
            }
        };
        &mut self.entries[position]
    }

    /// Contributions for a project, if registered
    pub fn contributions(&self, project_id: &ProjectId) -> Option<&[Contribution]> {
        self.index
            .get(project_id)
            .map(|&position| self.entries[position].contributions.as_slice())
    }

    pub fn contains(&self, project_id: &ProjectId) -> bool {
        self.index.contains_key(project_id)
    }

    /// Entries in project insertion order
    pub fn entries(&self) -> &[ProjectEntry] {
        &self.entries
    }

    pub fn project_ids(&self) -> impl Iterator<Item = ProjectId> + '_ {
        self.entries.iter().map(|entry| entry.project_id)
    }

    /// Number of projects (including ones without contributions)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of contribution records across all projects
    pub fn contribution_count(&self) -> usize {
        self.entries.iter().map(|e| e.contributions.len()).sum()
    }

    /// Keep only the projects accepted by `keep`, preserving order
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&ProjectId) -> bool,
    {
        let mut ledger = Self::new();
        for entry in self.entries.iter().filter(|e| keep(&e.project_id)) {
            ledger
                .entry_mut(entry.project_id)
                .contributions
                .extend(entry.contributions.iter().cloned());
        }
        ledger
    }
}

impl From<Vec<ProjectEntry>> for ProjectLedger {
    /// Duplicate entries for the same project are merged in order.
    fn from(entries: Vec<ProjectEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            let target = ledger.entry_mut(entry.project_id);
            target.contributions.extend(entry.contributions);
        }
        ledger
    }
}

impl From<ProjectLedger> for Vec<ProjectEntry> {
    fn from(ledger: ProjectLedger) -> Self {
        ledger.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::DonorId;
    use rust_decimal::Decimal;

    fn donation(project: u64, donor: &str, amount: i64) -> Contribution {
        Contribution::try_new(ProjectId::new(project), DonorId::new(donor), Decimal::from(amount)).unwrap()
    }

    #[test]
    fn test_record_preserves_project_order() {
        let mut ledger = ProjectLedger::new();
        ledger.record(donation(3, "alice", 1));
        ledger.record(donation(1, "bob", 1));
        ledger.record(donation(3, "carol", 2));

        let order: Vec<u64> = ledger.project_ids().map(|p| p.value()).collect();
        assert_eq!(order, vec![3, 1]);
        assert_eq!(ledger.contributions(&ProjectId::new(3)).unwrap().len(), 2);
        assert_eq!(ledger.contribution_count(), 3);
    }

    #[test]
    fn test_register_empty_project() {
        let mut ledger = ProjectLedger::new();
        ledger.register_project(ProjectId::new(9));
        ledger.register_project(ProjectId::new(9));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.contributions(&ProjectId::new(9)), Some(&[][..]));
    }

    #[test]
    fn test_missing_project() {
        let ledger = ProjectLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.contributions(&ProjectId::new(1)).is_none());
    }

    #[test]
    fn test_filtered_keeps_order() {
        let ledger = ProjectLedger::from_contributions(vec![
            donation(1, "a", 1),
            donation(2, "b", 1),
            donation(3, "c", 1),
        ]);
        let odd = ledger.filtered(|p| p.value() % 2 == 1);
        let order: Vec<u64> = odd.project_ids().map(|p| p.value()).collect();
        assert_eq!(order, vec![1, 3]);
        assert_eq!(odd.contribution_count(), 2);
    }

    #[test]
    fn test_deserialization_merges_duplicate_entries() {
        let json = r#"[
            {"project_id": 1, "contributions": [{"project_id": 1, "donor_id": "a", "amount": "1"}]},
            {"project_id": 2, "contributions": []},
            {"project_id": 1, "contributions": [{"project_id": 1, "donor_id": "b", "amount": "2"}]}
        ]"#;
        let ledger: ProjectLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.contributions(&ProjectId::new(1)).unwrap().len(), 2);

        let back = serde_json::to_value(&ledger).unwrap();
        assert_eq!(back.as_array().unwrap().len(), 2);
    }
}
