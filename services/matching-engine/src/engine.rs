//! Matching engine core
//!
//! Stateless coordinator: aggregates each project's donors, computes the
//! quadratic subsidy, then fits the subsidies into the pool.

use qf_types::errors::{InvalidInput, MatchingError, RoundError};
use qf_types::ids::{ProjectId, RoundId};
use qf_types::ledger::{ProjectEntry, ProjectLedger};
use qf_types::numeric::checked_sum;
use qf_types::result::{MatchReport, MatchResult};
use qf_types::round::{MatchingRound, RoundStatus};
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::MatchingConfig;
use crate::matching::{aggregate_project, apply_cap, quadratic_match, scale_to_pool, QuadraticTerms};

/// Quadratic funding matching engine
///
/// Owns only its configuration, so one instance can be shared freely
/// between threads and requests.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    /// Create an engine with a validated configuration
    pub fn new(config: MatchingConfig) -> Result<Self, MatchingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Compute the match for every project with at least one contribution,
    /// in ledger order
    ///
    /// Zero or negative amounts anywhere in the ledger are `InvalidInput`.
    pub fn compute(&self, ledger: &ProjectLedger, pool: Decimal) -> Result<Vec<MatchResult>, MatchingError> {
        Ok(self.compute_report(ledger, pool)?.results)
    }

    /// Same as [`compute`](Self::compute) with allocation diagnostics
    pub fn compute_report(&self, ledger: &ProjectLedger, pool: Decimal) -> Result<MatchReport, MatchingError> {
        self.allocate(None, ledger, pool)
    }

    /// Live estimate for a round in any status
    ///
    /// Only the round's eligible projects are matched, against the round pool.
    pub fn estimate_round(&self, round: &MatchingRound, ledger: &ProjectLedger) -> Result<MatchReport, MatchingError> {
        let eligible = round.eligible_ledger(ledger);
        debug!(
            round_id = %round.round_id,
            status = %round.status(),
            eligible_projects = eligible.len(),
            "Estimating round matches"
        );
        self.allocate(Some(round.round_id), &eligible, round.pool())
    }

    /// Final allocation for a closed round
    pub fn finalize_round(&self, round: &MatchingRound, ledger: &ProjectLedger) -> Result<MatchReport, MatchingError> {
        if round.status() != RoundStatus::Closed {
            return Err(RoundError::NotClosed {
                round_id: round.round_id.to_string(),
                status: round.status().to_string(),
            }
            .into());
        }

        let eligible = round.eligible_ledger(ledger);
        let report = self.allocate(Some(round.round_id), &eligible, round.pool())?;
        info!(
            round_id = %round.round_id,
            projects = report.results.len(),
            pool = %report.pool,
            total_final_match = %report.total_final_match,
            scaled = report.scaled,
            "Round finalized"
        );
        Ok(report)
    }

    fn allocate(
        &self,
        round_id: Option<RoundId>,
        ledger: &ProjectLedger,
        pool: Decimal,
    ) -> Result<MatchReport, MatchingError> {
        if pool < Decimal::ZERO {
            return Err(InvalidInput::NegativePool { pool: pool.to_string() }.into());
        }

        let matched: Vec<(ProjectId, QuadraticTerms)> = self
            .project_terms(ledger.entries())?
            .into_iter()
            .flatten()
            .collect();

        let raw_matches: Vec<Decimal> = matched.iter().map(|(_, t)| t.raw_match).collect();
        let mut allocation = scale_to_pool(&raw_matches, pool)?;

        let capped_projects = match self.config.match_cap {
            Some(cap) => {
                let capped = apply_cap(&mut allocation.final_matches, pool, cap);
                for &i in &capped {
                    warn!(
                        project_id = %matched[i].0,
                        cap = %cap,
                        "Project match limited by cap"
                    );
                }
                capped.into_iter().map(|i| matched[i].0).collect()
            }
            None => Vec::new(),
        };

        let results: Vec<MatchResult> = matched
            .into_iter()
            .zip(allocation.final_matches)
            .map(|((project_id, terms), final_match)| MatchResult {
                project_id,
                raw_match: terms.raw_match,
                final_match,
                contributor_count: terms.contributor_count,
                total_raised: terms.total_raised,
            })
            .collect();

        let total_final_match = checked_sum(results.iter().map(|r| r.final_match)).ok_or_else(|| {
            InvalidInput::Overflow {
                context: "total final match".to_string(),
            }
        })?;
        let unallocated = pool - total_final_match;

        debug!(
            projects = results.len(),
            pool = %pool,
            total_raw_match = %allocation.total_raw_match,
            total_final_match = %total_final_match,
            scale_factor = %allocation.scale_factor,
            "Computed quadratic matches"
        );

        Ok(MatchReport {
            round_id,
            pool,
            results,
            total_raw_match: allocation.total_raw_match,
            total_final_match,
            scale_factor: allocation.scale_factor,
            scaled: allocation.scaled,
            capped_projects,
            unallocated,
        })
    }

    /// Per-project terms in ledger order; `None` for projects without
    /// contributions
    ///
    /// Large ledgers are split into at most `max_workers` contiguous chunks
    /// on the rayon pool. Chunk results are collected in order, so output
    /// and the first reported error match the sequential path.
    fn project_terms(
        &self,
        entries: &[ProjectEntry],
    ) -> Result<Vec<ProjectTerms>, InvalidInput> {
        let workers = self.worker_count(entries.len());
        if workers <= 1 {
            return entries.iter().map(terms_for).collect();
        }

        let chunk_size = entries.len().div_ceil(workers);
        let chunks: Vec<Vec<Result<ProjectTerms, InvalidInput>>> = entries
            .par_chunks(chunk_size)
            .map(|chunk| chunk.iter().map(terms_for).collect())
            .collect();
        chunks.into_iter().flatten().collect()
    }

    fn worker_count(&self, projects: usize) -> usize {
        if projects <= self.config.parallel_threshold {
            return 1;
        }
        self.config
            .max_workers
            .min(rayon::current_num_threads())
            .min(projects)
            .max(1)
    }
}

type ProjectTerms = Option<(ProjectId, QuadraticTerms)>;

fn terms_for(entry: &ProjectEntry) -> Result<ProjectTerms, InvalidInput> {
    let donors = aggregate_project(entry)?;
    if donors.is_empty() {
        return Ok(None);
    }
    Ok(Some((entry.project_id, quadratic_match(&donors)?)))
}

/// Compute quadratic matches with the default configuration
pub fn compute(ledger: &ProjectLedger, pool: Decimal) -> Result<Vec<MatchResult>, MatchingError> {
    MatchingEngine::default().compute(ledger, pool)
}
