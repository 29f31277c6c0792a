//! Report types for simulation runs.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::simulation::{OperationKind, OperationOutcome};

/// Complete report from one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Unique id of this run (for log correlation).
    pub run_id: String,
    pub seed: u64,
    pub chain_id: String,
    /// When the run started (RFC 3339).
    pub started_at: String,
    pub elapsed_ms: u64,
    pub total_blocks: u64,
    /// Blocks actually completed (fewer if fail_fast stopped the run).
    pub completed_blocks: u64,
    pub operations: u64,
    pub halted: bool,
    /// Outcome counts keyed by operation name.
    pub summary: BTreeMap<String, KindSummary>,
    /// Failure reasons grouped by (truncated) text, most frequent first.
    pub failures: Vec<FailureGroup>,
    /// First occurrence of each distinct failure reason.
    pub interesting_cases: Vec<InterestingCase>,
    pub final_nft_supply: usize,
    /// Hex SHA-256 over every accepted request, in order.
    pub request_digest: String,
}

impl SimulationReport {
    pub fn total_ok(&self) -> u64 {
        self.summary.values().map(|s| s.ok).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.summary.values().map(|s| s.failed).sum()
    }

    pub fn total_noop(&self) -> u64 {
        self.summary.values().map(|s| s.noop).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSummary {
    pub ok: u64,
    pub noop: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureGroup {
    pub reason: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestingCase {
    pub block: u64,
    pub step: u64,
    pub operation: OperationKind,
    pub category: String,
    pub reason: String,
}

/// Accumulates outcomes into a [`SimulationReport`].
pub(crate) struct ReportBuilder {
    summary: BTreeMap<String, KindSummary>,
    failure_counts: HashMap<String, u64>,
    interesting_cases: Vec<InterestingCase>,
    digest: Sha256,
    operations: u64,
}

impl ReportBuilder {
    pub(crate) fn new() -> Self {
        let summary = OperationKind::ALL
            .iter()
            .map(|k| (k.name().to_string(), KindSummary::default()))
            .collect();
        Self {
            summary,
            failure_counts: HashMap::new(),
            interesting_cases: Vec::new(),
            digest: Sha256::new(),
            operations: 0,
        }
    }

    pub(crate) fn record(
        &mut self,
        block: u64,
        step: u64,
        kind: OperationKind,
        outcome: &OperationOutcome,
    ) {
        self.operations += 1;
        let entry = self.summary.entry(kind.name().to_string()).or_default();
        match outcome {
            OperationOutcome::NoOp => entry.noop += 1,
            OperationOutcome::Success(request) => {
                entry.ok += 1;
                // BCS of a request only fails on non-serialisable data, which it never holds.
                if let Ok(bytes) = bcs::to_bytes(request) {
                    self.digest.update(&bytes);
                }
            }
            OperationOutcome::Failure(error) => {
                entry.failed += 1;
                let reason = truncate_reason(&error.to_string());
                let count = self.failure_counts.entry(reason.clone()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    self.interesting_cases.push(InterestingCase {
                        block,
                        step,
                        operation: kind,
                        category: error.category().to_string(),
                        reason,
                    });
                }
            }
        }
    }

    pub(crate) fn finish(self, meta: RunMeta) -> SimulationReport {
        let mut failures: Vec<FailureGroup> = self
            .failure_counts
            .into_iter()
            .map(|(reason, count)| FailureGroup { reason, count })
            .collect();
        failures.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.reason.cmp(&b.reason)));

        SimulationReport {
            run_id: meta.run_id,
            seed: meta.seed,
            chain_id: meta.chain_id,
            started_at: meta.started_at,
            elapsed_ms: meta.elapsed_ms,
            total_blocks: meta.total_blocks,
            completed_blocks: meta.completed_blocks,
            operations: self.operations,
            halted: meta.halted,
            summary: self.summary,
            failures,
            interesting_cases: self.interesting_cases,
            final_nft_supply: meta.final_nft_supply,
            request_digest: hex::encode(self.digest.finalize()),
        }
    }
}

pub(crate) struct RunMeta {
    pub run_id: String,
    pub seed: u64,
    pub chain_id: String,
    pub started_at: String,
    pub elapsed_ms: u64,
    pub total_blocks: u64,
    pub completed_blocks: u64,
    pub halted: bool,
    pub final_nft_supply: usize,
}

/// Truncate a failure reason for grouping (first 200 chars).
fn truncate_reason(reason: &str) -> String {
    if reason.chars().count() > 200 {
        let head: String = reason.chars().take(200).collect();
        format!("{}...", head)
    } else {
        reason.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::OperationError;

    fn meta() -> RunMeta {
        RunMeta {
            run_id: "r".into(),
            seed: 1,
            chain_id: "c".into(),
            started_at: "t".into(),
            elapsed_ms: 0,
            total_blocks: 1,
            completed_blocks: 1,
            halted: false,
            final_nft_supply: 0,
        }
    }

    #[test]
    fn test_failures_grouped_and_sorted() {
        let mut builder = ReportBuilder::new();
        let rejected = |log: &str| {
            OperationOutcome::Failure(OperationError::Rejected {
                code: 8,
                log: log.to_string(),
            })
        };
        builder.record(0, 0, OperationKind::BurnNft, &rejected("a"));
        builder.record(0, 1, OperationKind::BurnNft, &rejected("b"));
        builder.record(0, 2, OperationKind::TransferNft, &rejected("b"));
        builder.record(0, 3, OperationKind::MintNft, &OperationOutcome::NoOp);

        let report = builder.finish(meta());
        assert_eq!(report.operations, 4);
        assert_eq!(report.failures[0], FailureGroup { reason: "b".into(), count: 2 });
        assert_eq!(report.interesting_cases.len(), 2);
        assert_eq!(report.summary["burn_nft"].failed, 2);
        assert_eq!(report.summary["mint_nft"].noop, 1);
        assert_eq!(report.total_failed(), 3);
        assert_eq!(report.total_noop(), 1);
    }

    #[test]
    fn test_empty_report_has_all_kinds() {
        let report = ReportBuilder::new().finish(meta());
        assert_eq!(report.summary.len(), 4);
        assert_eq!(report.total_ok(), 0);
        assert_eq!(report.request_digest.len(), 64);
    }

    #[test]
    fn test_truncate_reason() {
        assert_eq!(truncate_reason("short"), "short");
        let long = "x".repeat(300);
        let truncated = truncate_reason(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 203);
    }
}
