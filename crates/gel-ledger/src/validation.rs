use gel_crypto::{ChainLink, PuzzleRule, TaggedHasher};
use gel_types::Digest;

use crate::error::LedgerError;
use crate::traits::ChainReader;

/// Result of a full chain audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub entry_count: u64,
    pub genesis_anchored: bool,
    pub digests_valid: bool,
    pub chain_linked: bool,
    pub sequence_contiguous: bool,
    pub puzzles_valid: bool,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub seq: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    MalformedGenesis,
    DigestMismatch,
    LinkBreak,
    SequenceGap,
    InvalidPuzzle,
}

/// Chain integrity auditor.
///
/// The report-producing counterpart of [`Ledger::verify`](crate::Ledger):
/// instead of stopping at the first violation it walks the whole chain and
/// collects every one, which is what a display collaborator wants when
/// showing a damaged chain to a person.
pub struct ChainAuditor {
    hasher: TaggedHasher,
    rule: PuzzleRule,
}

impl ChainAuditor {
    /// Auditor matching a ledger built with the same hasher and rule.
    pub fn new(hasher: TaggedHasher, rule: PuzzleRule) -> Self {
        Self { hasher, rule }
    }

    /// Audit the full chain exposed by a reader.
    pub fn audit<R: ChainReader>(&self, reader: &R) -> Result<AuditReport, LedgerError> {
        Ok(self.audit_entries(&reader.entries()?))
    }

    /// Audit an already-taken chain snapshot.
    pub fn audit_entries(&self, entries: &[crate::Entry]) -> AuditReport {
        let mut violations = Vec::new();
        let mut genesis_anchored = true;
        let mut digests_valid = true;
        let mut chain_linked = true;
        let mut sequence_contiguous = true;
        let mut puzzles_valid = true;

        if entries.is_empty() {
            return AuditReport {
                entry_count: 0,
                genesis_anchored: false,
                digests_valid,
                chain_linked,
                sequence_contiguous,
                puzzles_valid,
                violations: vec![Violation {
                    seq: 0,
                    kind: ViolationKind::MalformedGenesis,
                    description: "chain is empty; genesis entry missing".into(),
                }],
            };
        }

        if !entries[0].predecessor_digest.is_null() {
            genesis_anchored = false;
            violations.push(Violation {
                seq: entries[0].sequence,
                kind: ViolationKind::MalformedGenesis,
                description: "genesis is not anchored to the null sentinel".into(),
            });
        }

        let mut previous_digest: Option<Digest> = None;
        for (index, entry) in entries.iter().enumerate() {
            let expected_seq = index as u64;
            if entry.sequence != expected_seq {
                sequence_contiguous = false;
                violations.push(Violation {
                    seq: entry.sequence,
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected seq {expected_seq}, got {}", entry.sequence),
                });
            }

            match entry.digest_material() {
                Ok(material) => {
                    let computed = self.hasher.hash(&material);
                    if computed != entry.digest {
                        digests_valid = false;
                        violations.push(Violation {
                            seq: entry.sequence,
                            kind: ViolationKind::DigestMismatch,
                            description: "stored digest does not match recomputed digest".into(),
                        });
                    }
                }
                Err(e) => {
                    digests_valid = false;
                    violations.push(Violation {
                        seq: entry.sequence,
                        kind: ViolationKind::DigestMismatch,
                        description: format!("digest material unavailable: {e}"),
                    });
                }
            }

            if let Some(expected_prev) = previous_digest {
                if entry.predecessor_digest != expected_prev {
                    chain_linked = false;
                    violations.push(Violation {
                        seq: entry.sequence,
                        kind: ViolationKind::LinkBreak,
                        description: "predecessor digest does not match prior entry".into(),
                    });
                }

                if !self
                    .rule
                    .is_valid(entries[index - 1].puzzle_solution, entry.puzzle_solution)
                {
                    puzzles_valid = false;
                    violations.push(Violation {
                        seq: entry.sequence,
                        kind: ViolationKind::InvalidPuzzle,
                        description: "puzzle solution does not satisfy the admission rule".into(),
                    });
                }
            }

            previous_digest = Some(entry.digest);
        }

        AuditReport {
            entry_count: entries.len() as u64,
            genesis_anchored,
            digests_valid,
            chain_linked,
            sequence_contiguous,
            puzzles_valid,
            violations,
        }
    }
}

impl Default for ChainAuditor {
    fn default() -> Self {
        Self::new(TaggedHasher::ENTRY, PuzzleRule::default())
    }
}
