use std::sync::atomic::AtomicBool;
use std::sync::RwLock;

use gel_crypto::{ChainVerifier, PuzzleRule, TaggedHasher};
use gel_types::{Clock, Payload, WallClock};

use crate::entry::Entry;
use crate::error::LedgerError;
use crate::traits::{ChainReader, ChainWriter};

/// In-memory, append-only event ledger.
///
/// Owns the ordered entry sequence exclusively. Admission is
/// read-modify-append under the write lock, so concurrent `admit` calls
/// serialize and the chain cannot fork; reads take the read lock and run
/// concurrently with each other.
pub struct Ledger {
    hasher: TaggedHasher,
    rule: PuzzleRule,
    clock: Box<dyn Clock>,
    pub(crate) inner: RwLock<Vec<Entry>>,
}

impl Ledger {
    /// Ledger with the standard hash domain, default difficulty, and the
    /// monotonic wall clock.
    pub fn new() -> Self {
        Self::with_parts(
            TaggedHasher::ENTRY,
            PuzzleRule::default(),
            Box::new(WallClock::new()),
        )
    }

    /// Ledger with injected parts, for embedders and deterministic tests.
    pub fn with_parts(hasher: TaggedHasher, rule: PuzzleRule, clock: Box<dyn Clock>) -> Self {
        let genesis = Entry::genesis(&hasher, clock.now());
        Self {
            hasher,
            rule,
            clock,
            inner: RwLock::new(vec![genesis]),
        }
    }

    /// The puzzle rule this ledger admits against.
    pub fn rule(&self) -> PuzzleRule {
        self.rule
    }

    /// The hash domain this ledger computes digests with.
    pub fn hasher(&self) -> TaggedHasher {
        self.hasher
    }

    /// Admit a payload, blocking for the duration of the puzzle search.
    pub fn admit(&self, payload: Payload) -> Result<Entry, LedgerError> {
        self.admit_inner(payload, None)
    }

    /// Admit with best-effort cancellation of the puzzle search.
    pub fn admit_cancellable(
        &self,
        payload: Payload,
        cancel: &AtomicBool,
    ) -> Result<Entry, LedgerError> {
        self.admit_inner(payload, Some(cancel))
    }

    fn admit_inner(
        &self,
        payload: Payload,
        cancel: Option<&AtomicBool>,
    ) -> Result<Entry, LedgerError> {
        let mut entries = self.inner.write().map_err(|_| LedgerError::LedgerCorrupted {
            seq: 0,
            reason: "ledger write lock poisoned".into(),
        })?;

        // Cannot occur given the genesis invariant; fail fast if it does.
        let (predecessor_digest, predecessor_solution) = match entries.last() {
            Some(last) => (last.digest, last.puzzle_solution),
            None => {
                return Err(LedgerError::LedgerCorrupted {
                    seq: 0,
                    reason: "chain is empty; genesis entry missing".into(),
                })
            }
        };

        let search = match cancel {
            Some(flag) => self.rule.solve_cancellable(predecessor_solution, flag)?,
            None => self.rule.solve(predecessor_solution),
        };

        // Timestamp captured at the moment of successful search.
        let created_at = self.clock.now();
        let sequence = entries.len() as u64;

        let entry = Entry::assemble(
            &self.hasher,
            sequence,
            predecessor_digest,
            created_at,
            payload,
            search.solution,
        )
        .map_err(|e| LedgerError::InvalidPayload {
            reason: e.to_string(),
        })?;

        tracing::debug!(
            sequence,
            solution = search.solution.value(),
            trials = search.trials,
            digest = %entry.digest.short_hex(),
            "entry admitted"
        );

        entries.push(entry.clone());
        Ok(entry)
    }

    /// Walk the chain from genesis and recheck every invariant.
    ///
    /// Recomputes each digest from the entry's own fields and checks
    /// predecessor linkage, sequence contiguity, genesis shape, and puzzle
    /// validity of every non-genesis entry. The first failure is returned
    /// as [`LedgerError::LedgerCorrupted`].
    pub fn verify(&self) -> Result<(), LedgerError> {
        let entries = self.snapshot()?;
        verify_entries(&self.hasher, &self.rule, &entries)
    }

    fn snapshot(&self) -> Result<Vec<Entry>, LedgerError> {
        let entries = self.inner.read().map_err(|_| LedgerError::LedgerCorrupted {
            seq: 0,
            reason: "ledger read lock poisoned".into(),
        })?;
        Ok(entries.clone())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainReader for Ledger {
    fn last_entry(&self) -> Result<Entry, LedgerError> {
        let entries = self.inner.read().map_err(|_| LedgerError::LedgerCorrupted {
            seq: 0,
            reason: "ledger read lock poisoned".into(),
        })?;
        entries
            .last()
            .cloned()
            .ok_or_else(|| LedgerError::LedgerCorrupted {
                seq: 0,
                reason: "chain is empty; genesis entry missing".into(),
            })
    }

    fn entries(&self) -> Result<Vec<Entry>, LedgerError> {
        self.snapshot()
    }

    fn entry_count(&self) -> Result<u64, LedgerError> {
        let entries = self.inner.read().map_err(|_| LedgerError::LedgerCorrupted {
            seq: 0,
            reason: "ledger read lock poisoned".into(),
        })?;
        Ok(entries.len() as u64)
    }
}

impl ChainWriter for Ledger {
    fn admit(&self, payload: Payload) -> Result<Entry, LedgerError> {
        Ledger::admit(self, payload)
    }
}

/// Shared fail-fast verification walk over an entry snapshot.
pub(crate) fn verify_entries(
    hasher: &TaggedHasher,
    rule: &PuzzleRule,
    entries: &[Entry],
) -> Result<(), LedgerError> {
    if entries.is_empty() {
        return Err(LedgerError::LedgerCorrupted {
            seq: 0,
            reason: "chain is empty; genesis entry missing".into(),
        });
    }

    // Digest and linkage checks, including the genesis sentinel.
    ChainVerifier::new(*hasher)
        .verify_chain(entries)
        .map_err(|e| {
            let seq = match &e {
                gel_crypto::ChainError::GenesisNotAnchored => 0,
                gel_crypto::ChainError::BrokenLink { index }
                | gel_crypto::ChainError::DigestMismatch { index }
                | gel_crypto::ChainError::BadMaterial { index, .. } => *index as u64,
            };
            LedgerError::LedgerCorrupted {
                seq,
                reason: e.to_string(),
            }
        })?;

    for (index, entry) in entries.iter().enumerate() {
        let expected = index as u64;
        if entry.sequence != expected {
            return Err(LedgerError::LedgerCorrupted {
                seq: entry.sequence,
                reason: format!("expected seq {expected}, found {}", entry.sequence),
            });
        }

        if index > 0
            && !rule.is_valid(entries[index - 1].puzzle_solution, entry.puzzle_solution)
        {
            return Err(LedgerError::LedgerCorrupted {
                seq: entry.sequence,
                reason: "puzzle solution does not satisfy the admission rule".into(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gel_types::{Digest, ManualClock, PuzzleSolution, Timestamp, GENESIS_SOLUTION};
    use serde_json::json;

    // Difficulty 1 keeps each admission search to ~16 trials.
    fn fast_ledger() -> Ledger {
        Ledger::with_parts(
            TaggedHasher::ENTRY,
            PuzzleRule::new(1),
            Box::new(ManualClock::new(1_000, 10)),
        )
    }

    fn win_payload() -> Payload {
        Payload::new(json!({"result": "Win", "amount": 10}))
    }

    fn loss_payload() -> Payload {
        Payload::new(json!({"result": "Loss", "amount": -5}))
    }

    #[test]
    fn fresh_ledger_holds_only_genesis() {
        let ledger = fast_ledger();
        let last = ledger.last_entry().unwrap();
        assert_eq!(ledger.entry_count().unwrap(), 1);
        assert_eq!(last.sequence, 0);
        assert!(last.predecessor_digest.is_null());
        assert_eq!(last.puzzle_solution, GENESIS_SOLUTION);
    }

    #[test]
    fn admit_links_to_predecessor_and_returns_the_appended_entry() {
        let ledger = fast_ledger();
        let genesis = ledger.last_entry().unwrap();

        let entry = ledger.admit(win_payload()).unwrap();
        assert_eq!(entry.sequence, 1);
        assert_eq!(entry.predecessor_digest, genesis.digest);
        assert_eq!(entry, ledger.last_entry().unwrap());
        assert!(ledger
            .rule()
            .is_valid(genesis.puzzle_solution, entry.puzzle_solution));
    }

    #[test]
    fn two_admissions_scenario() {
        let ledger = fast_ledger();
        ledger.admit(win_payload()).unwrap();
        ledger.admit(loss_payload()).unwrap();

        let chain = ledger.entries().unwrap();
        assert_eq!(chain.len(), 3);
        ledger.verify().unwrap();
        assert_eq!(chain[1].payload, win_payload());
        assert_eq!(chain[2].predecessor_digest, chain[1].digest);
    }

    #[test]
    fn admit_n_times_grows_chain_by_n_and_keeps_prior_entries_intact() {
        let ledger = fast_ledger();
        let mut appended = Vec::new();
        for i in 0..5 {
            appended.push(ledger.admit(Payload::new(json!({"round": i}))).unwrap());
        }

        let chain = ledger.entries().unwrap();
        assert_eq!(chain.len(), 6);
        assert_eq!(&chain[1..], appended.as_slice());
    }

    #[test]
    fn sequences_are_contiguous_and_timestamps_increase() {
        let ledger = fast_ledger();
        for _ in 0..4 {
            ledger.admit(win_payload()).unwrap();
        }

        let chain = ledger.entries().unwrap();
        for (i, entry) in chain.iter().enumerate() {
            assert_eq!(entry.sequence, i as u64);
        }
        for pair in chain.windows(2) {
            assert!(pair[0].created_at < pair[1].created_at);
        }
    }

    #[test]
    fn every_admitted_solution_satisfies_the_prefix_rule() {
        let ledger = fast_ledger();
        for _ in 0..50 {
            ledger.admit(win_payload()).unwrap();
        }

        let chain = ledger.entries().unwrap();
        let rule = ledger.rule();
        for pair in chain.windows(2) {
            assert!(rule.is_valid(pair[0].puzzle_solution, pair[1].puzzle_solution));
        }
        ledger.verify().unwrap();
    }

    #[test]
    fn verify_detects_tampered_payload() {
        let ledger = fast_ledger();
        ledger.admit(win_payload()).unwrap();
        ledger.admit(loss_payload()).unwrap();

        {
            let mut entries = ledger.inner.write().unwrap();
            entries[1].payload = Payload::new(json!({"result": "Win", "amount": 1_000_000}));
        }

        let err = ledger.verify().unwrap_err();
        assert!(matches!(err, LedgerError::LedgerCorrupted { seq: 1, .. }));
    }

    #[test]
    fn verify_detects_forged_digest() {
        let ledger = fast_ledger();
        ledger.admit(win_payload()).unwrap();

        {
            let mut entries = ledger.inner.write().unwrap();
            entries[1].digest = Digest::from_hash([0xde; 32]);
        }

        let err = ledger.verify().unwrap_err();
        assert!(matches!(err, LedgerError::LedgerCorrupted { seq: 1, .. }));
    }

    #[test]
    fn verify_detects_sequence_gap() {
        let ledger = fast_ledger();
        ledger.admit(win_payload()).unwrap();

        {
            let mut entries = ledger.inner.write().unwrap();
            let mut forged = entries[1].clone();
            forged.sequence = 5;
            // Recompute the digest so only the sequence invariant is broken.
            forged = Entry::assemble(
                &TaggedHasher::ENTRY,
                forged.sequence,
                forged.predecessor_digest,
                forged.created_at,
                forged.payload,
                forged.puzzle_solution,
            )
            .unwrap();
            entries[1] = forged;
        }

        let err = ledger.verify().unwrap_err();
        assert!(matches!(err, LedgerError::LedgerCorrupted { seq: 5, .. }));
    }

    #[test]
    fn verify_detects_invalid_puzzle_solution() {
        let ledger = fast_ledger();
        ledger.admit(win_payload()).unwrap();

        {
            let mut entries = ledger.inner.write().unwrap();
            let genesis_digest = entries[0].digest;
            let bogus = Entry::assemble(
                &TaggedHasher::ENTRY,
                1,
                genesis_digest,
                Timestamp::new(2_000, 0),
                win_payload(),
                // Valid digest, but almost certainly not a valid puzzle
                // solution for difficulty 1.
                PuzzleSolution(u64::MAX),
            )
            .unwrap();
            entries[1] = bogus;
        }

        let result = ledger.verify();
        let rule = ledger.rule();
        if rule.is_valid(GENESIS_SOLUTION, PuzzleSolution(u64::MAX)) {
            // 1-in-16 chance at difficulty 1; then the chain is genuinely valid.
            result.unwrap();
        } else {
            assert!(matches!(
                result.unwrap_err(),
                LedgerError::LedgerCorrupted { seq: 1, .. }
            ));
        }
    }

    #[test]
    fn cancelled_admission_leaves_the_chain_unchanged() {
        let ledger = Ledger::with_parts(
            TaggedHasher::ENTRY,
            PuzzleRule::new(16),
            Box::new(ManualClock::new(1_000, 10)),
        );
        let cancel = AtomicBool::new(true);

        let err = ledger
            .admit_cancellable(win_payload(), &cancel)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Puzzle(_)));
        assert_eq!(ledger.entry_count().unwrap(), 1);
        ledger.verify().unwrap();
    }

    #[test]
    fn concurrent_readers_never_observe_partial_appends() {
        // A reader thread must always observe either the pre- or post-append
        // chain, never a torn state.
        let ledger = std::sync::Arc::new(fast_ledger());
        let reader = {
            let ledger = std::sync::Arc::clone(&ledger);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let chain = ledger.entries().unwrap();
                    super::verify_entries(&ledger.hasher(), &ledger.rule(), &chain).unwrap();
                }
            })
        };
        for i in 0..20 {
            ledger.admit(Payload::new(json!({"round": i}))).unwrap();
        }
        reader.join().unwrap();
    }

    #[test]
    fn deterministic_parts_give_deterministic_chains() {
        let build = || {
            let ledger = Ledger::with_parts(
                TaggedHasher::ENTRY,
                PuzzleRule::new(1),
                Box::new(ManualClock::new(500, 7)),
            );
            ledger.admit(win_payload()).unwrap();
            ledger.admit(loss_payload()).unwrap();
            ledger.entries().unwrap()
        };

        assert_eq!(build(), build());
    }
}
