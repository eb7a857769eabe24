use serde::{Deserialize, Serialize};

use gel_crypto::{ChainLink, HasherError, TaggedHasher};
use gel_types::{Digest, Payload, PuzzleSolution, Timestamp, GENESIS_SOLUTION};

/// One immutable record in the ledger.
///
/// The digest binds all other fields; it is always recomputed from them and
/// never set independently. Only the [`Ledger`](crate::Ledger) constructs
/// entries, and appended entries are never mutated — readers get clones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Position in the chain, contiguous from 0 (genesis).
    pub sequence: u64,
    /// Digest of the previous entry, or [`Digest::null`] for genesis.
    pub predecessor_digest: Digest,
    /// Admission timestamp. Display only; carries no integrity meaning.
    pub created_at: Timestamp,
    /// Opaque caller-defined event record.
    pub payload: Payload,
    /// Solution found by the admission search.
    pub puzzle_solution: PuzzleSolution,
    /// Content digest over all of the above.
    pub digest: Digest,
}

/// Canonical digest material.
///
/// Serialized as JSON with fields in exactly this order — `sequence`,
/// `predecessor_digest` (hex), `created_at`, `payload`, `puzzle_solution` —
/// and payload object keys sorted. This layout is the reproducibility
/// contract for independent re-verification; changing it breaks every
/// existing chain.
#[derive(Serialize)]
struct DigestMaterial<'a> {
    sequence: u64,
    predecessor_digest: String,
    created_at: Timestamp,
    payload: &'a Payload,
    puzzle_solution: PuzzleSolution,
}

fn material_bytes(
    sequence: u64,
    predecessor_digest: Digest,
    created_at: Timestamp,
    payload: &Payload,
    puzzle_solution: PuzzleSolution,
) -> Result<Vec<u8>, HasherError> {
    let material = DigestMaterial {
        sequence,
        predecessor_digest: predecessor_digest.to_hex(),
        created_at,
        payload,
        puzzle_solution,
    };
    serde_json::to_vec(&material).map_err(|e| HasherError::Serialization(e.to_string()))
}

/// Compute the digest binding an entry's fields.
///
/// Pure and deterministic: the same inputs always yield the same digest.
/// Total over any well-formed payload; a payload that cannot be serialized
/// is a caller-side contract violation rejected before admission.
pub fn compute_digest(
    hasher: &TaggedHasher,
    sequence: u64,
    predecessor_digest: Digest,
    created_at: Timestamp,
    payload: &Payload,
    puzzle_solution: PuzzleSolution,
) -> Result<Digest, HasherError> {
    let bytes = material_bytes(
        sequence,
        predecessor_digest,
        created_at,
        payload,
        puzzle_solution,
    )?;
    Ok(hasher.hash(&bytes))
}

impl Entry {
    /// Assemble an entry, computing its digest from the given fields.
    pub(crate) fn assemble(
        hasher: &TaggedHasher,
        sequence: u64,
        predecessor_digest: Digest,
        created_at: Timestamp,
        payload: Payload,
        puzzle_solution: PuzzleSolution,
    ) -> Result<Self, HasherError> {
        let digest = compute_digest(
            hasher,
            sequence,
            predecessor_digest,
            created_at,
            &payload,
            puzzle_solution,
        )?;
        Ok(Self {
            sequence,
            predecessor_digest,
            created_at,
            payload,
            puzzle_solution,
            digest,
        })
    }

    /// The fixed first entry seeding a chain.
    ///
    /// Genesis links to the null sentinel and carries the marker payload and
    /// the conventional solution constant; its puzzle is not searched.
    pub(crate) fn genesis(hasher: &TaggedHasher, created_at: Timestamp) -> Self {
        Self::assemble(
            hasher,
            0,
            Digest::null(),
            created_at,
            Payload::genesis_marker(),
            GENESIS_SOLUTION,
        )
        .expect("genesis digest material is a fixed, serializable constant")
    }

    /// Returns `true` for the genesis entry.
    pub fn is_genesis(&self) -> bool {
        self.sequence == 0
    }
}

impl ChainLink for Entry {
    fn chain_digest(&self) -> Digest {
        self.digest
    }

    fn predecessor_digest(&self) -> Digest {
        self.predecessor_digest
    }

    fn digest_material(&self) -> Result<Vec<u8>, HasherError> {
        material_bytes(
            self.sequence,
            self.predecessor_digest,
            self.created_at,
            &self.payload,
            self.puzzle_solution,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Payload {
        Payload::new(json!({"result": "Win", "amount": 10}))
    }

    #[test]
    fn digest_is_deterministic() {
        let hasher = TaggedHasher::ENTRY;
        let payload = sample_payload();
        let ts = Timestamp::new(1_000, 0);

        let d1 = compute_digest(&hasher, 1, Digest::null(), ts, &payload, PuzzleSolution(7))
            .unwrap();
        let d2 = compute_digest(&hasher, 1, Digest::null(), ts, &payload, PuzzleSolution(7))
            .unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn digest_is_sensitive_to_every_field() {
        let hasher = TaggedHasher::ENTRY;
        let payload = sample_payload();
        let ts = Timestamp::new(1_000, 0);
        let base = compute_digest(&hasher, 1, Digest::null(), ts, &payload, PuzzleSolution(7))
            .unwrap();

        let seq = compute_digest(&hasher, 2, Digest::null(), ts, &payload, PuzzleSolution(7))
            .unwrap();
        let pred = compute_digest(
            &hasher,
            1,
            Digest::from_hash([1; 32]),
            ts,
            &payload,
            PuzzleSolution(7),
        )
        .unwrap();
        let time = compute_digest(
            &hasher,
            1,
            Digest::null(),
            Timestamp::new(1_001, 0),
            &payload,
            PuzzleSolution(7),
        )
        .unwrap();
        let data = compute_digest(
            &hasher,
            1,
            Digest::null(),
            ts,
            &Payload::new(json!({"result": "Loss", "amount": -5})),
            PuzzleSolution(7),
        )
        .unwrap();
        let solution = compute_digest(&hasher, 1, Digest::null(), ts, &payload, PuzzleSolution(8))
            .unwrap();

        for other in [seq, pred, time, data, solution] {
            assert_ne!(base, other);
        }
    }

    #[test]
    fn assembled_entry_stores_its_own_digest() {
        let hasher = TaggedHasher::ENTRY;
        let entry = Entry::assemble(
            &hasher,
            3,
            Digest::from_hash([9; 32]),
            Timestamp::new(42, 0),
            sample_payload(),
            PuzzleSolution(123),
        )
        .unwrap();

        let recomputed = hasher.hash(&entry.digest_material().unwrap());
        assert_eq!(entry.digest, recomputed);
    }

    #[test]
    fn genesis_shape() {
        let entry = Entry::genesis(&TaggedHasher::ENTRY, Timestamp::zero());
        assert!(entry.is_genesis());
        assert_eq!(entry.sequence, 0);
        assert!(entry.predecessor_digest.is_null());
        assert_eq!(entry.puzzle_solution, GENESIS_SOLUTION);
        assert_eq!(entry.payload, Payload::genesis_marker());
    }

    #[test]
    fn payload_key_order_does_not_change_digest() {
        let hasher = TaggedHasher::ENTRY;
        let ts = Timestamp::new(5, 0);
        let a = Payload::new(json!({"amount": 10, "result": "Win"}));
        let b = Payload::new(json!({"result": "Win", "amount": 10}));

        let da = compute_digest(&hasher, 1, Digest::null(), ts, &a, PuzzleSolution(1)).unwrap();
        let db = compute_digest(&hasher, 1, Digest::null(), ts, &b, PuzzleSolution(1)).unwrap();
        assert_eq!(da, db);
    }
}
