use gel_types::Digest;

use crate::hasher::{HasherError, TaggedHasher};

/// Trait for records that participate in a hash chain.
pub trait ChainLink {
    /// The record's own digest.
    fn chain_digest(&self) -> Digest;
    /// The digest this record links back to ([`Digest::null`] for genesis).
    fn predecessor_digest(&self) -> Digest;
    /// Canonical bytes the record's digest is computed over.
    fn digest_material(&self) -> Result<Vec<u8>, HasherError>;
}

/// Hash chain integrity verifier.
///
/// Verifies that a sequence of records forms a valid hash chain: the first
/// record is anchored to the null sentinel, each later record links to its
/// predecessor's digest, and every digest is correctly recomputed from the
/// record's own material.
pub struct ChainVerifier {
    hasher: TaggedHasher,
}

impl ChainVerifier {
    pub fn new(hasher: TaggedHasher) -> Self {
        Self { hasher }
    }

    /// Verify a chain of records.
    ///
    /// Checks:
    /// 1. The first record's predecessor is the null sentinel
    /// 2. Each subsequent record's predecessor matches the previous digest
    /// 3. Each record's digest is correct for its material
    pub fn verify_chain(&self, links: &[impl ChainLink]) -> Result<(), ChainError> {
        if links.is_empty() {
            return Ok(());
        }

        if !links[0].predecessor_digest().is_null() {
            return Err(ChainError::GenesisNotAnchored);
        }

        for (index, link) in links.iter().enumerate() {
            let material = link
                .digest_material()
                .map_err(|e| ChainError::BadMaterial {
                    index,
                    reason: e.to_string(),
                })?;
            let computed = self.hasher.hash(&material);
            if computed != link.chain_digest() {
                return Err(ChainError::DigestMismatch { index });
            }

            if index > 0 {
                let expected = links[index - 1].chain_digest();
                if link.predecessor_digest() != expected {
                    return Err(ChainError::BrokenLink { index });
                }
            }
        }

        Ok(())
    }
}

impl Default for ChainVerifier {
    fn default() -> Self {
        Self::new(TaggedHasher::ENTRY)
    }
}

/// Errors from chain verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("genesis record is not anchored to the null sentinel")]
    GenesisNotAnchored,

    #[error("broken link at index {index}: predecessor digest does not match")]
    BrokenLink { index: usize },

    #[error("digest mismatch at index {index}: computed digest differs from stored")]
    DigestMismatch { index: usize },

    #[error("unusable digest material at index {index}: {reason}")]
    BadMaterial { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestLink {
        digest: Digest,
        predecessor: Digest,
        material: Vec<u8>,
    }

    impl ChainLink for TestLink {
        fn chain_digest(&self) -> Digest {
            self.digest
        }
        fn predecessor_digest(&self) -> Digest {
            self.predecessor
        }
        fn digest_material(&self) -> Result<Vec<u8>, HasherError> {
            Ok(self.material.clone())
        }
    }

    fn build_chain(count: usize) -> Vec<TestLink> {
        let hasher = TaggedHasher::ENTRY;
        let mut chain = Vec::new();
        let mut predecessor = Digest::null();

        for i in 0..count {
            let material = format!("record-{i}-{predecessor}").into_bytes();
            let digest = hasher.hash(&material);
            chain.push(TestLink {
                digest,
                predecessor,
                material,
            });
            predecessor = digest;
        }

        chain
    }

    #[test]
    fn empty_chain_is_valid() {
        let chain: Vec<TestLink> = vec![];
        assert!(ChainVerifier::default().verify_chain(&chain).is_ok());
    }

    #[test]
    fn single_record_chain() {
        let chain = build_chain(1);
        assert!(ChainVerifier::default().verify_chain(&chain).is_ok());
    }

    #[test]
    fn multi_record_chain() {
        let chain = build_chain(10);
        assert!(ChainVerifier::default().verify_chain(&chain).is_ok());
    }

    #[test]
    fn unanchored_genesis_fails() {
        let mut chain = build_chain(1);
        chain[0].predecessor = Digest::from_hash([1; 32]);
        let err = ChainVerifier::default().verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::GenesisNotAnchored);
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(3);
        chain[2].predecessor = Digest::from_hash([99; 32]);
        let err = ChainVerifier::default().verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
    }

    #[test]
    fn tampered_material_detected() {
        let mut chain = build_chain(3);
        chain[1].material = b"tampered".to_vec();
        let err = ChainVerifier::default().verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::DigestMismatch { index: 1 });
    }

    #[test]
    fn wrong_hasher_domain_detected() {
        let chain = build_chain(2);
        let verifier = ChainVerifier::new(TaggedHasher::new("other-domain-v1"));
        let err = verifier.verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::DigestMismatch { index: 0 });
    }
}
