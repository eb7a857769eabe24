use gel_types::Digest;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"gel-entry-v1"`,
/// `"gel-puzzle-v1"`) that is prepended to every hash computation. This
/// prevents cross-type collisions: an entry and a puzzle guess with
/// identical bytes will produce different digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaggedHasher {
    domain: &'static str,
}

impl TaggedHasher {
    /// Hasher for ledger entries.
    pub const ENTRY: Self = Self {
        domain: "gel-entry-v1",
    };
    /// Hasher for puzzle guesses.
    pub const PUZZLE: Self = Self {
        domain: "gel-puzzle-v1",
    };
    /// Hasher for commit-reveal beacon commitments.
    pub const BEACON: Self = Self {
        domain: "gel-beacon-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Digest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value as canonical JSON with domain separation.
    ///
    /// serde_json's default map representation keeps object keys sorted, so
    /// the same logical value always produces the same digest.
    pub fn hash_json<T: serde::Serialize>(&self, value: &T) -> Result<Digest, HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &Digest) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
