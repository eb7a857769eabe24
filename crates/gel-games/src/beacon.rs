use rand::Rng;
use serde::Serialize;

use gel_crypto::TaggedHasher;
use gel_types::Digest;

/// Commit–reveal randomness beacon.
///
/// At race start the beacon draws a 256-bit secret and publishes only its
/// hash commitment; every tick record carries the commitment, and the secret
/// is revealed once the race ends so anyone can check the commitment was not
/// swapped mid-race.
pub struct RandomnessBeacon {
    secret: [u8; 32],
    commitment: Digest,
}

/// Ledger record of a beacon reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RevealRecord {
    pub commitment: String,
    pub revealed: String,
    pub matches: bool,
}

impl RandomnessBeacon {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut secret = [0u8; 32];
        rng.fill(&mut secret[..]);
        Self {
            commitment: TaggedHasher::BEACON.hash(&secret),
            secret,
        }
    }

    /// The published commitment, hex-encoded for payload embedding.
    pub fn commitment_hex(&self) -> String {
        self.commitment.to_hex()
    }

    /// Reveal the secret and check it against the commitment.
    pub fn reveal(self) -> RevealRecord {
        let recomputed = TaggedHasher::BEACON.hash(&self.secret);
        RevealRecord {
            commitment: self.commitment.to_hex(),
            revealed: hex::encode(self.secret),
            matches: recomputed == self.commitment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reveal_matches_its_own_commitment() {
        let mut rng = StdRng::seed_from_u64(3);
        let beacon = RandomnessBeacon::new(&mut rng);
        let commitment = beacon.commitment_hex();

        let reveal = beacon.reveal();
        assert!(reveal.matches);
        assert_eq!(reveal.commitment, commitment);
        assert_eq!(reveal.revealed.len(), 64);
    }

    #[test]
    fn distinct_secrets_give_distinct_commitments() {
        let mut rng = StdRng::seed_from_u64(4);
        let a = RandomnessBeacon::new(&mut rng);
        let b = RandomnessBeacon::new(&mut rng);
        assert_ne!(a.commitment_hex(), b.commitment_hex());
    }
}
