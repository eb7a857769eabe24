use rand::Rng;
use serde::Serialize;

/// The ten hatchable creatures.
pub const CREATURES: [&str; 10] = [
    "Cat", "Dog", "Bird", "Fish", "Lizard", "Horse", "Rabbit", "Elephant", "Tiger", "Lion",
];

/// Ledger record for one hatched egg.
///
/// One uniform roll 0..=99 decides everything: the units digit selects the
/// creature, the tens digit its tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HatchRecord {
    pub roll: u8,
    pub creature: String,
    pub tier: u8,
}

/// Egg-hatching session holding the collection so far.
pub struct Hatchery {
    collection: Vec<HatchRecord>,
}

impl Hatchery {
    pub fn new() -> Self {
        Self {
            collection: Vec::new(),
        }
    }

    /// Break an egg and add the hatched creature to the collection.
    pub fn break_egg<R: Rng + ?Sized>(&mut self, rng: &mut R) -> HatchRecord {
        let roll = rng.gen_range(0..100u8);
        let record = HatchRecord {
            roll,
            creature: CREATURES[usize::from(roll % 10)].to_owned(),
            tier: roll / 10,
        };
        self.collection.push(record.clone());
        record
    }

    pub fn collection(&self) -> &[HatchRecord] {
        &self.collection
    }
}

impl Default for Hatchery {
    fn default() -> Self {
        Self::new()
    }
}
