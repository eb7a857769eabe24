use rand::Rng;
use serde::Serialize;

const CHAMBER_COUNT: usize = 6;

/// One trigger pull on a six-chamber gun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ShotRecord {
    /// Chamber index that came up under the hammer.
    pub chamber: usize,
    /// Whether that chamber held the bullet.
    pub hit: bool,
}

/// Ledger record for one duel round: both guns fired once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DuelRecord {
    pub gun_one: ShotRecord,
    pub gun_two: ShotRecord,
    pub survived: bool,
}

struct Gun {
    chambers: [bool; CHAMBER_COUNT],
}

impl Gun {
    /// A gun with a single bullet in a random chamber.
    fn load<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut chambers = [false; CHAMBER_COUNT];
        chambers[rng.gen_range(0..CHAMBER_COUNT)] = true;
        Self { chambers }
    }

    fn fire<R: Rng + ?Sized>(&self, rng: &mut R) -> ShotRecord {
        let chamber = rng.gen_range(0..CHAMBER_COUNT);
        ShotRecord {
            chamber,
            hit: self.chambers[chamber],
        }
    }
}

/// Play one duel round: load both guns, pull both triggers.
pub fn play_duel<R: Rng + ?Sized>(rng: &mut R) -> DuelRecord {
    let gun_one = Gun::load(rng).fire(rng);
    let gun_two = Gun::load(rng).fire(rng);
    DuelRecord {
        gun_one,
        gun_two,
        survived: !gun_one.hit && !gun_two.hit,
    }
}
