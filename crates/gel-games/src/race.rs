use rand::Rng;
use serde::Serialize;

use crate::beacon::{RandomnessBeacon, RevealRecord};

const RUNNERS: usize = 3;
const STEPS_TO_WIN: u32 = 100;
const MAX_STEP: u32 = 30;

/// Ledger record for one race tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TickRecord {
    /// Steps each runner advanced this tick.
    pub steps: [u32; RUNNERS],
    /// Cumulative positions after the tick.
    pub positions: [u32; RUNNERS],
    /// The beacon commitment published at race start.
    pub commitment: String,
}

/// State of the race after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceStatus {
    Running,
    /// Zero-based index of the first runner to reach the finish line.
    Won(usize),
}

/// A three-runner race advanced tick by tick.
///
/// Each tick rolls a step of 1..=30 per runner; the first runner to reach
/// 100 cumulative steps wins. A commit–reveal beacon is fixed at race start
/// and rides along in every tick record; [`Race::finish`] reveals it.
pub struct Race {
    positions: [u32; RUNNERS],
    beacon: RandomnessBeacon,
    winner: Option<usize>,
}

impl Race {
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            positions: [0; RUNNERS],
            beacon: RandomnessBeacon::new(rng),
            winner: None,
        }
    }

    pub fn status(&self) -> RaceStatus {
        match self.winner {
            Some(index) => RaceStatus::Won(index),
            None => RaceStatus::Running,
        }
    }

    pub fn positions(&self) -> [u32; RUNNERS] {
        self.positions
    }

    /// Advance every runner one tick. Ticking a finished race is a no-op
    /// returning the final standings.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickRecord {
        if self.winner.is_some() {
            return TickRecord {
                steps: [0; RUNNERS],
                positions: self.positions,
                commitment: self.beacon.commitment_hex(),
            };
        }

        let mut steps = [0u32; RUNNERS];
        for (runner, step) in steps.iter_mut().enumerate() {
            *step = rng.gen_range(1..=MAX_STEP);
            self.positions[runner] += *step;
        }

        // First runner past the line wins; lower index breaks same-tick ties.
        self.winner = self
            .positions
            .iter()
            .position(|position| *position >= STEPS_TO_WIN);

        TickRecord {
            steps,
            positions: self.positions,
            commitment: self.beacon.commitment_hex(),
        }
    }

    /// End the race and reveal the beacon secret.
    pub fn finish(self) -> RevealRecord {
        self.beacon.reveal()
    }
}
