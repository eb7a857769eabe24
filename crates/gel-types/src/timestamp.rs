use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Admission timestamp: wall-clock milliseconds plus a logical tick.
///
/// The tick disambiguates entries admitted within the same millisecond, so
/// timestamps from one clock are strictly increasing. Timestamps are bound
/// into the entry digest but carry no integrity meaning of their own; they
/// exist for history display.
///
/// Ordering: `ms` → `tick` (total order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub ms: u64,
    /// Logical counter for entries at the same physical time.
    pub tick: u32,
}

impl Timestamp {
    /// Create a timestamp with explicit values.
    pub fn new(ms: u64, tick: u32) -> Self {
        Self { ms, tick }
    }

    /// The zero timestamp.
    pub const fn zero() -> Self {
        Self { ms: 0, tick: 0 }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.ms, self.tick)
    }
}

/// Source of admission timestamps.
///
/// The ledger takes its clock by injection so tests can pin timestamps and
/// make digests fully deterministic.
pub trait Clock: Send + Sync {
    /// Produce the next timestamp. Successive calls on one clock must return
    /// strictly increasing values.
    fn now(&self) -> Timestamp;
}

/// Internal mutable state of the wall clock.
struct WallClockState {
    last_ms: u64,
    tick: u32,
}

/// Monotonic wall clock.
///
/// Reads `SystemTime` and bumps a logical tick when two reads land in the
/// same millisecond, or when the wall clock steps backwards. Safe for
/// concurrent use via an internal [`Mutex`].
pub struct WallClock {
    state: Mutex<WallClockState>,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WallClockState { last_ms: 0, tick: 0 }),
        }
    }

    fn wall_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Timestamp {
        let wall = Self::wall_ms();
        let mut state = self.state.lock().expect("wall clock mutex poisoned");

        if wall > state.last_ms {
            state.last_ms = wall;
            state.tick = 0;
        } else {
            state.tick += 1;
        }

        Timestamp::new(state.last_ms, state.tick)
    }
}

/// Hand-driven clock for deterministic tests.
///
/// Returns `start`, `start + step`, `start + 2 * step`, ... with tick 0.
pub struct ManualClock {
    state: Mutex<u64>,
    step: u64,
}

impl ManualClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            state: Mutex::new(start),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let mut next = self.state.lock().expect("manual clock mutex poisoned");
        let current = *next;
        *next += self.step;
        Timestamp::new(current, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_is_strictly_increasing() {
        let clock = WallClock::new();
        let mut previous = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn manual_clock_steps_deterministically() {
        let clock = ManualClock::new(1_000, 5);
        assert_eq!(clock.now(), Timestamp::new(1_000, 0));
        assert_eq!(clock.now(), Timestamp::new(1_005, 0));
        assert_eq!(clock.now(), Timestamp::new(1_010, 0));
    }

    #[test]
    fn ordering_is_ms_then_tick() {
        assert!(Timestamp::new(5, 9) < Timestamp::new(6, 0));
        assert!(Timestamp::new(5, 0) < Timestamp::new(5, 1));
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::new(1_723_113_600_000, 3);
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }
}
