//! Dice sources for brew resolution.
//!
//! Every random draw the engine makes goes through [`DiceSource`], so a seeded
//! or scripted source replays a brew exactly.

use std::collections::VecDeque;

/// Source of dice rolls and percentile draws.
pub trait DiceSource {
    /// Rolls a die with `sides` faces, returning a value in `[1, sides]`.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Draws a real number in `[0, 100)`.
    fn percentile(&mut self) -> f64;

    /// Rolls a d20.
    fn d20(&mut self) -> u32 {
        self.roll_die(20)
    }

    /// Rolls a d100.
    fn d100(&mut self) -> u32 {
        self.roll_die(100)
    }
}

/// Dice backed by a `fastrand` generator.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: fastrand::Rng,
}

impl SeededDice {
    /// Creates dice seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates dice with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for SeededDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for SeededDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.u32(1..=sides.max(1))
    }

    fn percentile(&mut self) -> f64 {
        self.rng.f64() * 100.0
    }
}

/// A single scripted draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedRoll {
    /// Value returned by the next die roll
    Die(u32),
    /// Value returned by the next percentile draw
    Percentile(f64),
}

/// Dice that replay a fixed script.
///
/// Die rolls are clamped into `[1, sides]` and percentile draws into
/// `[0, 100)`. A draw whose kind does not match the next scripted entry, or
/// an exhausted script, yields the lowest legal value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<ScriptedRoll>,
    consumed: usize,
}

impl ScriptedDice {
    /// Creates dice from a script.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = ScriptedRoll>) -> Self {
        Self {
            script: script.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Creates dice that only return die rolls.
    #[must_use]
    pub fn rolls(values: &[u32]) -> Self {
        Self::new(values.iter().map(|v| ScriptedRoll::Die(*v)))
    }

    /// Number of draws made so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Draws left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.consumed += 1;
        match self.script.front() {
            Some(ScriptedRoll::Die(value)) => {
                let value = *value;
                self.script.pop_front();
                value.clamp(1, sides.max(1))
            },
            _ => 1,
        }
    }

    fn percentile(&mut self) -> f64 {
        self.consumed += 1;
        match self.script.front() {
            Some(ScriptedRoll::Percentile(value)) => {
                let value = *value;
                self.script.pop_front();
                value.clamp(0.0, 99.999)
            },
            _ => 0.0,
        }
    }
}
