//! Brew outcome resolution.
//!
//! A brew draws a natural d20, then scores it in one of two modes:
//! - `ttrpg`: natural roll plus bonus against the target difficulty
//! - `percentage`: a percentile draw against a success chance derived from
//!   difficulty and bonus
//!
//! A natural 20 succeeds in either mode and rolls on the excellence table.
//! A failure rolls on the flaw table. Draw order is fixed (d20, percentile in
//! percentage mode, then the d100 secondary roll) so seeded dice replay.

use brewing_common::BrewResult;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dice::DiceSource;
use crate::tables::{lookup_excellence, lookup_flaw};

/// Natural roll that always succeeds and upgrades quality.
pub const NATURAL_TWENTY: u32 = 20;

/// How a brew attempt is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Success chance derived from difficulty, resolved by a percentile draw.
    #[default]
    Percentage,
    /// d20 plus bonus against the difficulty.
    Ttrpg,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => f.write_str("percentage"),
            Self::Ttrpg => f.write_str("ttrpg"),
        }
    }
}

/// Quality of a brewed potion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrewedQuality {
    /// Failed brew.
    Poor,
    /// Ordinary success.
    Standard,
    /// Natural 20.
    Excellent,
}

impl BrewedQuality {
    /// Get display name for this quality.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Standard => "Standard",
            Self::Excellent => "Excellent",
        }
    }
}

/// Every value drawn or computed while resolving a brew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollTrace {
    /// Scoring mode used
    pub mode: ResolutionMode,
    /// Natural d20
    pub natural: u32,
    /// Total bonus applied
    pub bonus: i32,
    /// Natural roll plus bonus
    pub total: i32,
    /// Difficulty the brew was checked against
    pub target: i32,
    /// Success chance in percent (percentage mode)
    pub success_chance: Option<f64>,
    /// Percentile draw (percentage mode)
    pub percentile: Option<f64>,
    /// d100 rolled on the flaw or excellence table
    pub secondary: Option<u32>,
}

impl RollTrace {
    /// Checks whether the natural roll was a 20.
    #[must_use]
    pub fn is_natural_twenty(&self) -> bool {
        self.natural == NATURAL_TWENTY
    }
}

/// Result of resolving a brew attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Whether the brew succeeded
    pub success: bool,
    /// Quality tier
    pub quality: BrewedQuality,
    /// Flaw text on failure
    pub flaw: Option<&'static str>,
    /// Excellence text on a natural 20
    pub excellence: Option<&'static str>,
    /// Roll trace
    pub trace: RollTrace,
}

/// Success chance in percent for the percentage mode.
///
/// `((21 - (target - bonus)) / 20) * 100`, clamped to `5..=95`. Computed as
/// `(21 - needed) * 5` so integer inputs give exact percentages.
#[must_use]
pub fn success_chance(target: i32, bonus: i32) -> f64 {
    let needed = f64::from(target - bonus);
    ((21.0 - needed) * 5.0).clamp(5.0, 95.0)
}

/// Resolves a brew attempt.
pub fn resolve<D: DiceSource + ?Sized>(
    target: i32,
    bonus: i32,
    mode: ResolutionMode,
    dice: &mut D,
) -> BrewResult<Outcome> {
    let natural = dice.d20();
    let total = natural as i32 + bonus;
    let natural_twenty = natural == NATURAL_TWENTY;

    let mut trace = RollTrace {
        mode,
        natural,
        bonus,
        total,
        target,
        success_chance: None,
        percentile: None,
        secondary: None,
    };

    let passed = match mode {
        ResolutionMode::Ttrpg => total >= target,
        ResolutionMode::Percentage => {
            let chance = success_chance(target, bonus);
            let draw = dice.percentile();
            trace.success_chance = Some(chance);
            trace.percentile = Some(draw);
            draw < chance
        },
    };

    if natural_twenty {
        let roll = dice.d100();
        trace.secondary = Some(roll);
        return Ok(Outcome {
            success: true,
            quality: BrewedQuality::Excellent,
            flaw: None,
            excellence: Some(lookup_excellence(roll)?),
            trace,
        });
    }

    if passed {
        return Ok(Outcome {
            success: true,
            quality: BrewedQuality::Standard,
            flaw: None,
            excellence: None,
            trace,
        });
    }

    let roll = dice.d100();
    trace.secondary = Some(roll);
    Ok(Outcome {
        success: false,
        quality: BrewedQuality::Poor,
        flaw: Some(lookup_flaw(roll)?),
        excellence: None,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{ScriptedDice, ScriptedRoll, SeededDice};
    use crate::tables::{EXCELLENCE_TABLE, FLAW_TABLE};

    #[test]
    fn test_ttrpg_exact_total_succeeds() {
        let mut dice = ScriptedDice::rolls(&[18]);
        let outcome = resolve(22, 4, ResolutionMode::Ttrpg, &mut dice).expect("valid rolls");

        assert!(outcome.success);
        assert_eq!(outcome.quality, BrewedQuality::Standard);
        assert_eq!(outcome.trace.total, 22);
        assert_eq!(outcome.trace.secondary, None);
        assert_eq!(dice.consumed(), 1);
    }

    #[test]
    fn test_ttrpg_natural_twenty_ignores_bonus() {
        let mut dice = ScriptedDice::rolls(&[20, 55]);
        let outcome = resolve(40, -5, ResolutionMode::Ttrpg, &mut dice).expect("valid rolls");

        assert!(outcome.success);
        assert_eq!(outcome.quality, BrewedQuality::Excellent);
        assert_eq!(outcome.excellence, Some(EXCELLENCE_TABLE[5].effect));
        assert_eq!(outcome.trace.secondary, Some(55));
        assert_eq!(outcome.flaw, None);
    }

    #[test]
    fn test_ttrpg_failure_rolls_flaw() {
        let mut dice = ScriptedDice::rolls(&[3, 5]);
        let outcome = resolve(22, 4, ResolutionMode::Ttrpg, &mut dice).expect("valid rolls");

        assert!(!outcome.success);
        assert_eq!(outcome.quality, BrewedQuality::Poor);
        assert_eq!(outcome.flaw, Some(FLAW_TABLE[0].effect));
        assert_eq!(outcome.trace.secondary, Some(5));
    }

    #[test]
    fn test_natural_one_is_an_ordinary_roll() {
        let mut dice = ScriptedDice::rolls(&[1]);
        let outcome = resolve(10, 12, ResolutionMode::Ttrpg, &mut dice).expect("valid rolls");
        assert!(outcome.success);
        assert_eq!(outcome.quality, BrewedQuality::Standard);
    }

    #[test]
    fn test_success_chance_formula() {
        // target 22, bonus 4: (21 - 18) / 20 = 15%
        assert!((success_chance(22, 4) - 15.0).abs() < 1e-9);
        assert!((success_chance(10, 0) - 55.0).abs() < 1e-9);
        assert!((success_chance(40, 0) - 5.0).abs() < 1e-9);
        assert!((success_chance(5, 10) - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_mode_draw_below_chance() {
        let mut dice = ScriptedDice::new([ScriptedRoll::Die(2), ScriptedRoll::Percentile(54.9)]);
        let outcome = resolve(10, 0, ResolutionMode::Percentage, &mut dice).expect("valid rolls");

        assert!(outcome.success);
        assert_eq!(outcome.quality, BrewedQuality::Standard);
        assert_eq!(outcome.trace.success_chance, Some(55.0));
        assert_eq!(outcome.trace.percentile, Some(54.9));
    }

    #[test]
    fn test_percentage_mode_draw_at_chance_fails() {
        let mut dice = ScriptedDice::new([
            ScriptedRoll::Die(19),
            ScriptedRoll::Percentile(55.0),
            ScriptedRoll::Die(33),
        ]);
        let outcome = resolve(10, 0, ResolutionMode::Percentage, &mut dice).expect("valid rolls");

        assert!(!outcome.success);
        assert_eq!(outcome.flaw, Some(FLAW_TABLE[3].effect));
        assert_eq!(outcome.trace.secondary, Some(33));
    }

    #[test]
    fn test_percentage_mode_natural_twenty_is_excellent() {
        let mut dice = ScriptedDice::new([
            ScriptedRoll::Die(20),
            ScriptedRoll::Percentile(99.0),
            ScriptedRoll::Die(12),
        ]);
        let outcome = resolve(30, 0, ResolutionMode::Percentage, &mut dice).expect("valid rolls");

        assert!(outcome.success);
        assert_eq!(outcome.quality, BrewedQuality::Excellent);
        assert_eq!(outcome.excellence, Some(EXCELLENCE_TABLE[1].effect));
    }

    #[test]
    fn test_seeded_resolution_is_deterministic() {
        let run = |seed| {
            let mut dice = SeededDice::with_seed(seed);
            (0..50)
                .map(|_| {
                    resolve(18, 2, ResolutionMode::Percentage, &mut dice).expect("valid rolls")
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}
