//! Flaw and excellence tables.
//!
//! Both tables partition `1..=100` into six ranges. Rolls are generated by
//! the engine, so a roll outside the partition is a bug and is reported as
//! [`BrewError::RollOutOfRange`] rather than mapped to a default.

use brewing_common::{BrewError, BrewResult};

/// One row of a range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    /// Lowest roll covered, inclusive
    pub min: u32,
    /// Highest roll covered, inclusive
    pub max: u32,
    /// Narrative effect text
    pub effect: &'static str,
}

impl TableEntry {
    const fn new(min: u32, max: u32, effect: &'static str) -> Self {
        Self { min, max, effect }
    }

    /// Checks whether the roll falls in this row.
    #[must_use]
    pub const fn covers(&self, roll: u32) -> bool {
        roll >= self.min && roll <= self.max
    }
}

/// Complications rolled on a failed brew.
pub const FLAW_TABLE: [TableEntry; 6] = [
    TableEntry::new(
        1,
        10,
        "Volatile: the potion explodes when opened, dealing 1d6 fire damage to the holder.",
    ),
    TableEntry::new(
        11,
        20,
        "Curdled: the drinker must succeed on a DC 12 Constitution save or be poisoned for 1 hour.",
    ),
    TableEntry::new(
        21,
        30,
        "Weakened: the potion's effect lasts half as long as normal.",
    ),
    TableEntry::new(
        31,
        40,
        "Foul: the taste is so vile the drinker has disadvantage on their next ability check.",
    ),
    TableEntry::new(
        41,
        50,
        "Delayed: the potion takes effect 1d4 rounds after it is drunk.",
    ),
    TableEntry::new(
        51,
        100,
        "Inert: the potion looks right but has no effect at all.",
    ),
];

/// Bonuses rolled on a natural 20.
pub const EXCELLENCE_TABLE: [TableEntry; 6] = [
    TableEntry::new(
        1,
        10,
        "Potent: the potion's effect lasts twice as long as normal.",
    ),
    TableEntry::new(
        11,
        20,
        "Restorative: the drinker also regains 2d4 + 2 hit points.",
    ),
    TableEntry::new(
        21,
        30,
        "Quickened: the potion can be drunk as a bonus action.",
    ),
    TableEntry::new(
        31,
        40,
        "Lingering: the drinker gains advantage on their next saving throw within the hour.",
    ),
    TableEntry::new(
        41,
        50,
        "Bountiful: the batch yields one extra dose.",
    ),
    TableEntry::new(
        51,
        100,
        "Refined: the potion is flawless and sells for half again its usual price.",
    ),
];

fn lookup(table: &[TableEntry], name: &'static str, roll: u32) -> BrewResult<&'static str> {
    table
        .iter()
        .find(|entry| entry.covers(roll))
        .map(|entry| entry.effect)
        .ok_or(BrewError::RollOutOfRange { table: name, roll })
}

/// Resolves a fumble roll against the flaw table.
pub fn lookup_flaw(roll: u32) -> BrewResult<&'static str> {
    lookup(&FLAW_TABLE, "flaw", roll)
}

/// Resolves a secondary roll against the excellence table.
pub fn lookup_excellence(roll: u32) -> BrewResult<&'static str> {
    lookup(&EXCELLENCE_TABLE, "excellence", roll)
}
