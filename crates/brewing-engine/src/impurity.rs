//! Impurity resolution.
//!
//! When a brew consumes ingredients carrying impurities, one of them
//! dominates and leaves a side-effect on the potion. Dominance is decided by
//! [`IMPURITY_RANKS`]; the side-effect text by [`impurity_effect`], scaled by
//! the brew's rarity.
//!
//! Impurity tags are free-form data. A tag outside the element catalog ranks
//! 0 and resolves to [`UNKNOWN_EFFECT`] instead of failing the brew.

use brewing_common::{Element, Rarity};
use serde::{Deserialize, Serialize};

use crate::ingredient::Ingredient;

/// Effect text for impurity tags outside the element catalog.
pub const UNKNOWN_EFFECT: &str = "Unknown effect";

/// Dominance rank of each impurity element. Unlisted elements rank 0.
pub const IMPURITY_RANKS: &[(Element, u8)] = &[
    (Element::Fire, 2),
    (Element::Water, 1),
    (Element::Earth, 1),
    (Element::Air, 1),
    (Element::Ice, 2),
    (Element::Lightning, 3),
    (Element::Thunder, 2),
    (Element::Acid, 3),
    (Element::Poison, 3),
    (Element::Light, 1),
    (Element::Shadow, 2),
    (Element::Radiant, 3),
    (Element::Necrotic, 4),
    (Element::Psychic, 3),
    (Element::Force, 2),
    (Element::Arcane, 3),
    (Element::Time, 4),
    (Element::Space, 4),
    (Element::Death, 4),
    (Element::Mind, 2),
    (Element::Blood, 2),
    (Element::Infernal, 3),
    (Element::Void, 4),
    (Element::Chaos, 4),
];

/// Returns the dominance rank of an impurity element.
#[must_use]
pub fn impurity_rank(element: Element) -> u8 {
    IMPURITY_RANKS
        .iter()
        .find(|(e, _)| *e == element)
        .map_or(0, |(_, rank)| *rank)
}

/// Elements with a non-zero rank, highest first.
#[must_use]
pub fn ranked_elements() -> Vec<(Element, u8)> {
    let mut ranked = IMPURITY_RANKS.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Side-effect text of an impurity element at the given rarity.
#[must_use]
pub fn impurity_effect(element: Element, rarity: Rarity) -> String {
    let m = u32::from(rarity.modifier());
    let die = rarity.die_size();
    let feet = rarity.distance_feet();

    match element {
        Element::Fire => {
            format!("The drinker takes 1d{die} fire damage as the draught burns going down.")
        },
        Element::Water => {
            format!(
                "The drinker gains a swim speed of {feet} feet but their walking speed drops by \
                 5 feet for 1 hour."
            )
        },
        Element::Earth => {
            format!("The drinker's walking speed is reduced by {feet} feet for 1 minute.")
        },
        Element::Air => {
            format!(
                "The drinker's walking speed increases by {feet} feet, but they cannot end their \
                 turn standing still."
            )
        },
        Element::Ice => {
            format!(
                "The drinker takes 1d{die} cold damage and their fingertips frost over for 1 hour."
            )
        },
        Element::Lightning => {
            format!(
                "The drinker takes 1d{die} lightning damage and sparks jump to any creature \
                 within 5 feet."
            )
        },
        Element::Thunder => {
            format!(
                "A thunderclap audible {} feet away erupts when the potion is uncorked.",
                feet * 10
            )
        },
        Element::Acid => {
            format!("The drinker takes 1d{die} acid damage as the potion eats at their throat.")
        },
        Element::Poison => {
            format!("The drinker takes 1d{die} poison damage and is poisoned for {m} rounds.")
        },
        Element::Light => {
            format!("The drinker sheds dim light in a {feet}-foot radius for 1 hour.")
        },
        Element::Shadow => {
            format!("The drinker's shadow detaches and follows {feet} feet behind them for 1 hour.")
        },
        Element::Radiant => {
            format!(
                "The drinker takes 1d{die} radiant damage and glows brightly, giving \
                 disadvantage on Stealth checks."
            )
        },
        Element::Necrotic => {
            format!(
                "The drinker takes 1d{die} necrotic damage and cannot regain hit points for {m} \
                 rounds."
            )
        },
        Element::Psychic => {
            format!("The drinker takes 1d{die} psychic damage and hears whispers for 1 hour.")
        },
        Element::Force => {
            format!(
                "The drinker is pushed {feet} feet in a random direction when the potion takes \
                 effect."
            )
        },
        Element::Arcane => {
            format!("The drinker suffers a -{m} penalty to spell attack rolls for 1 hour.")
        },
        Element::Time => {
            format!("The drinker acts last in initiative order for the next {m} rounds.")
        },
        Element::Space => {
            format!(
                "The drinker teleports {feet} feet in a random direction when the potion takes \
                 effect."
            )
        },
        Element::Life => {
            format!("The drinker regains 1d{die} hit points but feels ravenously hungry.")
        },
        Element::Death => {
            format!("The drinker has disadvantage on death saving throws for {m} days.")
        },
        Element::Mind => {
            format!("The drinker suffers a -{m} penalty to Intelligence checks for 1 hour.")
        },
        Element::Spirit => {
            format!("The drinker can see ghosts within {feet} feet, and the ghosts can see them.")
        },
        Element::Blood => format!("The drinker loses 1d{die} hit points as their nose bleeds."),
        Element::Bone => {
            "The drinker's bones ache, giving disadvantage on Strength checks for 1 hour."
                .to_string()
        },
        Element::Metal => {
            format!(
                "The drinker's skin takes a metallic sheen, granting +1 AC but -{feet} feet of \
                 speed for 1 hour."
            )
        },
        Element::Stone => {
            format!(
                "The drinker's feet turn partly to stone, reducing speed by {feet} feet for 1 \
                 minute."
            )
        },
        Element::Plant => {
            "Small leaves sprout from the drinker's hair and wilt after 1 hour.".to_string()
        },
        Element::Beast => {
            "The drinker grows coarse fur along their arms and can only growl for 1 hour."
                .to_string()
        },
        Element::Fey => format!("The drinker must speak only in rhyme for {m} hours."),
        Element::Infernal => {
            format!("The drinker takes 1d{die} fire damage and smells of brimstone for 1 day.")
        },
        Element::Celestial => format!("A faint halo appears above the drinker for {m} hours."),
        Element::Void => {
            format!("The drinker becomes partially transparent and takes 1d{die} force damage.")
        },
        Element::Chaos => {
            format!(
                "Roll on a wild magic table; the drinker suffers a -{m} penalty to their next roll."
            )
        },
        Element::Dream => {
            "The drinker falls asleep for 1 minute unless they succeed on a DC 12 Wisdom save."
                .to_string()
        },
        Element::Luck => {
            format!(
                "The drinker must reroll their next d20 roll of {m} or higher and take the lower \
                 result."
            )
        },
    }
}

/// Side-effect text for a free-form impurity tag.
#[must_use]
pub fn impurity_effect_for_tag(tag: &str, rarity: Rarity) -> String {
    match Element::lookup(tag) {
        Some(element) => impurity_effect(element, rarity),
        None => UNKNOWN_EFFECT.to_string(),
    }
}

/// The impurity that manifested in a brew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImpurity {
    /// Impurity tag as written on the ingredient
    pub tag: String,
    /// Catalog element, if the tag names one
    pub element: Option<Element>,
    /// Dominance rank of the tag
    pub rank: u8,
    /// Side-effect text
    pub effect: String,
}

/// Picks the dominant impurity among consumed ingredients.
///
/// The first impurity seen with the highest rank wins; a later one only
/// takes over with a strictly greater rank. Returns `None` when no consumed
/// ingredient carries an impurity.
#[must_use]
pub fn resolve_impurity<'a, I>(consumed: I, rarity: Rarity) -> Option<ResolvedImpurity>
where
    I: IntoIterator<Item = &'a Ingredient>,
{
    let (tag, element, rank) = consumed
        .into_iter()
        .filter_map(|i| i.impurity.as_deref())
        .map(|tag| {
            let element = Element::lookup(tag);
            (tag, element, element.map_or(0, impurity_rank))
        })
        .reduce(|dominant, next| if next.2 > dominant.2 { next } else { dominant })?;

    let effect = match element {
        Some(element) => impurity_effect(element, rarity),
        None => UNKNOWN_EFFECT.to_string(),
    };

    Some(ResolvedImpurity {
        tag: tag.to_string(),
        element,
        rank,
        effect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tainted(id: &str, impurity: &str) -> Ingredient {
        Ingredient::builder(id, id)
            .impurity(impurity)
            .quantity(1)
            .build()
    }

    #[test]
    fn test_no_impurities() {
        let clean = Ingredient::builder("sage", "Sage").quantity(1).build();
        assert_eq!(resolve_impurity([&clean], Rarity::Common), None);
        assert_eq!(resolve_impurity(Vec::<&Ingredient>::new(), Rarity::Common), None);
    }

    #[test]
    fn test_highest_rank_wins_either_order() {
        let fire = tainted("a", "fire");
        let time = tainted("b", "time");
        assert_eq!(impurity_rank(Element::Fire), 2);
        assert_eq!(impurity_rank(Element::Time), 4);

        let forward = resolve_impurity([&fire, &time], Rarity::Rare).expect("impure");
        let reverse = resolve_impurity([&time, &fire], Rarity::Rare).expect("impure");
        assert_eq!(forward.element, Some(Element::Time));
        assert_eq!(reverse.element, Some(Element::Time));
        assert_eq!(forward.effect, impurity_effect(Element::Time, Rarity::Rare));
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let fire = tainted("a", "fire");
        let ice = tainted("b", "ice");
        assert_eq!(impurity_rank(Element::Fire), impurity_rank(Element::Ice));

        let resolved = resolve_impurity([&fire, &ice], Rarity::Common).expect("impure");
        assert_eq!(resolved.element, Some(Element::Fire));
        let resolved = resolve_impurity([&ice, &fire], Rarity::Common).expect("impure");
        assert_eq!(resolved.element, Some(Element::Ice));
    }

    #[test]
    fn test_unranked_element_ranks_zero() {
        assert_eq!(impurity_rank(Element::Luck), 0);
        let luck = tainted("a", "luck");
        let water = tainted("b", "water");
        let resolved = resolve_impurity([&luck, &water], Rarity::Common).expect("impure");
        assert_eq!(resolved.element, Some(Element::Water));
    }

    #[test]
    fn test_unknown_tag_is_lenient() {
        let odd = tainted("a", "glitter");
        let resolved = resolve_impurity([&odd], Rarity::Common).expect("impure");
        assert_eq!(resolved.element, None);
        assert_eq!(resolved.rank, 0);
        assert_eq!(resolved.effect, UNKNOWN_EFFECT);
        assert_eq!(impurity_effect_for_tag("glitter", Rarity::Rare), UNKNOWN_EFFECT);
    }

    #[test]
    fn test_known_tag_beats_unknown() {
        let odd = tainted("a", "glitter");
        let water = tainted("b", "Water");
        let resolved = resolve_impurity([&odd, &water], Rarity::Common).expect("impure");
        assert_eq!(resolved.element, Some(Element::Water));
        assert_eq!(resolved.tag, "Water");
    }

    #[test]
    fn test_effects_scale_with_rarity() {
        assert!(impurity_effect(Element::Fire, Rarity::Common).contains("1d4"));
        assert!(impurity_effect(Element::Fire, Rarity::Artifact).contains("1d14"));
        assert!(impurity_effect(Element::Earth, Rarity::Rare).contains("15 feet"));
        assert!(impurity_effect(Element::Water, Rarity::Common)
            .contains("walking speed drops by 5 feet for 1 hour."));
    }

    #[test]
    fn test_every_element_has_distinct_effect() {
        let effects: HashSet<String> = Element::ALL
            .iter()
            .map(|e| impurity_effect(*e, Rarity::Uncommon))
            .collect();
        assert_eq!(effects.len(), Element::ALL.len());
        assert!(effects.iter().all(|e| !e.is_empty()));
    }

    #[test]
    fn test_ranks_are_one_to_four() {
        for (_, rank) in IMPURITY_RANKS {
            assert!((1..=4).contains(rank));
        }
        let ranked = ranked_elements();
        assert_eq!(ranked.first().map(|r| r.1), Some(4));
    }
}
