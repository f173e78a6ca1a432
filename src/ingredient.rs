use crate::personality::BasePersonality;
use crate::rules::RewardRules;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NEUTRAL_ID: &str = "neutral_basic";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    T1 = 1,
    T2 = 2,
    T3 = 3,
}

impl Tier {
    pub fn from_number(n: u8) -> Option<Tier> {
        match n {
            1 => Some(Tier::T1),
            2 => Some(Tier::T2),
            3 => Some(Tier::T3),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// A food item. Flavored ingredients leave a memory when eaten; the
/// neutral one is always available and never counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub personality: BasePersonality,
    pub tier: Tier,
}

impl Ingredient {
    /// Neutral food only comes in tier 1.
    pub fn new(personality: BasePersonality, tier: Tier) -> Self {
        let tier = if personality.is_neutral() { Tier::T1 } else { tier };
        Self { personality, tier }
    }

    pub fn neutral() -> Self {
        Self::new(BasePersonality::Neutral, Tier::T1)
    }

    pub fn is_neutral(&self) -> bool {
        self.personality.is_neutral()
    }

    /// Inventory key: `{personality}_t{tier}`, or `neutral_basic`.
    pub fn identifier(&self) -> String {
        if self.is_neutral() {
            return NEUTRAL_ID.to_string();
        }
        format!("{}_t{}", self.personality, self.tier.number())
    }

    pub fn parse_identifier(id: &str) -> Option<Ingredient> {
        if id == NEUTRAL_ID {
            return Some(Self::neutral());
        }
        let (tag, tier) = id.split_once('_')?;
        let personality: BasePersonality = tag.parse().ok()?;
        if personality.is_neutral() {
            return None;
        }
        let tier = Tier::from_number(tier.strip_prefix('t')?.parse().ok()?)?;
        Some(Self::new(personality, tier))
    }

    pub fn satiation_stars(&self) -> u8 {
        if self.is_neutral() {
            return 1;
        }
        self.tier.number()
    }

    pub fn display_name(&self) -> String {
        match self.personality {
            BasePersonality::Neutral => "Neutral mochi".to_string(),
            p => format!("{p} ingredient T{}", self.tier.number()),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

/// Ingredients earned by a minigame: one tier-1 always, plus a tier-2 for
/// a middling score or a tier-3 for a good one.
pub fn minigame_rewards(tag: BasePersonality, score: f64, rules: &RewardRules) -> Vec<Ingredient> {
    let mut out = vec![Ingredient::new(tag, Tier::T1)];
    if score >= rules.tier3_min_score {
        out.push(Ingredient::new(tag, Tier::T3));
    } else if score >= rules.tier2_min_score {
        out.push(Ingredient::new(tag, Tier::T2));
    }
    out
}
