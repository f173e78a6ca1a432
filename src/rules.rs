//! Simulation tuning. Every table is indexed by [`LifeStage`] and every
//! duration is in simulated seconds.

use crate::stage::{LifeStage, StageTable};
use serde::{Deserialize, Serialize};

/// Timing for one star meter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeterProfile {
    /// Seconds per star lost.
    pub decay_period: StageTable<f64>,
    /// Seconds at 0 stars before the meter reports dying.
    pub death_threshold: StageTable<f64>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WasteRules {
    pub delay_min: StageTable<f64>,
    pub delay_max: StageTable<f64>,
    /// Seconds a dropping may sit uncleaned before it makes the pet ill.
    pub time_to_illness: StageTable<f64>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DemandRules {
    /// Fully satisfied seconds before the pet asks for attention.
    pub interval: f64,
    /// Seconds the request stays open.
    pub window: f64,
    /// Share of the current stage's growth threshold granted when answered.
    pub growth_bonus_fraction: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct OversightRules {
    /// Chance that a worsening edge flips oversight into watching.
    pub watch_chance: f64,
    /// Illness number that ends the game while oversight is activated.
    pub illness_game_over_count: u32,
    /// Both meters must be at or above this to stop watching.
    pub recovery_stars: u8,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RewardRules {
    pub tier2_min_score: f64,
    pub tier3_min_score: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rules {
    pub tick_step_secs: f64,
    pub catchup_step_secs: f64,
    pub catchup_max_secs: i64,
    pub growth_threshold: StageTable<f64>,
    pub hunger: MeterProfile,
    pub boredom: MeterProfile,
    pub illness_death: StageTable<f64>,
    pub waste: WasteRules,
    pub demand: DemandRules,
    pub oversight: OversightRules,
    pub rewards: RewardRules,
    /// Fraction of the stage's growth threshold spent at 0 stars that marks neglect.
    pub neglect_fraction: f64,
    pub play_entertain_stars: u8,
    pub egg_taps_to_hatch: u32,
}

const fn living(baby: f64, child: f64, young: f64, adult: f64, ready: f64) -> StageTable<f64> {
    StageTable::new(0.0, baby, child, young, adult, ready, 0.0)
}

impl Default for Rules {
    fn default() -> Self {
        // Per-star periods are 3/5 of the three-star design so a full
        // five-star meter still empties in the same time.
        let meter = MeterProfile {
            decay_period: living(540.0, 1800.0, 2160.0, 2160.0, 2160.0),
            death_threshold: living(600.0, 3600.0, 7200.0, 7200.0, 7200.0),
        };

        Self {
            tick_step_secs: 1.0,
            catchup_step_secs: 60.0,
            catchup_max_secs: 7 * 24 * 3600,
            growth_threshold: living(3600.0, 18000.0, 32400.0, 32400.0, 0.0),
            hunger: meter,
            boredom: meter,
            illness_death: living(600.0, 1800.0, 3600.0, 3600.0, 3600.0),
            waste: WasteRules {
                delay_min: living(1500.0, 4500.0, 6600.0, 6600.0, 6600.0),
                delay_max: living(3000.0, 9000.0, 13200.0, 13200.0, 13200.0),
                time_to_illness: living(600.0, 3600.0, 5400.0, 5400.0, 5400.0),
            },
            demand: DemandRules {
                interval: 600.0,
                window: 60.0,
                growth_bonus_fraction: 0.05,
            },
            oversight: OversightRules {
                watch_chance: 0.5,
                illness_game_over_count: 2,
                recovery_stars: 2,
            },
            rewards: RewardRules {
                tier2_min_score: 30.0,
                tier3_min_score: 70.0,
            },
            neglect_fraction: 0.5,
            play_entertain_stars: 1,
            egg_taps_to_hatch: 3,
        }
    }
}

impl Rules {
    pub fn growth_threshold(&self, stage: LifeStage) -> f64 {
        self.growth_threshold.get(stage)
    }

    /// Seconds at 0 stars after which the pet counts as neglected.
    pub fn neglect_threshold(&self, stage: LifeStage) -> f64 {
        self.growth_threshold(stage) * self.neglect_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_stages_have_no_timers() {
        let rules = Rules::default();
        for stage in [LifeStage::Egg, LifeStage::Dead] {
            assert_eq!(rules.growth_threshold(stage), 0.0);
            assert_eq!(rules.hunger.decay_period.get(stage), 0.0);
            assert_eq!(rules.illness_death.get(stage), 0.0);
        }
    }

    #[test]
    fn test_neglect_is_half_the_growth_threshold() {
        let rules = Rules::default();
        assert_eq!(rules.neglect_threshold(LifeStage::Baby), 1800.0);
        assert_eq!(rules.neglect_threshold(LifeStage::Child), 9000.0);
    }

    #[test]
    fn test_rules_survive_json() {
        let rules = Rules::default();
        let json = serde_json::to_string(&rules).unwrap();
        let back: Rules = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rules);
    }
}
