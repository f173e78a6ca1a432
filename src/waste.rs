use crate::rules::WasteRules;
use crate::stage::LifeStage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Droppings scheduled after each meal. Left uncleaned for long enough they
/// make the pet ill.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Waste {
    has_pooped: bool,
    time_until_poop: f64,
    time_since_poop: f64,
    stage: LifeStage,
}

impl Default for Waste {
    fn default() -> Self {
        Self {
            has_pooped: false,
            time_until_poop: 0.0,
            time_since_poop: 0.0,
            stage: LifeStage::Baby,
        }
    }
}

impl Waste {
    pub fn update(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        if !self.has_pooped && self.time_until_poop > 0.0 {
            self.time_until_poop -= dt;
            if self.time_until_poop <= 0.0 {
                self.has_pooped = true;
                // Only the overshoot counts as time spent on the floor.
                self.time_since_poop = -self.time_until_poop;
                self.time_until_poop = 0.0;
            }
            return;
        }
        if self.has_pooped {
            self.time_since_poop += dt;
        }
    }

    pub fn schedule_after_feeding<R: Rng>(
        &mut self,
        stage: LifeStage,
        rules: &WasteRules,
        rng: &mut R,
    ) {
        self.stage = stage;
        let min = rules.delay_min.get(stage);
        let max = rules.delay_max.get(stage).max(min);
        self.time_until_poop = min + rng.gen::<f64>() * (max - min);
    }

    pub fn clean(&mut self) {
        self.has_pooped = false;
        self.time_since_poop = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_pooped_now(&self) -> bool {
        self.has_pooped
    }

    pub fn time_until_poop(&self) -> f64 {
        self.time_until_poop
    }

    pub fn should_trigger_illness(&self, rules: &WasteRules) -> bool {
        self.has_pooped && self.time_since_poop >= rules.time_to_illness.get(self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_schedule_stays_in_stage_range() {
        let rules = Rules::default().waste;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut w = Waste::default();
            w.schedule_after_feeding(LifeStage::Child, &rules, &mut rng);
            assert!(w.time_until_poop() >= 4500.0);
            assert!(w.time_until_poop() <= 9000.0);
        }
    }

    #[test]
    fn test_poops_then_triggers_illness() {
        let rules = Rules::default().waste;
        let mut rng = StdRng::seed_from_u64(1);
        let mut w = Waste::default();
        w.schedule_after_feeding(LifeStage::Baby, &rules, &mut rng);
        let delay = w.time_until_poop();
        w.update(delay);
        assert!(w.has_pooped_now());
        assert!(!w.should_trigger_illness(&rules));
        w.update(599.0);
        assert!(!w.should_trigger_illness(&rules));
        w.update(1.0);
        assert!(w.should_trigger_illness(&rules));

        w.clean();
        assert!(!w.has_pooped_now());
        assert!(!w.should_trigger_illness(&rules));
    }

    #[test]
    fn test_nothing_happens_without_a_meal() {
        let rules = Rules::default().waste;
        let mut w = Waste::default();
        w.update(100_000.0);
        assert!(!w.has_pooped_now());
        assert!(!w.should_trigger_illness(&rules));
    }
}
