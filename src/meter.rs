//! Decaying 0-5 star resource shared by hunger and boredom.

use crate::rules::MeterProfile;
use crate::stage::LifeStage;
use serde::{Deserialize, Serialize};

pub const MAX_STARS: u8 = 5;

/// A star meter. Stars only go down through [`NeedMeter::update`] and only
/// go up through [`NeedMeter::satiate`] / [`NeedMeter::entertain`].
///
/// Once the meter is empty a death countdown runs against the threshold
/// captured at the moment the last star was lost.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NeedMeter {
    stars: u8,
    time_to_next_level: f64,
    death_timer: f64,
    death_threshold: f64,
}

impl Default for NeedMeter {
    fn default() -> Self {
        Self {
            stars: MAX_STARS,
            time_to_next_level: 0.0,
            death_timer: 0.0,
            death_threshold: 0.0,
        }
    }
}

impl NeedMeter {
    pub fn new(stage: LifeStage, profile: &MeterProfile) -> Self {
        Self {
            time_to_next_level: profile.decay_period.get(stage),
            ..Self::default()
        }
    }

    /// Advance by `dt` seconds. Time left over after a star is lost keeps
    /// counting against the next star (or the death timer), so one large
    /// step lands where many small ones would.
    pub fn update(&mut self, dt: f64, stage: LifeStage, profile: &MeterProfile) {
        let mut remaining = dt.max(0.0);

        while self.stars > 0 && remaining > 0.0 {
            if remaining < self.time_to_next_level {
                self.time_to_next_level -= remaining;
                return;
            }
            remaining -= self.time_to_next_level.max(0.0);
            self.stars -= 1;
            self.time_to_next_level = profile.decay_period.get(stage);
            if self.stars == 0 {
                self.death_threshold = profile.death_threshold.get(stage);
            }
        }

        if self.stars == 0 {
            self.death_timer += remaining;
        }
    }

    /// Add stars (capped at [`MAX_STARS`]) and cancel any death countdown,
    /// including when called at 0 stars.
    pub fn satiate(&mut self, stars: u8) {
        self.stars = self.stars.saturating_add(stars).min(MAX_STARS);
        self.death_timer = 0.0;
    }

    pub fn entertain(&mut self, stars: u8) {
        self.satiate(stars);
    }

    /// Adopt the new stage's decay period without touching the star count.
    pub fn on_stage_change(&mut self, stage: LifeStage, profile: &MeterProfile) {
        self.time_to_next_level = profile.decay_period.get(stage);
    }

    pub fn reset(&mut self, stage: LifeStage, profile: &MeterProfile) {
        *self = Self::new(stage, profile);
    }

    pub fn is_dying(&self) -> bool {
        self.stars == 0 && self.death_timer >= self.death_threshold
    }

    /// Seconds left before the meter kills, or `None` while any star remains.
    pub fn time_until_death(&self) -> Option<f64> {
        if self.stars > 0 {
            return None;
        }
        Some((self.death_threshold - self.death_timer).max(0.0))
    }

    pub fn stars(&self) -> u8 {
        self.stars
    }

    pub fn time_to_next_level(&self) -> f64 {
        self.time_to_next_level
    }

    pub fn death_timer(&self) -> f64 {
        self.death_timer
    }

    pub fn is_full(&self) -> bool {
        self.stars >= MAX_STARS
    }

    pub fn is_empty(&self) -> bool {
        self.stars == 0
    }

    /// One star or less: the point where the pet starts showing it.
    pub fn is_low(&self) -> bool {
        self.stars <= 1
    }

    /// Repair a meter read from disk. Missing timers take the stage's
    /// values, so loading never costs a star or kills outright.
    pub(crate) fn clamp_loaded(&mut self, stage: LifeStage, profile: &MeterProfile) {
        self.stars = self.stars.min(MAX_STARS);
        self.time_to_next_level = self.time_to_next_level.max(0.0);
        self.death_timer = self.death_timer.max(0.0);
        if self.stars == 0 && (self.death_threshold.is_nan() || self.death_threshold <= 0.0) {
            self.death_threshold = profile.death_threshold.get(stage);
        }
        if self.stars > 0 && self.time_to_next_level <= 0.0 {
            self.time_to_next_level = profile.decay_period.get(stage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;

    fn baby_meter() -> (NeedMeter, MeterProfile) {
        let profile = Rules::default().hunger;
        (NeedMeter::new(LifeStage::Baby, &profile), profile)
    }

    #[test]
    fn test_starts_full_with_stage_period() {
        let (m, _) = baby_meter();
        assert_eq!(m.stars(), MAX_STARS);
        assert_eq!(m.time_to_next_level(), 540.0);
        assert_eq!(m.time_until_death(), None);
    }

    #[test]
    fn test_loses_one_star_per_period() {
        let (mut m, p) = baby_meter();
        m.update(539.0, LifeStage::Baby, &p);
        assert_eq!(m.stars(), 5);
        m.update(1.0, LifeStage::Baby, &p);
        assert_eq!(m.stars(), 4);
        assert_eq!(m.time_to_next_level(), 540.0);
    }

    #[test]
    fn test_empty_meter_starts_death_countdown() {
        let (mut m, p) = baby_meter();
        m.update(540.0 * 5.0, LifeStage::Baby, &p);
        assert_eq!(m.stars(), 0);
        assert_eq!(m.time_until_death(), Some(600.0));
        assert!(!m.is_dying());

        m.update(599.0, LifeStage::Baby, &p);
        assert!(!m.is_dying());
        m.update(1.0, LifeStage::Baby, &p);
        assert!(m.is_dying());
        assert_eq!(m.time_until_death(), Some(0.0));
    }

    #[test]
    fn test_satiate_at_zero_cancels_countdown() {
        let (mut m, p) = baby_meter();
        m.update(540.0 * 5.0 + 300.0, LifeStage::Baby, &p);
        assert_eq!(m.death_timer(), 300.0);

        m.satiate(1);
        assert_eq!(m.stars(), 1);
        assert_eq!(m.death_timer(), 0.0);
        assert_eq!(m.time_until_death(), None);
    }

    #[test]
    fn test_loaded_empty_meter_without_threshold_gets_stage_threshold() {
        let p = Rules::default().hunger;
        let mut m: NeedMeter =
            serde_json::from_str(r#"{"stars": 0, "timeToNextLevel": 2160.0}"#).unwrap();
        m.clamp_loaded(LifeStage::Young, &p);
        assert_eq!(m.time_until_death(), Some(7200.0));
        assert!(!m.is_dying());
    }

    #[test]
    fn test_loaded_threshold_is_kept() {
        let p = Rules::default().hunger;
        let mut m: NeedMeter = serde_json::from_str(
            r#"{"stars": 0, "deathTimer": 100.0, "deathThreshold": 600.0}"#,
        )
        .unwrap();
        m.clamp_loaded(LifeStage::Young, &p);
        assert_eq!(m.time_until_death(), Some(500.0));
    }

    #[test]
    fn test_satiate_caps_at_max() {
        let (mut m, p) = baby_meter();
        m.update(540.0 * 2.0, LifeStage::Baby, &p);
        m.satiate(3);
        assert_eq!(m.stars(), MAX_STARS);
        m.entertain(1);
        assert_eq!(m.stars(), MAX_STARS);
    }

    #[test]
    fn test_stage_change_keeps_stars_and_rescales_next_period() {
        let (mut m, p) = baby_meter();
        m.update(540.0 * 2.0 + 100.0, LifeStage::Baby, &p);
        assert_eq!(m.stars(), 3);
        m.on_stage_change(LifeStage::Child, &p);
        assert_eq!(m.stars(), 3);
        assert_eq!(m.time_to_next_level(), 1800.0);
    }

    #[test]
    fn test_period_is_read_when_a_star_is_lost() {
        let (mut m, p) = baby_meter();
        m.update(500.0, LifeStage::Baby, &p);
        // Stage moves on without on_stage_change: the running countdown
        // keeps its value, the next one uses the new stage.
        m.update(40.0, LifeStage::Child, &p);
        assert_eq!(m.stars(), 4);
        assert_eq!(m.time_to_next_level(), 1800.0);
    }

    #[test]
    fn test_death_threshold_follows_stage_at_last_star() {
        let profile = Rules::default().hunger;
        let mut m = NeedMeter::new(LifeStage::Young, &profile);
        m.update(2160.0 * 5.0, LifeStage::Young, &profile);
        assert_eq!(m.time_until_death(), Some(7200.0));
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let (mut m, p) = baby_meter();
        m.update(-100.0, LifeStage::Baby, &p);
        assert_eq!(m.stars(), MAX_STARS);
        assert_eq!(m.time_to_next_level(), 540.0);
    }
}
