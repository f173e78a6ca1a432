//! Player-facing alerts, edge-detected between ticks with a per-kind
//! cooldown. Delivery is up to the host.

use crate::pet::Pet;
use crate::rules::Rules;
use crate::stage::LifeStage;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Seconds to death under which the pet is "near death".
pub const NEAR_DEATH_SECS: f64 = 600.0;
pub const ALERT_COOLDOWN_SECS: i64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertKind {
    AttentionLow,
    AttentionCritical,
    Illness,
    NearDeath,
    Evolution,
    Death,
}

impl AlertKind {
    pub fn id(self) -> &'static str {
        match self {
            AlertKind::AttentionLow => "attention_low",
            AlertKind::AttentionCritical => "attention_critical",
            AlertKind::Illness => "illness",
            AlertKind::NearDeath => "near_death",
            AlertKind::Evolution => "evolution",
            AlertKind::Death => "death",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AlertKind::AttentionLow => "Your pet needs attention",
            AlertKind::AttentionCritical => "Urgent: your pet needs care now!",
            AlertKind::Illness => "Your pet is ill and needs medicine",
            AlertKind::NearDeath => "Critical danger: your pet may die soon",
            AlertKind::Evolution => "Your pet is ready for its next stage",
            AlertKind::Death => "Your pet has died",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub all_enabled: bool,
    pub hunger_enabled: bool,
    pub illness_enabled: bool,
    pub death_enabled: bool,
    pub evolution_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            all_enabled: true,
            hunger_enabled: true,
            illness_enabled: true,
            death_enabled: true,
            evolution_enabled: true,
        }
    }
}

impl NotificationSettings {
    /// The master switch drags every toggle with it.
    pub fn set_all(&mut self, enabled: bool) {
        *self = Self {
            all_enabled: enabled,
            hunger_enabled: enabled,
            illness_enabled: enabled,
            death_enabled: enabled,
            evolution_enabled: enabled,
        };
    }

    pub fn set(&mut self, kind: AlertKind, enabled: bool) {
        match kind {
            AlertKind::AttentionLow | AlertKind::AttentionCritical => self.hunger_enabled = enabled,
            AlertKind::Illness => self.illness_enabled = enabled,
            AlertKind::NearDeath | AlertKind::Death => self.death_enabled = enabled,
            AlertKind::Evolution => self.evolution_enabled = enabled,
        }
        self.all_enabled = self.hunger_enabled
            && self.illness_enabled
            && self.death_enabled
            && self.evolution_enabled;
    }

    /// Per-kind toggle. `all_enabled` only summarizes the toggles, so one
    /// switched-off kind does not silence the others.
    pub fn allows(&self, kind: AlertKind) -> bool {
        match kind {
            AlertKind::AttentionLow | AlertKind::AttentionCritical => self.hunger_enabled,
            AlertKind::Illness => self.illness_enabled,
            AlertKind::NearDeath | AlertKind::Death => self.death_enabled,
            AlertKind::Evolution => self.evolution_enabled,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Observed {
    hunger: u8,
    boredom: u8,
    ill: bool,
    stage: LifeStage,
}

impl Observed {
    fn of(pet: &Pet) -> Self {
        Self {
            hunger: pet.hunger().stars(),
            boredom: pet.boredom().stars(),
            ill: pet.illness().is_currently_ill(),
            stage: pet.stage(),
        }
    }
}

#[derive(Debug)]
pub struct Alerts {
    prev: Option<Observed>,
    last_sent: HashMap<AlertKind, DateTime<Utc>>,
    cooldown: ChronoDuration,
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            prev: None,
            last_sent: HashMap::new(),
            cooldown: ChronoDuration::seconds(ALERT_COOLDOWN_SECS),
        }
    }
}

impl Alerts {
    /// Take the pet's current state as the baseline, e.g. after loading.
    pub fn prime(&mut self, pet: &Pet) {
        self.prev = Some(Observed::of(pet));
    }

    /// Alerts raised since the last call, filtered by settings and cooldown.
    pub fn check(
        &mut self,
        pet: &Pet,
        rules: &Rules,
        settings: &NotificationSettings,
        now: DateTime<Utc>,
    ) -> Vec<AlertKind> {
        let cur = Observed::of(pet);
        let prev = self.prev.unwrap_or(cur);
        self.prev = Some(cur);

        let mut raised = Vec::new();
        for (before, after) in [(prev.hunger, cur.hunger), (prev.boredom, cur.boredom)] {
            if after == 1 && before > 1 {
                raised.push(AlertKind::AttentionLow);
            }
            if after == 0 && before > 0 {
                raised.push(AlertKind::AttentionCritical);
            }
        }
        if cur.ill && !prev.ill {
            raised.push(AlertKind::Illness);
        }

        let near = |t: Option<f64>| t.is_some_and(|secs| secs <= NEAR_DEATH_SECS);
        if cur.stage != LifeStage::Dead
            && (near(pet.hunger().time_until_death())
                || near(pet.illness().time_until_death(&rules.illness_death)))
        {
            raised.push(AlertKind::NearDeath);
        }

        if !cur.stage.is_inert() && pet.growth_progress(rules) >= 1.0 {
            raised.push(AlertKind::Evolution);
        }
        if cur.stage == LifeStage::Dead && prev.stage != LifeStage::Dead {
            raised.push(AlertKind::Death);
        }

        raised.dedup();
        raised.retain(|kind| self.admit(*kind, settings, now));
        raised
    }

    fn admit(&mut self, kind: AlertKind, settings: &NotificationSettings, now: DateTime<Utc>) -> bool {
        if !settings.allows(kind) {
            return false;
        }
        if let Some(last) = self.last_sent.get(&kind) {
            if now - *last < self.cooldown {
                debug!(kind = kind.id(), "alert skipped (cooldown)");
                return false;
            }
        }
        self.last_sent.insert(kind, now);
        info!(kind = kind.id(), "alert");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hatched(rules: &Rules) -> Pet {
        let mut pet = Pet::new(rules, 5);
        while !pet.tap_egg(rules) {}
        pet
    }

    #[test]
    fn test_meter_drops_raise_attention_alerts() {
        let rules = Rules::default();
        let settings = NotificationSettings::default();
        let mut pet = hatched(&rules);
        let mut alerts = Alerts::default();
        alerts.prime(&pet);
        let now = Utc::now();

        pet.update(540.0 * 4.0, &rules);
        let raised = alerts.check(&pet, &rules, &settings, now);
        assert_eq!(raised, vec![AlertKind::AttentionLow]);

        // Still at one star: no new edge.
        let raised = alerts.check(&pet, &rules, &settings, now + ChronoDuration::seconds(120));
        assert!(raised.is_empty());

        pet.update(540.0, &rules);
        let raised = alerts.check(&pet, &rules, &settings, now + ChronoDuration::seconds(180));
        assert_eq!(
            raised,
            vec![AlertKind::AttentionCritical, AlertKind::NearDeath]
        );
    }

    #[test]
    fn test_cooldown_suppresses_repeats() {
        let rules = Rules::default();
        let settings = NotificationSettings::default();
        let mut pet = hatched(&rules);
        let mut alerts = Alerts::default();
        alerts.prime(&pet);
        let now = Utc::now();

        pet.update(540.0 * 5.0, &rules);
        assert!(alerts
            .check(&pet, &rules, &settings, now)
            .contains(&AlertKind::NearDeath));
        assert!(!alerts
            .check(&pet, &rules, &settings, now + ChronoDuration::seconds(30))
            .contains(&AlertKind::NearDeath));
        assert!(alerts
            .check(&pet, &rules, &settings, now + ChronoDuration::seconds(61))
            .contains(&AlertKind::NearDeath));
    }

    #[test]
    fn test_death_alert_fires_once_on_transition() {
        let rules = Rules::default();
        let settings = NotificationSettings::default();
        let mut pet = hatched(&rules);
        let mut alerts = Alerts::default();
        alerts.prime(&pet);
        let now = Utc::now();

        pet.update(4000.0, &rules);
        assert_eq!(pet.stage(), LifeStage::Dead);
        let raised = alerts.check(&pet, &rules, &settings, now);
        assert!(raised.contains(&AlertKind::Death));
        assert!(!raised.contains(&AlertKind::NearDeath));

        let later = now + ChronoDuration::seconds(600);
        assert!(alerts.check(&pet, &rules, &settings, later).is_empty());
    }

    #[test]
    fn test_settings_gate_alerts() {
        let mut settings = NotificationSettings::default();
        settings.set(AlertKind::Illness, false);
        assert!(!settings.all_enabled);
        assert!(!settings.allows(AlertKind::Illness));
        assert!(settings.allows(AlertKind::Death));

        settings.set_all(true);
        assert!(settings.allows(AlertKind::Illness));
        settings.set_all(false);
        assert!(!settings.hunger_enabled);
    }
}
