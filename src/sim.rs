use crate::pet::{EscalationReason, Pet, PetEvent};
use crate::rules::Rules;
use crate::sleep::SleepSchedule;
use crate::stage::LifeStage;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// How fast simulated time runs against the wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeMode {
    #[default]
    RealTime,
    Fast,
    VeryFast,
    Instant,
    Debug,
}

impl TimeMode {
    pub const ALL: [TimeMode; 5] = [
        TimeMode::RealTime,
        TimeMode::Fast,
        TimeMode::VeryFast,
        TimeMode::Instant,
        TimeMode::Debug,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            TimeMode::RealTime => 1.0,
            TimeMode::Fast => 10.0,
            TimeMode::VeryFast => 60.0,
            TimeMode::Instant => 600.0,
            TimeMode::Debug => 1000.0,
        }
    }

    pub fn next(self) -> TimeMode {
        let idx = TimeMode::ALL.iter().position(|m| *m == self).unwrap_or(0);
        TimeMode::ALL[(idx + 1) % TimeMode::ALL.len()]
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.multiplier())
    }
}

/// What happened while the player was away.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchupSummary {
    pub simulated_secs: f64,
    pub hunger_min: u8,
    pub boredom_min: u8,
    pub became_ill: bool,
    pub ambulance: bool,
    pub died: bool,
    pub evolved_to: Option<LifeStage>,
    pub escalated: Option<EscalationReason>,
}

impl CatchupSummary {
    pub fn new(pet: &Pet) -> Self {
        Self {
            simulated_secs: 0.0,
            hunger_min: pet.hunger().stars(),
            boredom_min: pet.boredom().stars(),
            became_ill: false,
            ambulance: false,
            died: false,
            evolved_to: None,
            escalated: None,
        }
    }

    pub fn has_anything(&self) -> bool {
        self.simulated_secs > 0.0
            && (self.became_ill
                || self.ambulance
                || self.died
                || self.evolved_to.is_some()
                || self.escalated.is_some()
                || self.hunger_min <= 1
                || self.boredom_min <= 1)
    }

    fn record(&mut self, pet: &Pet, was_ill: bool, events: &[PetEvent]) {
        self.hunger_min = self.hunger_min.min(pet.hunger().stars());
        self.boredom_min = self.boredom_min.min(pet.boredom().stars());
        if pet.illness().is_currently_ill() && !was_ill {
            self.became_ill = true;
        }
        for e in events {
            match e {
                PetEvent::Evolved(stage) => self.evolved_to = Some(*stage),
                PetEvent::Died => self.died = true,
                PetEvent::OversightEscalation(reason) => self.escalated = Some(*reason),
                PetEvent::AmbulanceTrigger => {
                    self.ambulance = true;
                    self.became_ill = true;
                }
                PetEvent::Grew(_) | PetEvent::FirstWarning | PetEvent::AttentionDemanded => {}
            }
        }
    }
}

/// Advance a live pet by `dt`. Time stands still while it sleeps.
/// Returns whether the pet was updated.
pub fn live_tick(pet: &mut Pet, dt: f64, sleep: &SleepSchedule, rules: &Rules) -> bool {
    if sleep.is_sleeping() {
        return false;
    }
    pet.update(dt, rules);
    true
}

/// Replay the time between `last_seen` and `now` in fixed chunks. Wall
/// time is clamped to the configured maximum, then scaled by `mode`.
pub fn catch_up(
    pet: &mut Pet,
    last_seen: DateTime<Utc>,
    now: DateTime<Utc>,
    mode: TimeMode,
    rules: &Rules,
) -> CatchupSummary {
    let elapsed = now - last_seen;
    let max_elapsed = ChronoDuration::seconds(rules.catchup_max_secs.max(0));
    let elapsed = elapsed.clamp(ChronoDuration::zero(), max_elapsed);

    let mut summary = CatchupSummary::new(pet);
    let mut remaining = elapsed.num_milliseconds() as f64 / 1000.0 * mode.multiplier();
    let step = rules.catchup_step_secs.max(rules.tick_step_secs).max(1.0);

    while remaining > 0.0 && pet.is_alive() {
        let dt = remaining.min(step);
        let was_ill = pet.illness().is_currently_ill();
        pet.update(dt, rules);
        let events = pet.drain_events();
        summary.record(pet, was_ill, &events);
        summary.simulated_secs += dt;
        remaining -= dt;
    }

    if summary.simulated_secs > 0.0 {
        info!(
            simulated = summary.simulated_secs,
            died = summary.died,
            evolved = ?summary.evolved_to,
            "offline catch-up"
        );
    }
    summary
}
