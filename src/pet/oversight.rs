//! Oversight: once activated from outside, the pet is watched for worsening
//! care, and what would be a death becomes an escalation game-over.

use crate::rules::OversightRules;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What flipped oversight into watching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchReason {
    Hunger,
    Boredom,
    Waste,
}

/// What ended the game under oversight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    HungerDeath,
    SecondIllness,
}

impl EscalationReason {
    pub fn label(self) -> &'static str {
        match self {
            EscalationReason::HungerDeath => "starvation",
            EscalationReason::SecondIllness => "repeated illness",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Oversight {
    activated: bool,
    watching: bool,
    reason: Option<WatchReason>,
    illness_count: u32,
    escalated: Option<EscalationReason>,
    warned: bool,
    prev_hunger: u8,
    prev_boredom: u8,
    prev_waste: bool,
}

/// A meter worsening edge: dropping into the last star or out of it.
fn meter_dropped(prev: u8, now: u8) -> bool {
    now < prev && now <= 1
}

impl Oversight {
    pub fn activate(&mut self, hunger: u8, boredom: u8, waste: bool) {
        if !self.activated {
            info!("oversight activated");
            self.warned = false;
        }
        self.activated = true;
        self.prime(hunger, boredom, waste);
    }

    /// Record the current values as the previous tick's without checking edges.
    pub fn prime(&mut self, hunger: u8, boredom: u8, waste: bool) {
        self.prev_hunger = hunger;
        self.prev_boredom = boredom;
        self.prev_waste = waste;
    }

    /// Per-tick edge check. Returns `true` when oversight starts watching.
    pub fn observe<R: Rng>(
        &mut self,
        hunger: u8,
        boredom: u8,
        waste: bool,
        rules: &OversightRules,
        rng: &mut R,
    ) -> bool {
        let mut started = false;

        if self.activated {
            if self.watching {
                if hunger >= rules.recovery_stars && boredom >= rules.recovery_stars && !waste {
                    info!(reason = ?self.reason, "oversight stood down");
                    self.watching = false;
                    self.reason = None;
                }
            } else {
                let edges = [
                    (meter_dropped(self.prev_hunger, hunger), WatchReason::Hunger),
                    (meter_dropped(self.prev_boredom, boredom), WatchReason::Boredom),
                    (waste && !self.prev_waste, WatchReason::Waste),
                ];
                for (fired, reason) in edges {
                    if fired && rng.gen::<f64>() < rules.watch_chance {
                        warn!(?reason, "oversight is watching");
                        self.watching = true;
                        self.reason = Some(reason);
                        started = true;
                        break;
                    }
                }
            }
        }

        self.prime(hunger, boredom, waste);
        started
    }

    /// `true` the first time it is called since activation, so the player
    /// is warned once however often watching starts again.
    pub fn mark_warned(&mut self) -> bool {
        !std::mem::replace(&mut self.warned, true)
    }

    /// Count an illness and return the running total.
    pub fn record_illness(&mut self) -> u32 {
        self.illness_count += 1;
        self.illness_count
    }

    /// Latch the game-over. `false` if it was already latched.
    pub fn escalate(&mut self, reason: EscalationReason) -> bool {
        if self.escalated.is_some() {
            return false;
        }
        warn!(?reason, "oversight escalation");
        self.escalated = Some(reason);
        true
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    pub fn reason(&self) -> Option<WatchReason> {
        self.reason
    }

    pub fn illness_count(&self) -> u32 {
        self.illness_count
    }

    pub fn escalation(&self) -> Option<EscalationReason> {
        self.escalated
    }

    pub fn is_escalated(&self) -> bool {
        self.escalated.is_some()
    }
}
