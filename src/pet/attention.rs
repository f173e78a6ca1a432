//! Attention demand: a fully satisfied pet periodically asks to be
//! petted, and answering in time earns a growth bonus.

use crate::rules::DemandRules;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemandChange {
    None,
    Started,
    Expired,
    Cancelled,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttentionDemand {
    demanding: bool,
    /// Fully satisfied seconds since the last demand ended.
    satisfied_time: f64,
    /// Seconds the current demand has been open.
    open_time: f64,
}

impl AttentionDemand {
    pub fn update(&mut self, dt: f64, fully_satisfied: bool, rules: &DemandRules) -> DemandChange {
        if !fully_satisfied {
            let was_demanding = self.demanding;
            *self = Self::default();
            return if was_demanding {
                DemandChange::Cancelled
            } else {
                DemandChange::None
            };
        }

        if self.demanding {
            self.open_time += dt;
            if self.open_time >= rules.window {
                *self = Self::default();
                return DemandChange::Expired;
            }
            return DemandChange::None;
        }

        self.satisfied_time += dt;
        if self.satisfied_time >= rules.interval {
            self.demanding = true;
            self.satisfied_time = 0.0;
            self.open_time = 0.0;
            return DemandChange::Started;
        }
        DemandChange::None
    }

    /// Service an open demand. `false` when nothing was being asked.
    pub fn answer(&mut self) -> bool {
        if !self.demanding {
            return false;
        }
        *self = Self::default();
        true
    }

    pub fn is_demanding(&self) -> bool {
        self.demanding
    }

    pub fn time_until_demand(&self, rules: &DemandRules) -> Option<f64> {
        (!self.demanding).then(|| (rules.interval - self.satisfied_time).max(0.0))
    }

    pub fn window_left(&self, rules: &DemandRules) -> Option<f64> {
        self.demanding.then(|| (rules.window - self.open_time).max(0.0))
    }
}
