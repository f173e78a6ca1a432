use crate::stage::{LifeStage, StageTable};
use serde::{Deserialize, Serialize};

/// Sick/not-sick flag with its own death countdown. The countdown is
/// measured against the stage the illness was caught in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Illness {
    is_ill: bool,
    time_since_ill: f64,
    stage: LifeStage,
}

impl Default for Illness {
    fn default() -> Self {
        Self {
            is_ill: false,
            time_since_ill: 0.0,
            stage: LifeStage::Baby,
        }
    }
}

impl Illness {
    pub fn update(&mut self, dt: f64) {
        if self.is_ill {
            self.time_since_ill += dt.max(0.0);
        }
    }

    /// Fall ill at `stage`. Already being ill is left untouched.
    pub fn get_ill(&mut self, stage: LifeStage) {
        if self.is_ill {
            return;
        }
        self.is_ill = true;
        self.time_since_ill = 0.0;
        self.stage = stage;
    }

    pub fn cure(&mut self) {
        self.is_ill = false;
        self.time_since_ill = 0.0;
    }

    pub fn is_currently_ill(&self) -> bool {
        self.is_ill
    }

    pub fn onset_stage(&self) -> LifeStage {
        self.stage
    }

    pub fn time_since_ill(&self) -> f64 {
        self.time_since_ill
    }

    pub fn is_dying(&self, death: &StageTable<f64>) -> bool {
        self.is_ill && self.time_since_ill >= death.get(self.stage)
    }

    pub fn time_until_death(&self, death: &StageTable<f64>) -> Option<f64> {
        if !self.is_ill {
            return None;
        }
        Some((death.get(self.stage) - self.time_since_ill).max(0.0))
    }
}
