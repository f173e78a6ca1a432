//! Persisted forms. Every field is optional on load; anything missing
//! keeps the value a fresh pet would have.

use crate::illness::Illness;
use crate::inventory::Inventory;
use crate::memory::MemoryLedger;
use crate::meter::NeedMeter;
use crate::personality::Personality;
use crate::pet::{AttentionDemand, Oversight};
use crate::room::Room;
use crate::stage::LifeStage;
use crate::waste::Waste;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetSnapshot {
    pub stage: LifeStage,
    pub growth_points: f64,
    pub hunger: NeedMeter,
    #[serde(alias = "boring")]
    pub boredom: NeedMeter,
    pub illness: Illness,
    #[serde(alias = "poop")]
    pub waste: Waste,
    pub personality: Option<Personality>,
    #[serde(alias = "memorySystem")]
    pub memories: MemoryLedger,
    pub inventory: Inventory,
    pub neglected_time: f64,
    pub was_neglected: bool,
    pub oversight: Oversight,
    pub attention: AttentionDemand,
    pub egg_taps: u32,
    pub current_room: Room,
}

impl Default for PetSnapshot {
    fn default() -> Self {
        Self {
            stage: LifeStage::Egg,
            growth_points: 0.0,
            hunger: NeedMeter::default(),
            boredom: NeedMeter::default(),
            illness: Illness::default(),
            waste: Waste::default(),
            personality: None,
            memories: MemoryLedger::default(),
            inventory: Inventory::default(),
            neglected_time: 0.0,
            was_neglected: false,
            oversight: Oversight::default(),
            attention: AttentionDemand::default(),
            egg_taps: 0,
            current_room: Room::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub last_seen_utc: DateTime<Utc>,
    #[serde(default)]
    pub pet: PetSnapshot,
}

impl SaveFile {
    pub fn new(pet: PetSnapshot, last_seen_utc: DateTime<Utc>) -> Self {
        Self {
            version: SAVE_VERSION,
            last_seen_utc,
            pet,
        }
    }
}
