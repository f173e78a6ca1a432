//! The pet aggregate: owns every need, timer and sub-state, and advances
//! them together in [`Pet::update`].

mod attention;
mod oversight;

pub use attention::{AttentionDemand, DemandChange};
pub use oversight::{EscalationReason, Oversight, WatchReason};

use crate::error::FeedError;
use crate::evolution;
use crate::illness::Illness;
use crate::ingredient::{minigame_rewards, Ingredient};
use crate::inventory::Inventory;
use crate::memory::{MemoryKind, MemoryLedger};
use crate::meter::NeedMeter;
use crate::personality::{BasePersonality, Personality};
use crate::room::Room;
use crate::rules::Rules;
use crate::snapshot::PetSnapshot;
use crate::stage::LifeStage;
use crate::waste::Waste;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Things the host may want to react to. Drained with [`Pet::drain_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum PetEvent {
    Evolved(LifeStage),
    Died,
    /// Growth progress through the current stage, 0..=1.
    Grew(f64),
    OversightEscalation(EscalationReason),
    AmbulanceTrigger,
    /// Oversight started watching for the first time since activation.
    FirstWarning,
    AttentionDemanded,
}

#[derive(Clone, Debug)]
pub struct Pet {
    stage: LifeStage,
    growth_points: f64,
    hunger: NeedMeter,
    boredom: NeedMeter,
    illness: Illness,
    waste: Waste,
    personality: Option<Personality>,
    memory: MemoryLedger,
    inventory: Inventory,
    neglected_time: f64,
    was_neglected: bool,
    oversight: Oversight,
    attention: AttentionDemand,
    egg_taps: u32,
    room: Room,
    last_growth_pct: Option<u32>,
    events: Vec<PetEvent>,
    rng: StdRng,
}

impl Pet {
    pub fn new(rules: &Rules, seed: u64) -> Self {
        Self {
            stage: LifeStage::Egg,
            growth_points: 0.0,
            hunger: NeedMeter::new(LifeStage::Egg, &rules.hunger),
            boredom: NeedMeter::new(LifeStage::Egg, &rules.boredom),
            illness: Illness::default(),
            waste: Waste::default(),
            personality: None,
            memory: MemoryLedger::default(),
            inventory: Inventory::default(),
            neglected_time: 0.0,
            was_neglected: false,
            oversight: Oversight::default(),
            attention: AttentionDemand::default(),
            egg_taps: 0,
            room: Room::default(),
            last_growth_pct: None,
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Neglect and growth are charged for the whole `dt` at the star counts
    /// reached at its end. When a meter empties partway through, one call
    /// can over-count neglect (and under-count growth) by at most the part
    /// of `dt` before the meter emptied, so callers should keep steps short.
    /// Catch-up replays in `catchup_step_secs` chunks for this reason.
    pub fn update(&mut self, dt: f64, rules: &Rules) {
        if self.stage.is_inert() || self.oversight.is_escalated() {
            return;
        }
        let dt = dt.max(0.0);
        let stage = self.stage;

        self.hunger.update(dt, stage, &rules.hunger);
        self.boredom.update(dt, stage, &rules.boredom);
        self.illness.update(dt);
        self.waste.update(dt);

        if self.hunger.is_empty() || self.boredom.is_empty() {
            self.neglected_time += dt;
            if !self.was_neglected && self.neglected_time >= rules.neglect_threshold(stage) {
                info!(%stage, neglected_for = self.neglected_time, "pet marked neglected");
                self.was_neglected = true;
            }
        }

        self.growth_points += dt * self.growth_multiplier();
        self.note_growth(rules);

        if self.should_evolve(rules) {
            self.evolve(rules);
        }

        if self.resolve_health(rules) {
            return;
        }

        let waste = self.waste.has_pooped_now();
        if self.oversight.observe(
            self.hunger.stars(),
            self.boredom.stars(),
            waste,
            &rules.oversight,
            &mut self.rng,
        ) && self.oversight.mark_warned()
        {
            self.events.push(PetEvent::FirstWarning);
        }

        let satisfied = self.hunger.is_full() && self.boredom.is_full();
        match self.attention.update(dt, satisfied, &rules.demand) {
            DemandChange::Started => {
                debug!("attention demanded");
                self.events.push(PetEvent::AttentionDemanded);
            }
            DemandChange::Expired => debug!("attention demand went unanswered"),
            DemandChange::Cancelled => debug!("attention demand cancelled"),
            DemandChange::None => {}
        }
    }

    /// 1.0 nominal, halved for each empty meter.
    pub fn growth_multiplier(&self) -> f64 {
        let mut m = 1.0;
        if self.hunger.is_empty() {
            m *= 0.5;
        }
        if self.boredom.is_empty() {
            m *= 0.5;
        }
        m
    }

    /// Progress through the current stage, 0..=1.
    pub fn growth_progress(&self, rules: &Rules) -> f64 {
        if self.stage >= LifeStage::ReadyToAscend {
            return 1.0;
        }
        let threshold = rules.growth_threshold(self.stage);
        if threshold <= 0.0 {
            return 0.0;
        }
        (self.growth_points / threshold).min(1.0)
    }

    fn note_growth(&mut self, rules: &Rules) {
        let progress = self.growth_progress(rules);
        let pct = (progress * 100.0).floor() as u32;
        if self.last_growth_pct != Some(pct) {
            self.last_growth_pct = Some(pct);
            self.events.push(PetEvent::Grew(progress));
        }
    }

    fn should_evolve(&self, rules: &Rules) -> bool {
        self.stage < LifeStage::ReadyToAscend
            && !self.stage.is_inert()
            && self.growth_points >= rules.growth_threshold(self.stage)
    }

    fn evolve(&mut self, rules: &Rules) {
        let from = self.stage;
        let Some(to) = from.next() else {
            return;
        };

        // Final names stick through Adult -> ReadyToAscend.
        if from < LifeStage::Adult {
            let dominant = self.memory.select_dominant(&mut self.rng);
            let next = evolution::next_personality(
                from,
                self.personality.as_ref(),
                dominant,
                self.was_neglected,
            );
            info!(
                %from,
                %to,
                dominant = ?dominant,
                neglected = self.was_neglected,
                personality = %next,
                "evolved"
            );
            self.personality = Some(next);
        } else {
            info!(%from, %to, "evolved");
        }

        self.stage = to;
        self.growth_points = 0.0;
        self.memory.forget_all();
        self.was_neglected = false;
        self.neglected_time = 0.0;
        self.hunger.on_stage_change(to, &rules.hunger);
        self.boredom.on_stage_change(to, &rules.boredom);
        self.last_growth_pct = None;
        self.events.push(PetEvent::Evolved(to));
    }

    /// Illness onset and death checks. `true` when the tick must stop.
    fn resolve_health(&mut self, rules: &Rules) -> bool {
        if self.waste.should_trigger_illness(&rules.waste) && !self.illness.is_currently_ill() {
            let count = self.oversight.record_illness();
            if self.oversight.is_activated() && count >= rules.oversight.illness_game_over_count {
                self.escalate(EscalationReason::SecondIllness);
                return true;
            }
            warn!(stage = %self.stage, count, "pet fell ill");
            self.illness.get_ill(self.stage);
            self.was_neglected = true;
        }

        if self.hunger.is_dying() {
            if self.oversight.is_activated() {
                self.escalate(EscalationReason::HungerDeath);
            } else {
                warn!(stage = %self.stage, "died of hunger");
                self.die();
            }
            return true;
        }

        if self.illness.is_dying(&rules.illness_death) {
            if self.oversight.is_activated() {
                // The ambulance takes the pet in: cured, and the mess goes too
                // so the illness does not retrigger next tick.
                info!("ambulance cured the pet");
                self.illness.cure();
                self.waste.clean();
                self.events.push(PetEvent::AmbulanceTrigger);
                return false;
            }
            warn!(stage = %self.stage, "died of illness");
            self.die();
            return true;
        }

        false
    }

    fn escalate(&mut self, reason: EscalationReason) {
        if self.oversight.escalate(reason) {
            self.events.push(PetEvent::OversightEscalation(reason));
        }
    }

    fn die(&mut self) {
        self.stage = LifeStage::Dead;
        self.attention = AttentionDemand::default();
        self.events.push(PetEvent::Died);
    }

    pub fn feed_with_ingredient(
        &mut self,
        ingredient: Ingredient,
        rules: &Rules,
    ) -> Result<(), FeedError> {
        if self.stage == LifeStage::Egg {
            debug!("refused feed: egg");
            return Err(FeedError::IsEgg);
        }
        let was_full = self.hunger.is_full();
        if was_full {
            debug!("refused feed: full");
            return Err(FeedError::Full);
        }
        if !ingredient.is_neutral() && !self.inventory.consume(&ingredient.identifier()) {
            debug!(id = %ingredient, "refused feed: none left");
            return Err(FeedError::NoIngredient);
        }

        let stars = ingredient.satiation_stars();
        self.hunger.satiate(stars);
        if !was_full && !ingredient.is_neutral() {
            self.memory.add(MemoryKind::Food, ingredient.personality);
        }
        self.waste
            .schedule_after_feeding(self.stage, &rules.waste, &mut self.rng);

        info!(id = %ingredient, stars, hunger = self.hunger.stars(), "fed");
        Ok(())
    }

    /// Entertain after a minigame. Returns the ingredients won, already
    /// added to the inventory; empty for an egg.
    pub fn play(&mut self, tag: BasePersonality, score: f64, rules: &Rules) -> Vec<Ingredient> {
        if self.stage == LifeStage::Egg {
            debug!("refused play: egg");
            return Vec::new();
        }

        let was_full = self.boredom.is_full();
        self.boredom.entertain(rules.play_entertain_stars);
        if !was_full && !tag.is_neutral() {
            self.memory.add(MemoryKind::Minigame, tag);
        }

        let rewards = minigame_rewards(tag, score, &rules.rewards);
        for r in &rewards {
            self.inventory.add(*r, 1);
        }
        info!(%tag, score, rewards = rewards.len(), "played");
        rewards
    }

    /// Tap the egg. Returns `true` on the tap that hatches it.
    pub fn tap_egg(&mut self, rules: &Rules) -> bool {
        if self.stage != LifeStage::Egg {
            return false;
        }
        self.egg_taps += 1;
        if self.egg_taps < rules.egg_taps_to_hatch {
            debug!(taps = self.egg_taps, "egg tapped");
            return false;
        }

        self.egg_taps = 0;
        self.stage = LifeStage::Baby;
        self.growth_points = 0.0;
        self.hunger.on_stage_change(LifeStage::Baby, &rules.hunger);
        self.boredom.on_stage_change(LifeStage::Baby, &rules.boredom);
        self.oversight.prime(
            self.hunger.stars(),
            self.boredom.stars(),
            self.waste.has_pooped_now(),
        );
        self.last_growth_pct = None;
        info!("egg hatched");
        self.events.push(PetEvent::Evolved(LifeStage::Baby));
        true
    }

    pub fn cure(&mut self) {
        if self.illness.is_currently_ill() {
            info!("cured");
        }
        self.illness.cure();
    }

    pub fn clean_waste(&mut self) {
        if self.waste.has_pooped_now() {
            info!("cleaned");
        }
        self.waste.clean();
    }

    /// Service an open attention demand for a growth bonus.
    pub fn answer_attention_demand(&mut self, rules: &Rules) -> bool {
        if !self.attention.answer() {
            return false;
        }
        let bonus = rules.growth_threshold(self.stage) * rules.demand.growth_bonus_fraction;
        self.growth_points += bonus;
        info!(bonus, "attention answered");
        true
    }

    pub fn activate_oversight(&mut self) {
        self.oversight.activate(
            self.hunger.stars(),
            self.boredom.stars(),
            self.waste.has_pooped_now(),
        );
    }

    pub fn decorate(&mut self, room: Room) {
        if room == self.room {
            return;
        }
        self.room = room;
        if let Some(theme) = room.theme() {
            if !self.stage.is_inert() {
                self.memory.add(MemoryKind::Decoration, theme);
            }
        }
        info!(%room, "room changed");
    }

    pub fn revive(&mut self, rules: &Rules) -> bool {
        if self.stage != LifeStage::Dead {
            return false;
        }
        info!("revived");
        self.restart(rules);
        true
    }

    pub fn ascend(&mut self, rules: &Rules) -> bool {
        if self.stage != LifeStage::ReadyToAscend {
            return false;
        }
        info!(personality = ?self.personality, "ascended");
        self.restart(rules);
        true
    }

    pub fn reset_after_escalation(&mut self, rules: &Rules) -> bool {
        if !self.oversight.is_escalated() {
            return false;
        }
        info!("restarting after oversight escalation");
        self.restart(rules);
        true
    }

    /// Back to a fresh egg. Inventory and room carry over.
    fn restart(&mut self, rules: &Rules) {
        self.stage = LifeStage::Egg;
        self.growth_points = 0.0;
        self.hunger.reset(LifeStage::Egg, &rules.hunger);
        self.boredom.reset(LifeStage::Egg, &rules.boredom);
        self.illness = Illness::default();
        self.waste.reset();
        self.personality = None;
        self.memory.forget_all();
        self.neglected_time = 0.0;
        self.was_neglected = false;
        self.oversight = Oversight::default();
        self.attention = AttentionDemand::default();
        self.egg_taps = 0;
        self.last_growth_pct = None;
    }

    pub fn drain_events(&mut self) -> Vec<PetEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn stage(&self) -> LifeStage {
        self.stage
    }

    pub fn is_alive(&self) -> bool {
        self.stage != LifeStage::Dead && !self.oversight.is_escalated()
    }

    pub fn growth_points(&self) -> f64 {
        self.growth_points
    }

    pub fn hunger(&self) -> &NeedMeter {
        &self.hunger
    }

    pub fn boredom(&self) -> &NeedMeter {
        &self.boredom
    }

    pub fn illness(&self) -> &Illness {
        &self.illness
    }

    pub fn waste(&self) -> &Waste {
        &self.waste
    }

    pub fn personality(&self) -> Option<&Personality> {
        self.personality.as_ref()
    }

    pub fn memory(&self) -> &MemoryLedger {
        &self.memory
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn neglected_time(&self) -> f64 {
        self.neglected_time
    }

    pub fn was_neglected(&self) -> bool {
        self.was_neglected
    }

    pub fn oversight(&self) -> &Oversight {
        &self.oversight
    }

    pub fn attention(&self) -> &AttentionDemand {
        &self.attention
    }

    pub fn egg_taps(&self) -> u32 {
        self.egg_taps
    }

    pub fn room(&self) -> Room {
        self.room
    }

    /// Sprite lookup key for the current look.
    pub fn sprite_key(&self) -> String {
        match self.stage {
            LifeStage::Egg => "egg".to_string(),
            LifeStage::Dead => "dead".to_string(),
            _ => match &self.personality {
                Some(p) => evolution::sprite_key_for(p.name()),
                None => BasePersonality::Neutral.as_str().to_string(),
            },
        }
    }

    pub fn to_snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            stage: self.stage,
            growth_points: self.growth_points,
            hunger: self.hunger.clone(),
            boredom: self.boredom.clone(),
            illness: self.illness.clone(),
            waste: self.waste.clone(),
            personality: self.personality.clone(),
            memories: self.memory.clone(),
            inventory: self.inventory.clone(),
            neglected_time: self.neglected_time,
            was_neglected: self.was_neglected,
            oversight: self.oversight.clone(),
            attention: self.attention.clone(),
            egg_taps: self.egg_taps,
            current_room: self.room,
        }
    }

    /// Rebuild from a snapshot. Out-of-range values are clamped.
    pub fn from_snapshot(snap: PetSnapshot, rules: &Rules, seed: u64) -> Self {
        let mut hunger = snap.hunger;
        let mut boredom = snap.boredom;
        hunger.clamp_loaded(snap.stage, &rules.hunger);
        boredom.clamp_loaded(snap.stage, &rules.boredom);

        Self {
            stage: snap.stage,
            growth_points: snap.growth_points.max(0.0),
            hunger,
            boredom,
            illness: snap.illness,
            waste: snap.waste,
            personality: snap.personality,
            memory: snap.memories,
            inventory: snap.inventory,
            neglected_time: snap.neglected_time.max(0.0),
            was_neglected: snap.was_neglected,
            oversight: snap.oversight,
            attention: snap.attention,
            egg_taps: snap.egg_taps,
            room: snap.current_room,
            last_growth_pct: None,
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(test)]
mod tests;
