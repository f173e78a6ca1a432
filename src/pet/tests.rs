use super::*;
use crate::ingredient::Tier;

const SEED: u64 = 42;

fn hatched(rules: &Rules) -> Pet {
    let mut pet = Pet::new(rules, SEED);
    for _ in 0..rules.egg_taps_to_hatch {
        pet.tap_egg(rules);
    }
    assert_eq!(pet.stage(), LifeStage::Baby);
    pet.drain_events();
    pet
}

/// Tick one second at a time until `done` holds or `max` seconds pass.
fn run_until(
    pet: &mut Pet,
    rules: &Rules,
    max: u32,
    events: &mut Vec<PetEvent>,
    done: impl Fn(&Pet) -> bool,
) -> bool {
    for _ in 0..max {
        pet.update(1.0, rules);
        events.extend(pet.drain_events());
        if done(pet) {
            return true;
        }
    }
    false
}

/// Baby that never grows out of the stage and never starves.
fn sickly_rules() -> Rules {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 1.0e9;
    rules.hunger.decay_period.baby = 100.0;
    rules.hunger.death_threshold.baby = 1.0e9;
    rules.boredom.decay_period.baby = 1.0e6;
    rules
}

fn count(events: &[PetEvent], wanted: &PetEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

#[test]
fn test_egg_hatches_on_third_tap() {
    let rules = Rules::default();
    let mut pet = Pet::new(&rules, SEED);
    assert!(!pet.tap_egg(&rules));
    assert!(!pet.tap_egg(&rules));
    assert_eq!(pet.egg_taps(), 2);
    assert!(pet.tap_egg(&rules));
    assert_eq!(pet.stage(), LifeStage::Baby);
    assert_eq!(pet.drain_events(), vec![PetEvent::Evolved(LifeStage::Baby)]);
    assert!(!pet.tap_egg(&rules));
}

#[test]
fn test_egg_is_inert() {
    let rules = Rules::default();
    let mut pet = Pet::new(&rules, SEED);
    pet.update(100_000.0, &rules);
    assert_eq!(pet.stage(), LifeStage::Egg);
    assert_eq!(pet.hunger().stars(), 5);
    assert_eq!(pet.growth_points(), 0.0);
}

#[test]
fn test_feeding_an_egg_is_refused() {
    let rules = Rules::default();
    let mut pet = Pet::new(&rules, SEED);
    let err = pet.feed_with_ingredient(Ingredient::neutral(), &rules);
    assert_eq!(err, Err(FeedError::IsEgg));
    assert_eq!(err.unwrap_err().reason(), "is_egg");
    assert!(pet.play(BasePersonality::Geek, 100.0, &rules).is_empty());
}

#[test]
fn test_feeding_a_full_pet_changes_nothing() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    let before = pet.inventory().clone();

    let edgy = Ingredient::new(BasePersonality::Edgy, Tier::T1);
    let err = pet.feed_with_ingredient(edgy, &rules);

    assert_eq!(err, Err(FeedError::Full));
    assert_eq!(err.unwrap_err().reason(), "full");
    assert_eq!(pet.inventory(), &before);
    assert!(pet.memory().is_empty());
}

#[test]
fn test_feeding_consumes_and_remembers() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.update(540.0, &rules);
    assert_eq!(pet.hunger().stars(), 4);

    let edgy = Ingredient::new(BasePersonality::Edgy, Tier::T1);
    assert_eq!(pet.feed_with_ingredient(edgy, &rules), Ok(()));
    assert_eq!(pet.hunger().stars(), 5);
    assert_eq!(pet.inventory().quantity("edgy_t1"), 0);
    assert_eq!(pet.memory().len(), 1);
    assert!(pet.waste().time_until_poop() > 0.0);

    pet.update(540.0, &rules);
    let err = pet.feed_with_ingredient(edgy, &rules);
    assert_eq!(err, Err(FeedError::NoIngredient));
    assert_eq!(err.unwrap_err().reason(), "no_ingredient");
    assert_eq!(pet.hunger().stars(), 4);
    assert_eq!(pet.memory().len(), 1);
}

#[test]
fn test_neutral_food_is_free_and_forgettable() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.update(540.0, &rules);
    let before = pet.inventory().clone();

    assert_eq!(pet.feed_with_ingredient(Ingredient::neutral(), &rules), Ok(()));
    assert_eq!(pet.inventory(), &before);
    assert!(pet.memory().is_empty());
}

#[test]
fn test_neutral_food_is_worth_one_star_whatever_its_tier() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.update(3.0 * 540.0, &rules);
    assert_eq!(pet.hunger().stars(), 2);

    let odd = Ingredient {
        personality: BasePersonality::Neutral,
        tier: Tier::T3,
    };
    assert_eq!(pet.feed_with_ingredient(odd, &rules), Ok(()));
    assert_eq!(pet.hunger().stars(), 3);
}

#[test]
fn test_play_geek_75_grants_tier1_and_tier3() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);

    let rewards = pet.play(BasePersonality::Geek, 75.0, &rules);
    let tiers: Vec<Tier> = rewards.iter().map(|i| i.tier).collect();
    assert_eq!(tiers, vec![Tier::T1, Tier::T3]);
    assert!(rewards.iter().all(|i| i.personality == BasePersonality::Geek));

    assert_eq!(pet.inventory().quantity("geek_t1"), 2);
    assert_eq!(pet.inventory().quantity("geek_t2"), 0);
    assert_eq!(pet.inventory().quantity("geek_t3"), 1);
    // Boredom was already full.
    assert!(pet.memory().is_empty());
}

#[test]
fn test_play_when_bored_leaves_memory() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.update(540.0, &rules);
    assert_eq!(pet.boredom().stars(), 4);

    pet.play(BasePersonality::Sassy, 10.0, &rules);
    assert_eq!(pet.boredom().stars(), 5);
    assert_eq!(pet.memory().frequencies(), vec![(BasePersonality::Sassy, 1)]);
}

#[test]
fn test_empty_meters_slow_growth() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 1.0e9;
    rules.hunger.death_threshold.baby = 1.0e9;
    let mut pet = hatched(&rules);
    assert_eq!(pet.growth_multiplier(), 1.0);

    pet.update(2700.0, &rules);
    assert!(pet.hunger().is_empty());
    assert!(pet.boredom().is_empty());
    assert_eq!(pet.growth_multiplier(), 0.25);

    let before = pet.growth_points();
    pet.update(100.0, &rules);
    assert_eq!(pet.growth_points() - before, 25.0);
}

#[test]
fn test_coarse_steps_miscount_neglect_by_less_than_a_step() {
    let rules = Rules::default();
    let mut fine = hatched(&rules);
    let mut coarse = hatched(&rules);

    // Both meters empty at 2700s.
    for _ in 0..2760 {
        fine.update(1.0, &rules);
    }
    for _ in 0..46 {
        coarse.update(60.0, &rules);
    }
    assert!(fine.hunger().is_empty() && coarse.hunger().is_empty());

    let extra = coarse.neglected_time() - fine.neglected_time();
    assert!((0.0..60.0).contains(&extra), "extra neglect {extra}");
    let lost = fine.growth_points() - coarse.growth_points();
    assert!((0.0..60.0).contains(&lost), "lost growth {lost}");
}

#[test]
fn test_sustained_empty_meter_marks_neglect() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 20_000.0;
    rules.hunger.decay_period.baby = 1.0e6;
    let mut pet = hatched(&rules);
    let mut events = Vec::new();

    // Boredom empties at 2700s; neglect needs half of the growth threshold.
    let half = rules.neglect_threshold(LifeStage::Baby) as u32;
    run_until(&mut pet, &rules, 2700 + half - 10, &mut events, |_| false);
    assert!(pet.boredom().is_empty());
    assert!(!pet.was_neglected());

    run_until(&mut pet, &rules, 20, &mut events, |_| false);
    assert!(pet.was_neglected());
}

#[test]
fn test_hunger_death_without_oversight() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    let mut events = Vec::new();

    let dead = run_until(&mut pet, &rules, 4000, &mut events, |p| {
        p.stage() == LifeStage::Dead
    });
    assert!(dead);
    assert_eq!(count(&events, &PetEvent::Died), 1);
    assert!(!pet.is_alive());

    pet.update(1000.0, &rules);
    assert!(pet.drain_events().is_empty());
}

#[test]
fn test_hunger_death_under_oversight_escalates_once() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.activate_oversight();
    let mut events = Vec::new();

    run_until(&mut pet, &rules, 6000, &mut events, |_| false);

    let escalation = PetEvent::OversightEscalation(EscalationReason::HungerDeath);
    assert_eq!(count(&events, &escalation), 1);
    assert_eq!(count(&events, &PetEvent::Died), 0);
    assert_eq!(pet.stage(), LifeStage::Baby);
    assert!(pet.oversight().is_escalated());
    assert!(!pet.is_alive());

    assert!(pet.reset_after_escalation(&rules));
    assert_eq!(pet.stage(), LifeStage::Egg);
    assert!(!pet.oversight().is_activated());
}

#[test]
fn test_uncleaned_waste_makes_pet_ill_then_kills() {
    let rules = sickly_rules();
    let mut pet = hatched(&rules);
    let mut events = Vec::new();

    pet.update(100.0, &rules);
    assert_eq!(pet.feed_with_ingredient(Ingredient::neutral(), &rules), Ok(()));

    let ill = run_until(&mut pet, &rules, 4000, &mut events, |p| {
        p.illness().is_currently_ill()
    });
    assert!(ill);
    assert!(pet.waste().has_pooped_now());
    assert!(pet.was_neglected());
    assert_eq!(pet.oversight().illness_count(), 1);
    assert_eq!(pet.illness().onset_stage(), LifeStage::Baby);

    let dead = run_until(&mut pet, &rules, 700, &mut events, |p| {
        p.stage() == LifeStage::Dead
    });
    assert!(dead);
    assert_eq!(count(&events, &PetEvent::Died), 1);
}

#[test]
fn test_second_illness_under_oversight_is_game_over() {
    let rules = sickly_rules();
    let mut pet = hatched(&rules);
    pet.activate_oversight();
    let mut events = Vec::new();

    pet.update(100.0, &rules);
    pet.feed_with_ingredient(Ingredient::neutral(), &rules).unwrap();
    assert!(run_until(&mut pet, &rules, 4000, &mut events, |p| {
        p.illness().is_currently_ill()
    }));
    pet.cure();
    pet.clean_waste();

    pet.feed_with_ingredient(Ingredient::neutral(), &rules).unwrap();
    let over = run_until(&mut pet, &rules, 4000, &mut events, |p| {
        p.oversight().is_escalated()
    });
    assert!(over);
    let escalation = PetEvent::OversightEscalation(EscalationReason::SecondIllness);
    assert_eq!(count(&events, &escalation), 1);
    assert!(!pet.illness().is_currently_ill());
    assert_eq!(pet.stage(), LifeStage::Baby);
}

#[test]
fn test_illness_death_under_oversight_calls_ambulance() {
    let rules = sickly_rules();
    let mut pet = hatched(&rules);
    pet.activate_oversight();
    let mut events = Vec::new();

    pet.update(100.0, &rules);
    pet.feed_with_ingredient(Ingredient::neutral(), &rules).unwrap();
    assert!(run_until(&mut pet, &rules, 4000, &mut events, |p| {
        p.illness().is_currently_ill()
    }));

    run_until(&mut pet, &rules, 700, &mut events, |_| false);
    assert_eq!(count(&events, &PetEvent::AmbulanceTrigger), 1);
    assert!(!pet.illness().is_currently_ill());
    assert!(!pet.waste().has_pooped_now());
    assert_eq!(pet.stage(), LifeStage::Baby);
    assert!(!pet.oversight().is_escalated());
}

#[test]
fn test_evolution_takes_memory_and_keeps_stars() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 200.0;
    rules.boredom.decay_period.baby = 100.0;
    let mut pet = hatched(&rules);

    pet.update(100.0, &rules);
    assert_eq!(pet.boredom().stars(), 4);
    pet.play(BasePersonality::Sassy, 0.0, &rules);

    pet.update(100.0, &rules);
    assert_eq!(pet.stage(), LifeStage::Child);
    assert_eq!(
        pet.personality(),
        Some(&Personality::Base(BasePersonality::Sassy))
    );
    assert!(pet.memory().is_empty());
    assert_eq!(pet.growth_points(), 0.0);
    assert_eq!(pet.boredom().stars(), 4);
    assert_eq!(
        pet.boredom().time_to_next_level(),
        rules.boredom.decay_period.child
    );
    assert!(pet
        .drain_events()
        .contains(&PetEvent::Evolved(LifeStage::Child)));
}

#[test]
fn test_no_memories_evolves_to_potato() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 10.0;
    let mut pet = hatched(&rules);
    pet.update(10.0, &rules);
    assert_eq!(pet.stage(), LifeStage::Child);
    assert_eq!(
        pet.personality().map(Personality::name),
        Some(evolution::NO_MEMORY)
    );
}

#[test]
fn test_neglected_baby_evolves_to_neglect_line() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 100.0;
    rules.boredom.decay_period.baby = 1.0;
    let mut pet = hatched(&rules);
    let mut events = Vec::new();

    assert!(run_until(&mut pet, &rules, 500, &mut events, |p| {
        p.stage() == LifeStage::Child
    }));
    assert!(pet.personality().is_some_and(Personality::is_neglected));
    assert!(!pet.was_neglected());
    assert_eq!(pet.neglected_time(), 0.0);
}

#[test]
fn test_attention_demand_grants_growth_bonus() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 10_000.0;
    rules.hunger.decay_period.baby = 1.0e6;
    rules.boredom.decay_period.baby = 1.0e6;
    let mut pet = hatched(&rules);
    let mut events = Vec::new();

    assert!(!pet.answer_attention_demand(&rules));
    assert!(run_until(&mut pet, &rules, 700, &mut events, |p| {
        p.attention().is_demanding()
    }));
    assert_eq!(count(&events, &PetEvent::AttentionDemanded), 1);

    let before = pet.growth_points();
    assert!(pet.answer_attention_demand(&rules));
    assert_eq!(pet.growth_points() - before, 500.0);
    assert!(!pet.attention().is_demanding());
}

#[test]
fn test_full_life_then_ascend() {
    let mut rules = Rules::default();
    rules.growth_threshold = crate::stage::StageTable::new(0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0);
    let mut pet = hatched(&rules);
    for _ in 0..4 {
        pet.update(10.0, &rules);
    }
    assert_eq!(pet.stage(), LifeStage::ReadyToAscend);
    assert_eq!(pet.growth_progress(&rules), 1.0);

    let stock = pet.inventory().clone();
    assert!(!pet.revive(&rules));
    assert!(pet.ascend(&rules));
    assert_eq!(pet.stage(), LifeStage::Egg);
    assert_eq!(pet.personality(), None);
    assert_eq!(pet.inventory(), &stock);
}

#[test]
fn test_revive_returns_to_egg() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.update(3400.0, &rules);
    assert_eq!(pet.stage(), LifeStage::Dead);
    assert_eq!(pet.sprite_key(), "dead");

    assert!(pet.revive(&rules));
    assert_eq!(pet.stage(), LifeStage::Egg);
    assert_eq!(pet.hunger().stars(), 5);
    assert!(!pet.illness().is_currently_ill());
}

#[test]
fn test_decorating_leaves_memory_when_alive() {
    let rules = Rules::default();
    let mut pet = Pet::new(&rules, SEED);
    pet.decorate(Room::Themed(BasePersonality::Edgy));
    assert!(pet.memory().is_empty());

    let mut pet = hatched(&rules);
    pet.decorate(Room::Themed(BasePersonality::Edgy));
    pet.decorate(Room::Themed(BasePersonality::Edgy));
    pet.decorate(Room::Basic);
    assert_eq!(pet.memory().len(), 1);
    assert_eq!(pet.room(), Room::Basic);
}

#[test]
fn test_snapshot_restores_state() {
    let rules = Rules::default();
    let mut pet = hatched(&rules);
    pet.update(600.0, &rules);
    pet.play(BasePersonality::Geek, 50.0, &rules);
    pet.activate_oversight();

    let json = serde_json::to_string(&pet.to_snapshot()).unwrap();
    let snap: PetSnapshot = serde_json::from_str(&json).unwrap();
    let restored = Pet::from_snapshot(snap.clone(), &rules, SEED);

    assert_eq!(restored.to_snapshot(), snap);
    assert_eq!(restored.stage(), LifeStage::Baby);
    assert_eq!(restored.boredom().stars(), pet.boredom().stars());
    assert_eq!(restored.inventory().quantity("geek_t2"), 1);
    assert!(restored.oversight().is_activated());
}

#[test]
fn test_loading_a_starving_pet_keeps_it_alive() {
    let rules = Rules::default();
    let json = r#"{"stage": "Young", "hunger": {"stars": 0, "timeToNextLevel": 2160.0}}"#;
    let snap: PetSnapshot = serde_json::from_str(json).unwrap();
    let mut pet = Pet::from_snapshot(snap, &rules, SEED);
    assert_eq!(pet.hunger().time_until_death(), Some(7200.0));

    pet.update(1.0, &rules);
    assert_eq!(pet.stage(), LifeStage::Young);
    assert!(pet.is_alive());
    assert_eq!(pet.hunger().time_until_death(), Some(7199.0));
    assert_eq!(pet.boredom().stars(), 5);
}

#[test]
fn test_sprite_key_follows_personality() {
    let mut rules = Rules::default();
    rules.growth_threshold.baby = 10.0;
    let mut pet = Pet::new(&rules, SEED);
    assert_eq!(pet.sprite_key(), "egg");
    for _ in 0..3 {
        pet.tap_egg(&rules);
    }
    assert_eq!(pet.sprite_key(), "neutral");
    pet.update(10.0, &rules);
    assert_eq!(pet.sprite_key(), "neutral");
}
