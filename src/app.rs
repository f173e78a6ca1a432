use crate::input::{collect_input_nonblocking, map_event_to_action, Action};
use crate::render::{draw_pet_ascii, draw_text, ui_overlay, Cell, Terminal};
use chrono::{Local, Utc};
use crossterm::style::Color;
use mochigotchi::config::{load_settings, save_settings_atomic, Paths, Settings};
use mochigotchi::ingredient::{Ingredient, Tier};
use mochigotchi::notify::Alerts;
use mochigotchi::personality::BasePersonality;
use mochigotchi::pet::EscalationReason;
use mochigotchi::sim::{catch_up, live_tick, CatchupSummary};
use mochigotchi::storage::{load_or_init_save, save_atomic};
use mochigotchi::{LifeStage, Pet, PetEvent, Rules};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::{max, min};
use std::time::{Duration, Instant};
use tracing::info;

const STATUS_SECS: u64 = 6;
const HINT: &str =
    "f feed | 1-5 treats | a/e/g/s/i/p play | c clean | m medicine | space tap | h help | q quit";

#[derive(Clone, Debug)]
enum Scene {
    Main,
    Help,
    Recap(CatchupSummary),
    Dead,
    Escalated(EscalationReason),
}

pub(crate) struct App {
    settings: Settings,
    rules: Rules,
    pet: Pet,
    alerts: Alerts,
    scene: Scene,
    paths: Paths,
    term: Terminal,
    rng: StdRng,
    status: Option<(String, Instant)>,
    should_quit: bool,
    autosave_at: Instant,
}

impl App {
    fn init(paths: Paths) -> anyhow::Result<Self> {
        let mut settings = load_settings(&paths.settings_path);
        let rules = Rules::default();

        let (mut pet, loaded_last_seen) =
            load_or_init_save(&paths.save_path, &rules, settings.seed);

        let mut scene = Scene::Main;
        if let Some(last_seen) = loaded_last_seen {
            let summary = catch_up(&mut pet, last_seen, Utc::now(), settings.time_mode, &rules);
            if summary.has_anything() {
                scene = Scene::Recap(summary);
            }
        }
        if let Some(reason) = pet.oversight().escalation() {
            scene = Scene::Escalated(reason);
        } else if pet.stage() == LifeStage::Dead && !matches!(scene, Scene::Recap(_)) {
            scene = Scene::Dead;
        }

        // First run: keep the default bedtime and show the rules.
        if !settings.has_completed_initial_setup {
            let (sleep, wake) = (settings.sleep.sleep_hour(), settings.sleep.wake_hour());
            settings.complete_initial_setup(sleep, wake, true)?;
            if matches!(scene, Scene::Main) {
                scene = Scene::Help;
            }
        }

        let mut alerts = Alerts::default();
        alerts.prime(&pet);

        let term = Terminal::begin()?;

        Ok(Self {
            settings,
            rules,
            pet,
            alerts,
            scene,
            paths,
            term,
            rng: StdRng::from_entropy(),
            status: None,
            should_quit: false,
            autosave_at: Instant::now() + Duration::from_secs(10),
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let sim_step = Duration::from_secs_f64(self.rules.tick_step_secs.max(0.05));

        let mut last_frame = Instant::now();
        let mut sim_accum = Duration::ZERO;

        while !self.should_quit {
            self.term.resize_if_needed()?;

            // input
            let overlay_open = !matches!(self.scene, Scene::Main);
            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(overlay_open, ev) {
                    self.apply(action);
                }
                if self.should_quit {
                    break;
                }
            }

            // sim fixed-step
            let now = Instant::now();
            let real_dt = now.saturating_duration_since(last_frame);
            last_frame = now;
            sim_accum = sim_accum.saturating_add(real_dt);

            while sim_accum >= sim_step {
                self.tick();
                sim_accum = sim_accum.saturating_sub(sim_step);
            }

            self.render_frame()?;

            if Instant::now() >= self.autosave_at {
                self.save_now()?;
                self.autosave_at = Instant::now() + Duration::from_secs(10);
            }

            spin_sleep(frame_dt, Instant::now());
        }

        self.save_now()?;
        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    /// One fixed step of wall time, stretched by the time mode.
    fn tick(&mut self) {
        let dt = self.rules.tick_step_secs * self.settings.time_mode.multiplier();
        self.settings.sleep.time_pass(&Local::now());
        live_tick(&mut self.pet, dt, &self.settings.sleep, &self.rules);

        for event in self.pet.drain_events() {
            self.on_pet_event(event);
        }

        let raised = self.alerts.check(
            &self.pet,
            &self.rules,
            &self.settings.notifications,
            Utc::now(),
        );
        if let Some(kind) = raised.last() {
            self.set_status(kind.message());
        }
    }

    fn on_pet_event(&mut self, event: PetEvent) {
        match event {
            PetEvent::Evolved(stage) => {
                let who = self
                    .pet
                    .personality()
                    .map(|p| p.name().to_string())
                    .unwrap_or_default();
                self.set_status(format!("Your pet grew into a {stage}! {who}"));
            }
            PetEvent::Died => self.scene = Scene::Dead,
            PetEvent::OversightEscalation(reason) => self.scene = Scene::Escalated(reason),
            PetEvent::AmbulanceTrigger => {
                self.set_status("An ambulance took your pet to the vet. That was close.")
            }
            PetEvent::FirstWarning => {
                self.set_status("Someone is keeping an eye on how you treat your pet...")
            }
            PetEvent::AttentionDemanded => self.set_status("Your pet wants attention! (space)"),
            PetEvent::Grew(_) => {}
        }
    }

    fn apply(&mut self, action: Action) {
        self.settings.sleep.refresh_temporary_wake_up(Utc::now());
        match action {
            Action::Quit => self.should_quit = true,
            Action::HelpToggle => {
                if matches!(self.scene, Scene::Help) {
                    self.close_overlay();
                } else {
                    self.scene = Scene::Help;
                }
            }
            Action::Back => self.close_overlay(),
            Action::FeedNeutral => self.feed(Ingredient::neutral()),
            Action::FeedFlavored(tag) => {
                let best = [Tier::T3, Tier::T2, Tier::T1]
                    .into_iter()
                    .map(|tier| Ingredient::new(tag, tier))
                    .find(|i| self.pet.inventory().has(&i.identifier()));
                match best {
                    Some(ingredient) => self.feed(ingredient),
                    None => self.set_status(format!("No {tag} food left. Play to earn some.")),
                }
            }
            Action::Play(tag) => self.play(tag),
            Action::PlayAny => {
                let idx = self.rng.gen_range(0..BasePersonality::FLAVORED.len());
                self.play(BasePersonality::FLAVORED[idx]);
            }
            Action::Clean => {
                if self.pet.waste().has_pooped_now() {
                    self.pet.clean_waste();
                    self.set_status("All clean.");
                } else {
                    self.set_status("Nothing to clean.");
                }
            }
            Action::Medicine => {
                if self.pet.illness().is_currently_ill() {
                    self.pet.cure();
                    self.set_status("Medicine given. Feeling better!");
                } else {
                    self.set_status("Your pet is not ill.");
                }
            }
            Action::Poke => {
                if self.pet.stage() == LifeStage::Egg {
                    if self.pet.tap_egg(&self.rules) {
                        self.set_status("The egg hatched!");
                    } else {
                        self.set_status("Tap tap...");
                    }
                } else if self.pet.answer_attention_demand(&self.rules) {
                    self.set_status("Your pet loved the attention.");
                }
            }
            Action::Restart => self.restart(),
            Action::CycleTimeMode => {
                self.settings.time_mode = self.settings.time_mode.next();
                info!(mode = %self.settings.time_mode, "time mode changed");
                self.set_status(format!("Speed {}", self.settings.time_mode));
            }
            Action::ToggleLights => self.settings.sleep.toggle_lights(),
            Action::WakeUp => {
                if self.settings.sleep.is_sleeping() {
                    self.settings.sleep.wake_up(Utc::now());
                    self.set_status("Rise and shine.");
                }
            }
            Action::CycleRoom => {
                let room = self.pet.room().cycle();
                self.pet.decorate(room);
                self.set_status(format!("Moved to the {room} room."));
            }
            Action::ActivateOversight => {
                if !self.pet.oversight().is_activated() {
                    self.pet.activate_oversight();
                    self.set_status("Oversight activated. Neglect now has consequences.");
                }
            }
            Action::ToggleNotifications => {
                let on = !self.settings.notifications.all_enabled;
                self.settings.notifications.set_all(on);
                self.set_status(if on {
                    "Notifications on."
                } else {
                    "Notifications off."
                });
            }
        }
    }

    fn feed(&mut self, ingredient: Ingredient) {
        match self.pet.feed_with_ingredient(ingredient, &self.rules) {
            Ok(()) => self.set_status(format!("Ate {}.", ingredient.display_name())),
            Err(e) => self.set_status(format!("Can't feed: {e}.")),
        }
    }

    fn play(&mut self, tag: BasePersonality) {
        let score: f64 = self.rng.gen_range(0.0..100.0);
        let rewards = self.pet.play(tag, score, &self.rules);
        if rewards.is_empty() {
            self.set_status("Eggs don't play.");
            return;
        }
        let won: Vec<String> = rewards.iter().map(|r| r.display_name()).collect();
        self.set_status(format!("Scored {score:.0}! Won {}.", won.join(", ")));
    }

    fn restart(&mut self) {
        let restarted = self.pet.revive(&self.rules)
            || self.pet.ascend(&self.rules)
            || self.pet.reset_after_escalation(&self.rules);
        if restarted {
            self.alerts.prime(&self.pet);
            self.scene = Scene::Main;
            self.set_status("A new egg appears. Tap it with space.");
        }
    }

    /// Recap and help simply close. Death and escalation stay until restart.
    fn close_overlay(&mut self) {
        if matches!(self.scene, Scene::Help | Scene::Recap(_)) {
            self.scene = if let Some(reason) = self.pet.oversight().escalation() {
                Scene::Escalated(reason)
            } else if self.pet.stage() == LifeStage::Dead {
                Scene::Dead
            } else {
                Scene::Main
            };
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now() + Duration::from_secs(STATUS_SECS)));
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        self.term.cur.clear(Color::Black);

        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;
        let panel_w_cells = min(max(44, cols / 2), cols - 10);
        let pet_w_cells = cols - panel_w_cells;
        let cx = panel_w_cells + pet_w_cells / 2;
        let cy = rows / 2;
        let sleeping = self.settings.sleep.is_sleeping() || !self.settings.sleep.lights_on();
        draw_pet_ascii(&mut self.term.cur, &self.pet, sleeping, cx, cy);

        if self.status.as_ref().is_some_and(|(_, until)| Instant::now() >= *until) {
            self.status = None;
        }
        let status = self.status.as_ref().map(|(s, _)| s.as_str()).unwrap_or("");
        let hint = match self.scene {
            Scene::Main => HINT,
            Scene::Help => "Help: esc or h to close | q quit",
            Scene::Recap(_) => "Recap: any key to continue",
            Scene::Dead | Scene::Escalated(_) => "r start over | q quit",
        };
        ui_overlay(
            &mut self.term.cur,
            &self.pet,
            &self.rules,
            &self.settings,
            status,
            hint,
        );

        match self.scene.clone() {
            Scene::Main => {}
            Scene::Recap(s) => {
                let mut body = format!(
                    "{:.1} hours passed for your pet.\nLowest hunger: {} stars\nLowest fun: {} stars\n",
                    s.simulated_secs / 3600.0,
                    s.hunger_min,
                    s.boredom_min
                );
                if let Some(stage) = s.evolved_to {
                    body.push_str(&format!("It grew into a {stage}.\n"));
                }
                if s.became_ill {
                    body.push_str("It fell ill.\n");
                }
                if s.ambulance {
                    body.push_str("An ambulance had to come.\n");
                }
                if s.died {
                    body.push_str("It did not make it.\n");
                }
                if let Some(reason) = s.escalated {
                    body.push_str(&format!("It was taken away: {}.\n", reason.label()));
                }
                body.push_str("\nPress any key");
                self.draw_center_box("While you were away...", &body)?;
            }
            Scene::Help => {
                self.draw_center_box(
                    "How to play",
                    "Tap the egg with space until it hatches.\n\
    Keep both star meters up: F feeds, A/E/G/S/I/P play.\n\
    Minigames win treats; 1-5 feed them and shape personality.\n\
    C cleans droppings, M cures illness.\n\
    Space also answers when your pet calls (!) for a growth boost.\n\
    Neglect slows growth and can lead to a Descuidado.\n\
    O turns on oversight: neglect may get the pet taken away.\n\n\
    T speed | L lights | W wake up | D change room | N notifications\n\
    R revive, ascend, or start over.\n\n\
    Esc or H to close help.",
                )?;
            }
            Scene::Dead => {
                self.draw_center_box(
                    "Your pet has passed on.",
                    "Press R to start again with a new egg,\nor Q to quit.",
                )?;
            }
            Scene::Escalated(reason) => {
                let body = format!(
                    "Your pet was taken away: {}.\n\nPress R to start again with a new egg,\nor Q to quit.",
                    reason.label()
                );
                self.draw_center_box("Oversight stepped in.", &body)?;
            }
        }

        self.term.present(true, self.settings.enable_color)?;
        Ok(())
    }

    fn draw_center_box(&mut self, title: &str, body: &str) -> anyhow::Result<()> {
        let w = self.term.cols;
        let h = self.term.rows;

        let bw = min(64, w.saturating_sub(4));
        let bh = min(18, h.saturating_sub(4));
        if bw < 2 || bh < 2 {
            return Ok(());
        }

        let x0 = (w - bw) / 2;
        let y0 = (h - bh) / 2;
        let edge = |ch| Cell {
            ch,
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        };

        for y in y0..y0 + bh {
            for x in x0..x0 + bw {
                self.term.cur.set(x, y, edge(' '));
            }
        }
        for x in x0..x0 + bw {
            self.term.cur.set(x, y0, edge('─'));
            self.term.cur.set(x, y0 + bh - 1, edge('─'));
        }
        for y in y0..y0 + bh {
            self.term.cur.set(x0, y, edge('│'));
            self.term.cur.set(x0 + bw - 1, y, edge('│'));
        }
        self.term.cur.set(x0, y0, edge('┌'));
        self.term.cur.set(x0 + bw - 1, y0, edge('┐'));
        self.term.cur.set(x0, y0 + bh - 1, edge('└'));
        self.term.cur.set(x0 + bw - 1, y0 + bh - 1, edge('┘'));

        draw_text(&mut self.term.cur, x0 + 2, y0 + 1, title, Color::White, Color::Black);

        let mut yy = y0 + 3;
        for line in body.lines() {
            if yy >= y0 + bh - 1 {
                break;
            }
            draw_text(&mut self.term.cur, x0 + 2, yy, line, Color::White, Color::Black);
            yy += 1;
        }

        Ok(())
    }

    fn save_now(&self) -> anyhow::Result<()> {
        save_atomic(&self.paths.save_path, &self.pet, Utc::now())
    }
}

pub(crate) fn run(paths: Paths) -> anyhow::Result<()> {
    let mut app = App::init(paths)?;
    let result = app.run();
    if result.is_err() {
        // leave the terminal usable even when the loop bailed
        let _ = app.term.end();
    }
    result
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
