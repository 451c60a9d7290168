//! The game session: phase state machine for one player.
//!
//! Every player action is handled to completion before returning:
//!   1. Ignore the action if it does not apply to the current phase
//!   2. Mutate the pool / boxes
//!   3. Run the matching completion check right away
//!   4. Apply the resulting transition (and schedule any deferred reset)
//!
//! The events produced along the way are returned to the caller.
//!
//! Time only moves through `advance_time`. Deferred resets fire from there,
//! and only if the run generation they were scheduled under is still current.
//!
//! ## Transitions
//!
//! ┌───────────┬──────────────────────────────┬────────────────────────────┐
//! │ From      │ Trigger                       │ To / effect                │
//! ├───────────┼──────────────────────────────┼────────────────────────────┤
//! │ Packing   │ packed, even                  │ Coloring                   │
//! │ Packing   │ packed, uneven, free boxes    │ Packing, reset after delay │
//! │ Packing   │ packed, uneven, preset boxes  │ Packing, no feedback       │
//! │ Coloring  │ every box colored             │ Completed, points awarded  │
//! │ Completed │ advance, not last level       │ next level, Packing        │
//! │ Completed │ advance, last level           │ new run after delay        │
//! │ any       │ reset run                     │ level 1, Packing           │
//! └───────────┴──────────────────────────────┴────────────────────────────┘

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::domain::item::{ItemId, ItemPool};
use crate::domain::packbox::{BoxCollection, BoxId};
use crate::domain::rules;

use super::action::Action;
use super::event::GameEvent;
use super::level::{self, LevelDef};
use super::schedule::{DueTask, Scheduler, TaskKind};
use super::score::ScoreBoard;
use super::world::{Phase, RunState};

pub const MSG_PACKED: &str =
    "Great job! Every box has the same number of chocolates. Now color the boxes!";
pub const MSG_UNEVEN: &str =
    "Oops! The boxes don't all have the same number of chocolates. Let's try again!";
pub const MSG_LEVEL_DONE: &str = "Beautiful boxes! Ready for the next level?";
pub const MSG_LAST_LEVEL_DONE: &str = "Beautiful boxes! That was the last level!";
pub const MSG_RUN_DONE: &str = "You finished every level! Let's play again!";

pub struct Game<R: Rng = SmallRng> {
    config: GameConfig,
    rng: R,
    run: RunState,
    score: ScoreBoard,
    pool: ItemPool,
    boxes: BoxCollection,
    scheduler: Scheduler,
    selected_color: Option<String>,
}

// ── Construction ──

impl Game<SmallRng> {
    /// Seeded from `config.seed` when set, otherwise from the OS.
    pub fn from_config(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Game::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Game {
            config,
            rng,
            run: RunState::new(),
            score: ScoreBoard::new(),
            pool: ItemPool::new(),
            boxes: BoxCollection::new(),
            scheduler: Scheduler::new(),
            selected_color: None,
        }
    }
}

// ── Queries ──

impl<R: Rng> Game<R> {
    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> Phase {
        self.run.phase
    }

    pub fn level(&self) -> &'static LevelDef {
        level::get(self.run.level_index)
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    pub fn boxes(&self) -> &BoxCollection {
        &self.boxes
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selected_color.as_deref()
    }

    pub fn is_retry_pending(&self) -> bool {
        self.scheduler.is_pending(TaskKind::RetryReset)
    }

    pub fn is_run_reset_pending(&self) -> bool {
        self.scheduler.is_pending(TaskKind::RunReset)
    }
}

// ══════════════════════════════════════════════════════════════
// Player actions
// ══════════════════════════════════════════════════════════════

impl<R: Rng> Game<R> {
    pub fn dispatch(&mut self, action: Action) -> Vec<GameEvent> {
        match action {
            Action::DropItem { item, target } => self.drop_item(item, target),
            Action::DropColor { target, color } => self.drop_color(target, &color),
            Action::SelectColor(color) => self.select_color(&color),
            Action::AddBox => self.add_box(),
            Action::ClearBoxes => self.clear_boxes(),
            Action::AdvanceLevel => self.advance_level(),
            Action::StartRun => self.start_run(),
            Action::ResetRun => self.reset_run(),
        }
    }

    /// Start playing. Ignored while a run is already in progress.
    pub fn start_run(&mut self) -> Vec<GameEvent> {
        if self.run.is_active {
            return ignored("start run", self.run.phase);
        }
        self.begin_run()
    }

    /// Abandon the current run and start over from level 1.
    /// The lifetime total is kept.
    pub fn reset_run(&mut self) -> Vec<GameEvent> {
        self.begin_run()
    }

    pub fn drop_item(&mut self, item: ItemId, target: BoxId) -> Vec<GameEvent> {
        if !self.accepts(Phase::Packing) {
            return ignored("drop item", self.run.phase);
        }
        let Some(it) = self.pool.get(item).cloned() else {
            return ignored("drop unknown item", self.run.phase);
        };
        if !self.boxes.append_item(target, &it) {
            return ignored("drop item (placed or unknown box)", self.run.phase);
        }
        self.pool.mark_placed(item);

        let mut events = vec![GameEvent::ItemPlaced { item, target }];
        self.check_packing(&mut events);
        events
    }

    pub fn drop_color(&mut self, target: BoxId, color: &str) -> Vec<GameEvent> {
        if !self.accepts(Phase::Coloring) {
            return ignored("drop color", self.run.phase);
        }
        if !self.boxes.set_color(target, color) {
            return ignored("drop color (unknown box or blank)", self.run.phase);
        }

        let mut events = vec![GameEvent::BoxColored {
            target,
            color: color.trim().to_string(),
        }];
        if rules::is_coloring_complete(&self.boxes) {
            self.complete_level(&mut events);
        }
        events
    }

    /// Remember the palette color the player picked. No events.
    pub fn select_color(&mut self, color: &str) -> Vec<GameEvent> {
        let color = color.trim();
        if !self.run.is_active || color.is_empty() {
            return ignored("select color", self.run.phase);
        }
        self.selected_color = Some(color.to_string());
        vec![]
    }

    pub fn add_box(&mut self) -> Vec<GameEvent> {
        if !self.accepts(Phase::Packing) {
            return ignored("add box", self.run.phase);
        }
        match self.boxes.add_box() {
            Some(id) => vec![GameEvent::BoxAdded(id)],
            None => ignored("add box on preset level", self.run.phase),
        }
    }

    pub fn clear_boxes(&mut self) -> Vec<GameEvent> {
        if !self.accepts(Phase::Packing) {
            return ignored("clear boxes", self.run.phase);
        }
        if !self.boxes.clear_all() {
            return ignored("clear boxes on preset level", self.run.phase);
        }
        self.pool.reset_all_placements();
        // The board is already fresh; a pending retry would wipe new progress.
        self.scheduler.cancel(TaskKind::RetryReset);
        vec![GameEvent::BoxesCleared]
    }

    pub fn advance_level(&mut self) -> Vec<GameEvent> {
        if !self.accepts(Phase::Completed) || self.is_run_reset_pending() {
            return ignored("advance level", self.run.phase);
        }
        if !self.run.is_last_level() {
            let mut events = vec![];
            self.load_level(self.run.level_index + 1, &mut events);
            return events;
        }
        tracing::info!(run = self.score.run, total = self.score.total, "run finished");
        self.scheduler.schedule(
            self.config.timing.run_reset_delay,
            TaskKind::RunReset,
            self.run.token(),
        );
        vec![GameEvent::Message(MSG_RUN_DONE.to_string())]
    }

    /// Move the game clock forward, firing any deferred resets that came due.
    pub fn advance_time(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = vec![];
        for task in self.scheduler.advance(elapsed) {
            self.apply_task(task, &mut events);
        }
        events
    }
}

// ══════════════════════════════════════════════════════════════
// Transitions
// ══════════════════════════════════════════════════════════════

impl<R: Rng> Game<R> {
    fn accepts(&self, phase: Phase) -> bool {
        self.run.is_active && self.run.phase == phase
    }

    fn begin_run(&mut self) -> Vec<GameEvent> {
        self.scheduler.cancel_all();
        self.score.reset_run();
        self.run.is_active = true;
        self.selected_color = None;

        let mut events = vec![];
        self.load_level(1, &mut events);
        events.push(self.score_event());
        events
    }

    fn load_level(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        self.run.enter_level(index);
        let def = self.level();

        self.pool.initialize(def.item_count, &mut self.rng);
        self.boxes = BoxCollection::new();
        match def.preset_box_count {
            Some(n) => self.boxes.initialize_preset(n),
            None => self.boxes.reset_free(),
        }
        self.selected_color = None;

        tracing::info!(level_index = def.index, items = def.item_count, "level start");
        events.push(GameEvent::LevelChanged(def.index));
        events.push(GameEvent::PhaseChanged(Phase::Packing));
        events.push(GameEvent::Message(level::intro_text(def)));
        if let Some(msg) = def.special_message {
            events.push(GameEvent::Message(msg.to_string()));
        }
    }

    fn check_packing(&mut self, events: &mut Vec<GameEvent>) {
        let def = self.level();
        let status = rules::is_packing_complete(&self.pool, &self.boxes, def.item_count);
        if !status.complete {
            return;
        }

        if status.valid {
            tracing::info!(level_index = def.index, boxes = self.boxes.len(), "packed evenly");
            self.run.set_phase(Phase::Coloring);
            events.push(GameEvent::Message(MSG_PACKED.to_string()));
            events.push(GameEvent::PhaseChanged(Phase::Coloring));
        } else if def.uses_preset_boxes() {
            // First level never shows failure feedback.
            tracing::debug!(level_index = def.index, "uneven split on preset boxes");
        } else if !self.is_retry_pending() {
            tracing::info!(level_index = def.index, boxes = self.boxes.len(), "uneven split");
            events.push(GameEvent::Message(MSG_UNEVEN.to_string()));
            self.scheduler.schedule(
                self.config.timing.retry_delay,
                TaskKind::RetryReset,
                self.run.token(),
            );
        }
    }

    fn complete_level(&mut self, events: &mut Vec<GameEvent>) {
        self.score.award_points(self.config.scoring.points_per_level);
        let last = self.run.is_last_level();
        if last {
            self.score.fold_run_into_total();
        }
        self.run.set_phase(Phase::Completed);

        tracing::info!(level_index = self.run.level_index, run = self.score.run, "level complete");
        let msg = if last { MSG_LAST_LEVEL_DONE } else { MSG_LEVEL_DONE };
        events.push(self.score_event());
        events.push(GameEvent::Message(msg.to_string()));
        events.push(GameEvent::PhaseChanged(Phase::Completed));
    }

    fn apply_task(&mut self, task: DueTask, events: &mut Vec<GameEvent>) {
        if !self.run.is_current(task.token) {
            tracing::debug!(kind = ?task.kind, "dropping stale task");
            return;
        }
        match task.kind {
            TaskKind::RetryReset => {
                self.boxes.empty_all();
                self.pool.reset_all_placements();
                self.selected_color = None;
                events.push(GameEvent::BoardReset);
            }
            TaskKind::RunReset => {
                events.push(GameEvent::RunCompleted {
                    run_score: self.score.run,
                    total_score: self.score.total,
                });
                events.extend(self.begin_run());
            }
        }
    }

    fn score_event(&self) -> GameEvent {
        GameEvent::ScoreChanged { run: self.score.run, total: self.score.total }
    }
}

fn ignored(what: &str, phase: Phase) -> Vec<GameEvent> {
    tracing::debug!(%phase, "ignored: {what}");
    vec![]
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
