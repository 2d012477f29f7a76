//! Session state and the per-frame game loop.
//!
//! [`Session`] is the single owner of all mutable game state: level, ammo,
//! countdown, outcome and every live entity.  Three independently scheduled
//! entry points drive it:
//!
//! | Entry point                   | Scheduled                  | Purpose                          |
//! |-------------------------------|----------------------------|----------------------------------|
//! | [`Session::step_frame`]       | once per display refresh   | input, motion, collisions, rules |
//! | [`Session::tick_countdown`]   | once per real second       | countdown, time-out loss         |
//! | [`Session::advance_deferred`] | every frame with its delta | fires the delayed win            |
//!
//! ## Frame order ([`Session::step_frame`])
//!
//! 1. Game over → return immediately, nothing changes.
//! 2. Apply [`Controls`]: move the ship, fire one edge-triggered shot if ammo remains.
//! 3. Advance player bullets; drop those above the top edge.
//! 4. Level 1: bullet ↔ asteroid pass, then ammo-loss check, then field-cleared transition.
//! 5. Level 2: boss motion/shooting, bullet ↔ boss damage, boss bullets (ship hit = loss),
//!    bullet ↔ boss-bullet pass, then ammo-loss check.
//!
//! Collision passes never remove while iterating: matched indices are
//! collected first and removed afterwards.  Within a pass the lower target
//! index claims the lower shot index first, so each shot is spent at most
//! once and each target is destroyed at most once.
//!
//! ## Outcome precedence
//!
//! The first game-over declaration wins.  Later declarations, including a
//! delayed win that fires after a loss, are ignored.

use crate::asteroid::{spawn_field, Asteroid};
use crate::boss::{Boss, BossRules};
use crate::bullet::Bullet;
use crate::collision::{hit_test, Hitbox};
use crate::config::GameConfig;
use crate::input::Controls;
use crate::ship::Ship;
use crate::sprite::{SpriteCatalog, SpriteKind, SpriteState};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Session enums ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Level 1: clear the asteroid field.
    AsteroidField,
    /// Level 2: defeat the boss.
    BossFight,
}

impl Level {
    pub fn number(self) -> u32 {
        match self {
            Level::AsteroidField => 1,
            Level::BossFight => 2,
        }
    }
}

/// Terminal session result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    /// Banner text shown when the session ends.
    pub fn text(self) -> &'static str {
        match self {
            Outcome::Win => "YOU WIN",
            Outcome::Lose => "YOU LOSE",
        }
    }
}

/// Why a session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// Every shot fired while asteroids remain.
    AmmoExhaustedInField,
    /// Every shot fired and spent while the boss is alive.
    AmmoExhaustedAgainstBoss,
    /// A boss bullet reached the ship.
    ShipHit,
    /// The countdown reached zero.
    TimeUp,
}

/// Whether the frame loop should schedule another iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Stopped,
}

/// Whether the countdown task should keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Stopped,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Session {
    config: GameConfig,
    level: Level,
    shots_fired: u32,
    time_left: u32,
    outcome: Option<Outcome>,
    loss_reason: Option<LossReason>,
    /// Seconds until the deferred win fires; `Some` once the boss is defeated.
    pending_win: Option<f32>,
    sprites: SpriteCatalog,
    frames: u64,

    pub ship: Ship,
    /// Player bullets, in firing order.
    pub bullets: Vec<Bullet>,
    /// Boss bullets, in firing order.
    pub boss_bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub boss: Option<Boss>,
    pub controls: Controls,
}

impl Session {
    /// Start a session with a random asteroid field drawn from `rng`.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let field = spawn_field(
            config.asteroid_count,
            config.asteroid_radius,
            config.asteroid_spawn_margin,
            config.arena(),
            rng,
        );
        Self::with_field(config, field)
    }

    /// Start a session using `config.rng_seed` when set, fresh entropy otherwise.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, &mut rng)
    }

    /// Start a session with an explicit asteroid field.
    pub fn with_field(config: &GameConfig, asteroids: Vec<Asteroid>) -> Self {
        Self {
            config: config.clone(),
            level: Level::AsteroidField,
            shots_fired: 0,
            time_left: config.countdown_secs,
            outcome: None,
            loss_reason: None,
            pending_win: None,
            sprites: SpriteCatalog::default(),
            frames: 0,
            ship: Ship::new(config.ship_step),
            bullets: Vec::new(),
            boss_bullets: Vec::new(),
            asteroids,
            boss: None,
            controls: Controls::default(),
        }
    }

    // ── Read-only view for the HUD ────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn ammo_budget(&self) -> u32 {
        self.config.ammo_budget
    }

    pub fn ammo_remaining(&self) -> u32 {
        self.config.ammo_budget.saturating_sub(self.shots_fired)
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// `(hp, max_hp)` while the boss exists.
    pub fn boss_health(&self) -> Option<(u32, u32)> {
        self.boss.as_ref().map(|b| (b.hp, b.max_hp))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn outcome_text(&self) -> Option<&'static str> {
        self.outcome.map(Outcome::text)
    }

    pub fn loss_reason(&self) -> Option<LossReason> {
        self.loss_reason
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Seconds left before the delayed win fires.
    pub fn pending_win(&self) -> Option<f32> {
        self.pending_win
    }

    /// Number of frames simulated so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sprite_state(&self, kind: SpriteKind) -> SpriteState {
        self.sprites.state_for(kind)
    }

    // ── Sprite readiness ──────────────────────────────────────────────────────

    /// Record the display size of `kind` and promote every pending entity of
    /// that kind to ready.  The ship is placed at its start position when it
    /// becomes ready.
    pub fn sprite_ready(&mut self, kind: SpriteKind, size: Vec2) {
        if self.is_over() || self.sprites.get(kind).is_some() {
            return;
        }
        self.sprites.set(kind, size);
        let ready = SpriteState::Ready { size };
        match kind {
            SpriteKind::Ship => self.ship.mark_ready(size, self.config.arena()),
            SpriteKind::Asteroid => {
                for asteroid in &mut self.asteroids {
                    asteroid.sprite = ready;
                }
            }
            SpriteKind::Boss => {
                if let Some(boss) = self.boss.as_mut() {
                    boss.sprite = ready;
                }
            }
        }
        debug!("{kind:?} sprite ready at {size}");
    }

    // ── Frame loop ────────────────────────────────────────────────────────────

    /// Simulate one frame.  See the module docs for the exact order.
    pub fn step_frame(&mut self) -> FrameStatus {
        if self.is_over() {
            return FrameStatus::Stopped;
        }
        self.frames += 1;

        self.apply_controls();
        self.advance_player_bullets();

        match self.level {
            Level::AsteroidField => self.step_asteroid_field(),
            Level::BossFight => self.step_boss_fight(),
        }

        self.frame_status()
    }

    fn frame_status(&self) -> FrameStatus {
        if self.is_over() {
            FrameStatus::Stopped
        } else {
            FrameStatus::Running
        }
    }

    fn apply_controls(&mut self) {
        if self.controls.left {
            self.ship.move_left();
        }
        if self.controls.right {
            self.ship.move_right(self.config.arena_width);
        }

        let Some(muzzle) = self.ship.muzzle(self.config.bullet_width) else {
            return;
        };
        if self.ammo_remaining() > 0 && self.controls.fire.take() {
            self.bullets.push(Bullet::new(
                muzzle,
                self.config.bullet_size(),
                self.config.player_bullet_speed,
            ));
            self.shots_fired += 1;
            debug!(
                "Shot fired; ammo {}/{}",
                self.ammo_remaining(),
                self.ammo_budget()
            );
        }
    }

    fn advance_player_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update();
        }
        self.bullets.retain(|b| !b.exited_top());
    }

    fn step_asteroid_field(&mut self) {
        let hits = first_hits(&self.asteroids, &self.bullets);
        if !hits.is_empty() {
            let (destroyed, spent): (Vec<usize>, Vec<usize>) = hits.into_iter().unzip();
            remove_indices(&mut self.asteroids, destroyed);
            remove_indices(&mut self.bullets, spent);
            debug!("{} asteroids remaining", self.asteroids.len());
        }

        if self.ammo_remaining() == 0 && !self.asteroids.is_empty() {
            self.declare(Outcome::Lose, Some(LossReason::AmmoExhaustedInField));
            return;
        }

        if self.asteroids.is_empty() {
            self.enter_boss_fight();
        }
    }

    fn enter_boss_fight(&mut self) {
        self.level = Level::BossFight;
        self.shots_fired = 0;
        let mut boss = Boss::new(
            Vec2::new(self.config.arena_width / 2.0, self.config.boss_start_y),
            self.config.boss_speed,
            self.config.boss_max_hp,
        );
        boss.sprite = self.sprites.state_for(SpriteKind::Boss);
        self.boss = Some(boss);
        info!(
            "Asteroid field cleared; level 2 with {} seconds left",
            self.time_left
        );
    }

    fn boss_rules(&self) -> BossRules {
        BossRules {
            arena_width: self.config.arena_width,
            fire_threshold: self.config.boss_fire_threshold,
            bullet_size: self.config.bullet_size(),
            bullet_speed: self.config.boss_bullet_speed,
        }
    }

    fn step_boss_fight(&mut self) {
        let rules = self.boss_rules();
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        // Motion and shooting.
        if let Some(shot) = boss.update(&rules) {
            self.boss_bullets.push(shot);
        }

        // Player bullets ↔ boss.
        let mut spent = Vec::new();
        let mut defeated = false;
        for (i, bullet) in self.bullets.iter().enumerate() {
            if !boss.is_alive() {
                break;
            }
            if hit_test(bullet, &*boss) {
                spent.push(i);
                defeated |= boss.apply_hit();
                info!("Boss hit: {}/{} HP", boss.hp, boss.max_hp);
            }
        }
        let boss_alive = boss.is_alive();
        remove_indices(&mut self.bullets, spent);
        if defeated {
            self.schedule_win();
        }

        // Boss bullets: advance, drop below the floor, check the ship.
        for bullet in &mut self.boss_bullets {
            bullet.update();
        }
        let floor = self.config.arena_height;
        self.boss_bullets.retain(|b| !b.exited_bottom(floor));
        if self.boss_bullets.iter().any(|b| hit_test(b, &self.ship)) {
            self.declare(Outcome::Lose, Some(LossReason::ShipHit));
            return;
        }

        // Player bullets ↔ boss bullets.
        let clashes = first_hits(&self.bullets, &self.boss_bullets);
        if !clashes.is_empty() {
            let (mine, theirs): (Vec<usize>, Vec<usize>) = clashes.into_iter().unzip();
            remove_indices(&mut self.bullets, mine);
            remove_indices(&mut self.boss_bullets, theirs);
        }

        if self.ammo_remaining() == 0 && self.bullets.is_empty() && boss_alive {
            self.declare(Outcome::Lose, Some(LossReason::AmmoExhaustedAgainstBoss));
        }
    }

    // ── Timers ────────────────────────────────────────────────────────────────

    /// One countdown tick (one real second).  Reaching zero loses the session.
    pub fn tick_countdown(&mut self) -> TickStatus {
        if self.is_over() {
            return TickStatus::Stopped;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.declare(Outcome::Lose, Some(LossReason::TimeUp));
            return TickStatus::Stopped;
        }
        TickStatus::Running
    }

    fn schedule_win(&mut self) {
        if self.pending_win.is_none() {
            self.pending_win = Some(self.config.win_delay_secs);
            info!(
                "Boss defeated; win declared in {:.2}s",
                self.config.win_delay_secs
            );
        }
    }

    /// Advance the one-shot win delay by `dt_secs`.
    ///
    /// Once scheduled the delay cannot be cancelled; if the session was lost in
    /// the meantime the win is ignored.
    pub fn advance_deferred(&mut self, dt_secs: f32) {
        let Some(remaining) = self.pending_win else {
            return;
        };
        let remaining = remaining - dt_secs;
        if remaining <= 0.0 {
            self.pending_win = None;
            self.declare(Outcome::Win, None);
        } else {
            self.pending_win = Some(remaining);
        }
    }

    /// Set the outcome unless one is already set.  Returns whether it took effect.
    fn declare(&mut self, outcome: Outcome, reason: Option<LossReason>) -> bool {
        if let Some(existing) = self.outcome {
            debug!("Ignoring {outcome:?}; session already ended with {existing:?}");
            return false;
        }
        self.outcome = Some(outcome);
        self.loss_reason = reason;
        match reason {
            Some(reason) => info!("{} ({reason:?})", outcome.text()),
            None => info!("{}", outcome.text()),
        }
        true
    }
}

// ── Collision pass helpers ────────────────────────────────────────────────────

/// Pair each target with the first unspent shot that hits it.
///
/// Targets are visited in ascending index order and shots are searched in
/// ascending index order, so the result is deterministic and no index appears
/// twice on either side.
fn first_hits<T: Hitbox, S: Hitbox>(targets: &[T], shots: &[S]) -> Vec<(usize, usize)> {
    let mut spent = vec![false; shots.len()];
    let mut pairs = Vec::new();
    for (ti, target) in targets.iter().enumerate() {
        let hit = shots
            .iter()
            .enumerate()
            .find(|(si, shot)| !spent[*si] && hit_test(target, *shot))
            .map(|(si, _)| si);
        if let Some(si) = hit {
            spent[si] = true;
            pairs.push((ti, si));
        }
    }
    pairs
}

/// Remove the given indices from `items`, highest first.
fn remove_indices<T>(items: &mut Vec<T>, mut doomed: Vec<usize>) {
    doomed.sort_unstable();
    doomed.dedup();
    for &i in doomed.iter().rev() {
        if i < items.len() {
            items.remove(i);
        }
    }
}
