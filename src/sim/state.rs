//! Game state and core simulation types
//!
//! Entities are tagged variants over a shared record rather than a class
//! hierarchy: position, size, alive flag and speed live on [`Actor`],
//! behavior differences hang off [`ActorKind`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the explicit start action
    Start,
    /// Active gameplay
    Playing,
    /// Player hit with lives remaining; waiting out the respawn delay
    Respawning,
    /// Boss defeated (terminal)
    Win,
    /// Player out of lives (terminal)
    GameOver,
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Opponent,
}

/// A fired shot: a fixed-size rect moving vertically at a signed speed.
///
/// Negative speed moves up (player shots), positive moves down. There is
/// no horizontal motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub speed: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    fn new(owner: ProjectileOwner, x: f32, y: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, SHOT_WIDTH, SHOT_HEIGHT),
            speed,
            owner,
        }
    }

    /// Advance one tick worth of vertical motion
    pub fn advance(&mut self) {
        self.rect.pos.y += self.speed;
    }

    /// True once the shot has left the arena vertically
    pub fn expired(&self) -> bool {
        if self.speed < 0.0 {
            self.rect.pos.y < 0.0
        } else {
            self.rect.pos.y > ARENA_HEIGHT
        }
    }
}

/// Variant tag carrying the per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    Player { lives: u8 },
    Opponent { direction: f32 },
    Boss { direction: f32 },
}

/// A moving, collidable game object with alive/dead state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub rect: Rect,
    pub dead: bool,
    pub speed: f32,
    /// Simulation time of the last shot; `None` until the first one
    pub last_fire_ms: Option<f64>,
}

impl Actor {
    /// Player at its fixed starting position, bottom-center of the arena
    pub fn player(lives: u8) -> Self {
        Self {
            kind: ActorKind::Player { lives },
            rect: Rect::new(
                ARENA_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                ARENA_HEIGHT - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
            dead: false,
            speed: PLAYER_SPEED,
            last_fire_ms: None,
        }
    }

    /// Opponent at a random horizontal position near the arena top
    pub fn opponent(rng: &mut Pcg32) -> Self {
        Self {
            kind: ActorKind::Opponent { direction: 1.0 },
            rect: Self::spawn_rect(rng),
            dead: false,
            speed: OPPONENT_SPEED,
            last_fire_ms: None,
        }
    }

    /// Boss: same patrol as the opponent with doubled movement speed
    pub fn boss(rng: &mut Pcg32) -> Self {
        Self {
            kind: ActorKind::Boss { direction: 1.0 },
            rect: Self::spawn_rect(rng),
            dead: false,
            speed: OPPONENT_SPEED * BOSS_SPEED_FACTOR,
            last_fire_ms: None,
        }
    }

    fn spawn_rect(rng: &mut Pcg32) -> Rect {
        let x = rng.random_range(0.0..ARENA_WIDTH - OPPONENT_SIZE);
        Rect::new(x, OPPONENT_TOP_OFFSET, OPPONENT_SIZE, OPPONENT_SIZE)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, ActorKind::Boss { .. })
    }

    /// Remaining lives; zero for non-player actors
    pub fn lives(&self) -> u8 {
        match self.kind {
            ActorKind::Player { lives } => lives,
            _ => 0,
        }
    }

    pub fn move_left(&mut self) {
        self.rect.pos.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.rect.pos.x += self.speed;
    }

    /// Clamp the player into the arena after all inputs for the tick
    pub fn clamp_to_arena(&mut self) {
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, ARENA_WIDTH - self.rect.size.x);
    }

    /// Advance the patrol: horizontal sweep, flip and descend at a bound.
    ///
    /// There is deliberately no vertical floor; an undefeated opponent
    /// descends past the player eventually, matching the reference game.
    pub fn patrol(&mut self) {
        let direction = match &mut self.kind {
            ActorKind::Opponent { direction } | ActorKind::Boss { direction } => direction,
            ActorKind::Player { .. } => return,
        };
        self.rect.pos.x += self.speed * *direction;
        if self.rect.pos.x <= 0.0 || self.rect.pos.x + self.rect.size.x >= ARENA_WIDTH {
            *direction = -*direction;
            self.rect.pos.y += OPPONENT_DESCENT_STEP;
        }
    }

    /// Fire if at least `cooldown_ms` of simulation time has elapsed since
    /// the previous shot. Player shots leave the top edge moving up;
    /// opponent shots leave the bottom edge moving down. Both are centered
    /// on the actor's horizontal midpoint.
    pub fn try_fire(&mut self, now_ms: f64, cooldown_ms: f64) -> Option<Projectile> {
        let ready = self.last_fire_ms.map_or(true, |t| now_ms - t >= cooldown_ms);
        if !ready {
            return None;
        }
        self.last_fire_ms = Some(now_ms);

        let x = self.rect.center_x() - SHOT_WIDTH / 2.0;
        let shot = match self.kind {
            ActorKind::Player { .. } => Projectile::new(
                ProjectileOwner::Player,
                x,
                self.rect.pos.y,
                PLAYER_SHOT_SPEED,
            ),
            ActorKind::Opponent { .. } | ActorKind::Boss { .. } => Projectile::new(
                ProjectileOwner::Opponent,
                x,
                self.rect.bottom(),
                OPPONENT_SHOT_SPEED,
            ),
        };
        Some(shot)
    }

    /// Mark the actor dead. Idempotent.
    pub fn collide(&mut self) {
        self.dead = true;
    }

    /// Decrement lives (floor at zero) and mark dead.
    ///
    /// Returns true iff the session is over (no lives remain).
    pub fn lose_life(&mut self) -> bool {
        let ActorKind::Player { lives } = &mut self.kind else {
            return false;
        };
        *lives = lives.saturating_sub(1);
        let game_over = *lives == 0;
        self.collide();
        game_over
    }

    /// Clear the dead flag and return to the fixed starting position.
    /// Lives are untouched.
    pub fn respawn(&mut self) {
        self.dead = false;
        self.rect.pos.x = ARENA_WIDTH / 2.0 - self.rect.size.x / 2.0;
        self.rect.pos.y = ARENA_HEIGHT - self.rect.size.y - PLAYER_BOTTOM_MARGIN;
    }
}

/// A defeated opponent awaiting its follow-on transition.
///
/// Replaces the reference game's fire-and-forget timers: the deadline
/// lives in the state itself, so a restart clears it and a stale deadline
/// can never resurrect a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingDefeat {
    pub at_ms: f64,
    pub was_boss: bool,
}

/// Complete session state, owned and mutated only by the simulation.
///
/// The presentation layer reads phase/score/lives and the entity
/// snapshots; it never writes. Deterministic per seed.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// +1 per non-boss kill
    pub score: u32,
    /// Simulation clock, advanced `SIM_DT_MS` per tick
    pub time_ms: f64,
    pub time_ticks: u64,
    pub player: Actor,
    /// The single opponent-type actor, once a session has started
    pub opponent: Option<Actor>,
    pub player_shots: Vec<Projectile>,
    pub opponent_shots: Vec<Projectile>,
    /// Deadline for the post-hit player respawn
    pub respawn_at_ms: Option<f64>,
    /// Deadline for the post-kill replacement/win transition
    pub pending_defeat: Option<PendingDefeat>,
    rng: Pcg32,
}

impl GameState {
    /// Create a session in the `Start` phase with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            time_ms: 0.0,
            time_ticks: 0,
            player: Actor::player(tuning.initial_lives),
            opponent: None,
            player_shots: Vec::new(),
            opponent_shots: Vec::new(),
            respawn_at_ms: None,
            pending_defeat: None,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Start or restart: fresh actors, zero score, cleared projectiles
    /// and timed sub-states, straight into `Playing`.
    pub fn start_session(&mut self) {
        self.score = 0;
        self.player = Actor::player(self.tuning.initial_lives);
        self.opponent = Some(Actor::opponent(&mut self.rng));
        self.player_shots.clear();
        self.opponent_shots.clear();
        self.respawn_at_ms = None;
        self.pending_defeat = None;
        self.phase = GamePhase::Playing;
        log::info!("session started (seed {})", self.seed);
    }

    /// Spawn the replacement for a defeated non-boss opponent: a boss once
    /// the kill counter has reached the configured threshold, otherwise
    /// another regular opponent.
    pub(crate) fn spawn_replacement(&mut self) {
        let actor = if self.score >= self.tuning.boss_threshold {
            log::info!("boss spawned at score {}", self.score);
            Actor::boss(&mut self.rng)
        } else {
            Actor::opponent(&mut self.rng)
        };
        self.opponent = Some(actor);
    }

    /// Remaining player lives
    pub fn lives(&self) -> u8 {
        self.player.lives()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_player_start_position() {
        let player = Actor::player(3);
        assert_eq!(player.rect.pos.x, 375.0);
        assert_eq!(player.rect.pos.y, 540.0);
        assert_eq!(player.lives(), 3);
        assert!(!player.dead);
    }

    #[test]
    fn test_lose_life_sequence() {
        let mut player = Actor::player(3);
        assert!(!player.lose_life());
        assert_eq!(player.lives(), 2);
        assert!(!player.lose_life());
        assert_eq!(player.lives(), 1);
        assert!(player.lose_life());
        assert_eq!(player.lives(), 0);
        // Floor at zero
        assert!(player.lose_life());
        assert_eq!(player.lives(), 0);
    }

    #[test]
    fn test_respawn_resets_position_not_lives() {
        let mut player = Actor::player(3);
        player.lose_life();
        player.rect.pos.x = 10.0;
        player.respawn();
        assert!(!player.dead);
        assert_eq!(player.rect.pos.x, 375.0);
        assert_eq!(player.rect.pos.y, 540.0);
        assert_eq!(player.lives(), 2);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut player = Actor::player(3);
        // Fresh actor fires immediately
        assert!(player.try_fire(1000.0, 500.0).is_some());
        // Too soon
        assert!(player.try_fire(1400.0, 500.0).is_none());
        // A failed attempt must not reset the cooldown window
        assert!(player.try_fire(1500.0, 500.0).is_some());
    }

    #[test]
    fn test_player_shot_geometry() {
        let mut player = Actor::player(3);
        let shot = player.try_fire(0.0, 500.0).unwrap();
        assert_eq!(shot.owner, ProjectileOwner::Player);
        assert_eq!(shot.speed, -7.0);
        assert_eq!(shot.rect.size.x, 5.0);
        assert_eq!(shot.rect.size.y, 15.0);
        // Centered on the player's midpoint, leaving the top edge
        assert_eq!(shot.rect.pos.x, player.rect.center_x() - 2.5);
        assert_eq!(shot.rect.pos.y, player.rect.pos.y);
    }

    #[test]
    fn test_opponent_shot_geometry() {
        let mut opponent = Actor::opponent(&mut rng());
        let shot = opponent.try_fire(0.0, 2000.0).unwrap();
        assert_eq!(shot.owner, ProjectileOwner::Opponent);
        assert_eq!(shot.speed, 5.0);
        assert_eq!(shot.rect.pos.y, opponent.rect.bottom());
    }

    #[test]
    fn test_patrol_reversal_left_bound() {
        let mut opponent = Actor::opponent(&mut rng());
        opponent.rect.pos.x = 0.0;
        opponent.kind = ActorKind::Opponent { direction: -1.0 };
        let y_before = opponent.rect.pos.y;

        opponent.patrol();
        let ActorKind::Opponent { direction } = opponent.kind else {
            panic!("kind changed");
        };
        assert_eq!(direction, 1.0);
        assert_eq!(opponent.rect.pos.y, y_before + 20.0);
    }

    #[test]
    fn test_patrol_reversal_right_bound() {
        let mut opponent = Actor::opponent(&mut rng());
        opponent.rect.pos.x = 749.0;
        let y_before = opponent.rect.pos.y;

        opponent.patrol();
        let ActorKind::Opponent { direction } = opponent.kind else {
            panic!("kind changed");
        };
        assert_eq!(direction, -1.0);
        assert_eq!(opponent.rect.pos.y, y_before + 20.0);
    }

    #[test]
    fn test_boss_double_speed() {
        let opponent = Actor::opponent(&mut rng());
        let boss = Actor::boss(&mut rng());
        assert!(boss.is_boss());
        assert_eq!(boss.speed, opponent.speed * 2.0);
    }

    #[test]
    fn test_opponent_spawn_in_bounds() {
        let mut r = rng();
        for _ in 0..100 {
            let opponent = Actor::opponent(&mut r);
            assert!(opponent.rect.pos.x >= 0.0);
            assert!(opponent.rect.right() <= 800.0);
            assert_eq!(opponent.rect.pos.y, 50.0);
        }
    }

    #[test]
    fn test_projectile_expiry_bounds() {
        let mut up = Projectile::new(ProjectileOwner::Player, 100.0, 0.0, -7.0);
        assert!(!up.expired());
        up.advance();
        assert!(up.expired());

        let mut down = Projectile::new(ProjectileOwner::Opponent, 100.0, 590.0, 5.0);
        for _ in 0..2 {
            down.advance();
            assert!(!down.expired());
        }
        // y = 605 after the third step
        down.advance();
        assert!(down.expired());
    }
}
