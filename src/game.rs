use crate::capture;
use crate::entity::{Direction, LandEnemy, Player, Position, SeaEnemy};
use crate::error::GameError;
use crate::grid::{Cell, Grid};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Points per newly captured cell.
const CAPTURE_SCORE: u32 = 10;
/// Level-advance bonus is the level number times this.
const LEVEL_BONUS: u32 = 1000;
/// Sea enemy speed in cells per frame, before the level speed factor.
const SEA_ENEMY_SPEED: f64 = 0.25;
const START_LIVES: u32 = 3;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub cols: i32,
    pub rows: i32,
    pub border_margin: i32,
    /// The player and land enemies step once every this many frames.
    pub tick_divisor: u64,
    /// Frame cadence of one wall-clock second; the time budget counts down
    /// at this rate. Must be a multiple of `tick_divisor`.
    pub frames_per_second: u64,
    /// Seconds on the clock before a time-out death.
    pub time_limit: i32,
    /// Land percentage that advances the level.
    pub target_percent: u32,
    /// Whether closing a trail stops the player on arrival (classic rule).
    /// When false the player keeps its velocity and runs on.
    pub stop_on_land: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 60,
            border_margin: 2,
            tick_divisor: 2,
            frames_per_second: 60,
            time_limit: 99,
            target_percent: 75,
            stop_on_land: true,
        }
    }
}

impl GameConfig {
    fn validate(&self) -> Result<(), GameError> {
        if self.tick_divisor == 0 {
            return Err(GameError::Configuration(
                "tick divisor must be nonzero".into(),
            ));
        }
        if self.frames_per_second == 0 || self.frames_per_second % self.tick_divisor != 0 {
            return Err(GameError::Configuration(format!(
                "frames per second ({}) must be a nonzero multiple of the tick divisor ({})",
                self.frames_per_second, self.tick_divisor
            )));
        }
        if self.target_percent == 0 || self.target_percent > 100 {
            return Err(GameError::Configuration(format!(
                "target percentage must be in 1..=100, got {}",
                self.target_percent
            )));
        }
        if self.time_limit < 1 {
            return Err(GameError::Configuration(format!(
                "time limit must be at least 1 second, got {}",
                self.time_limit
            )));
        }
        Ok(())
    }
}

/// The whole simulation: grid, entities and session state. Single-threaded
/// and tick-driven; `update` advances one render frame, discrete steps fire
/// every `tick_divisor` frames.
pub struct Game {
    config: GameConfig,
    grid: Grid,
    player: Player,
    sea_enemies: Vec<SeaEnemy>,
    land_enemies: Vec<LandEnemy>,
    lives: u32,
    score: u32,
    level: u32,
    time_left: i32,
    frame: u64,
    game_over: bool,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Deterministic construction for tests and replays.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.cols, config.rows, config.border_margin)?;
        let mut game = Self {
            config,
            grid,
            player: Player::new(0, 0),
            sea_enemies: Vec::new(),
            land_enemies: Vec::new(),
            lives: START_LIVES,
            score: 0,
            level: 1,
            time_left: 0,
            frame: 0,
            game_over: false,
            rng,
        };
        game.init_level();
        Ok(game)
    }

    /// Queue a direction intent from the input collaborator. `(0, 0)` asks
    /// the player to halt. Applied at the next discrete tick; anything
    /// outside the five legal vectors is ignored.
    pub fn set_direction_intent(&mut self, dx: i32, dy: i32) {
        if matches!((dx, dy), (0, 0) | (0, 1) | (0, -1) | (1, 0) | (-1, 0)) {
            self.player.queued = Some((dx, dy));
        }
    }

    pub fn queue_direction(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.set_direction_intent(dx, dy);
    }

    /// Reset the whole session. Valid from any state, including game over.
    pub fn restart(&mut self) {
        self.lives = START_LIVES;
        self.score = 0;
        self.level = 1;
        self.frame = 0;
        self.game_over = false;
        self.init_level();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { game: self }
    }

    fn init_level(&mut self) {
        self.grid.reset();
        self.player = Player::new(0, 0);

        self.sea_enemies.clear();
        let cx = (self.config.cols / 2) as f64 + 0.5;
        let cy = (self.config.rows / 2) as f64 + 0.5;
        for _ in 0..(1 + self.level) {
            let dx = if self.rng.gen_bool(0.5) { SEA_ENEMY_SPEED } else { -SEA_ENEMY_SPEED };
            let dy = if self.rng.gen_bool(0.5) { SEA_ENEMY_SPEED } else { -SEA_ENEMY_SPEED };
            self.sea_enemies.push(SeaEnemy::new(cx, cy, dx, dy));
        }

        self.land_enemies.clear();
        if self.level >= 3 {
            let count = if self.level >= 6 { 2 } else { 1 };
            for _ in 0..count {
                self.land_enemies.push(LandEnemy::new(0, 0, Direction::Right));
            }
        }

        self.time_left = self.config.time_limit;
    }

    /// Advance one render frame. Sea enemies move every frame; the player,
    /// land enemies and the clock move on the coarser tick.
    pub fn update(&mut self) {
        if self.game_over {
            return;
        }
        self.frame += 1;

        if self.frame % self.config.tick_divisor == 0 {
            if self.frame % self.config.frames_per_second == 0 {
                self.time_left -= 1;
                if self.time_left <= 0 {
                    self.handle_death();
                    return;
                }
            }

            self.apply_queued_direction();
            if self.step_player() {
                return;
            }
            if self.step_land_enemies() {
                return;
            }
        }

        self.step_sea_enemies();
    }

    fn apply_queued_direction(&mut self) {
        let Some((qx, qy)) = self.player.queued else {
            return;
        };
        let (vx, vy) = self.player.velocity;
        let is_reverse = (vx != 0 && qx == -vx) || (vy != 0 && qy == -vy);
        let on_land = self.grid.get(self.player.position.x, self.player.position.y) == Cell::Land;
        // Doubling back into the trail is only forbidden mid-sea; a rejected
        // intent stays queued and applies once the player stands on Land.
        if !is_reverse || on_land {
            self.player.velocity = (qx, qy);
            self.player.queued = None;
        }
    }

    /// Returns true when the tick must end early (death or level advance).
    fn step_player(&mut self) -> bool {
        let (vx, vy) = self.player.velocity;
        if vx == 0 && vy == 0 {
            return false;
        }
        let next = self.player.position.offset(vx, vy);
        if !self.grid.in_bounds(next.x, next.y) {
            // Stop at the edge
            self.player.velocity = (0, 0);
            return false;
        }
        match self.grid.get(next.x, next.y) {
            Cell::Trail => {
                self.handle_death();
                true
            }
            Cell::Sea => {
                let here = self.player.position;
                if self.grid.get(here.x, here.y) != Cell::Land {
                    self.grid.set(here.x, here.y, Cell::Trail);
                }
                self.player.position = next;
                self.grid.set(next.x, next.y, Cell::Trail);
                false
            }
            Cell::Land => {
                if self.grid.has_trail() {
                    if self.close_trail() {
                        // Level advanced, everything reinitialized
                        return true;
                    }
                    if self.config.stop_on_land {
                        self.player.velocity = (0, 0);
                        self.player.queued = None;
                    }
                }
                self.player.position = next;
                false
            }
        }
    }

    /// Capture the region closed by the trail. Returns true when the land
    /// percentage reached the target and the level advanced.
    fn close_trail(&mut self) -> bool {
        let seeds: Vec<Position> = self
            .sea_enemies
            .iter()
            .map(SeaEnemy::cell)
            .chain(self.land_enemies.iter().map(|e| e.position))
            .collect();
        let captured = capture::capture_region(&mut self.grid, &seeds);
        self.score += captured as u32 * CAPTURE_SCORE;

        if self.grid.percent_land() >= self.config.target_percent {
            self.score += self.level * LEVEL_BONUS;
            self.level += 1;
            self.init_level();
            return true;
        }
        false
    }

    /// Returns true when a land enemy caught the player.
    fn step_land_enemies(&mut self) -> bool {
        let player_cell = self.player.position;
        let mut hit_player = false;
        for i in 0..self.land_enemies.len() {
            let (dx, dy) = self.land_enemies[i].heading.delta();
            let ahead = self.land_enemies[i].position.offset(dx, dy);
            if self.grid.in_bounds(ahead.x, ahead.y) && self.grid.is_land(ahead.x, ahead.y) {
                self.land_enemies[i].position = ahead;
            } else {
                let mut dirs = Direction::CARDINALS;
                dirs.shuffle(&mut self.rng);
                let reverse = self.land_enemies[i].heading.opposite();
                for dir in dirs {
                    if dir == reverse {
                        continue;
                    }
                    let (dx, dy) = dir.delta();
                    let dest = self.land_enemies[i].position.offset(dx, dy);
                    if self.grid.in_bounds(dest.x, dest.y) && self.grid.is_land(dest.x, dest.y) {
                        self.land_enemies[i].heading = dir;
                        self.land_enemies[i].position = dest;
                        break;
                    }
                }
                // No open heading: stationary this tick
            }
            if self.land_enemies[i].position == player_cell {
                hit_player = true;
            }
        }
        if hit_player {
            self.handle_death();
        }
        hit_player
    }

    fn step_sea_enemies(&mut self) {
        let speed = self.speed_factor();
        let mut hit_trail = false;
        let grid = &self.grid;
        for e in &mut self.sea_enemies {
            let next_x = e.x + e.dx * speed;
            let next_y = e.y + e.dy * speed;
            let gx = next_x.floor() as i32;
            let gy = next_y.floor() as i32;
            let cur = e.cell();

            // Axis-independent bounce. The cross-axis lookup deliberately
            // uses the CURRENT row/column, which can let an enemy clip past
            // a one-cell Land corner. Known quirk, kept for compatibility.
            if gx < 0 || gx >= grid.cols() || grid.get(gx, cur.y) == Cell::Land {
                e.dx = -e.dx;
            }
            if gy < 0 || gy >= grid.rows() || grid.get(cur.x, gy) == Cell::Land {
                e.dy = -e.dy;
            }

            e.x += e.dx * speed;
            e.y += e.dy * speed;

            let cell = e.cell();
            if grid.get(cell.x, cell.y) == Cell::Trail {
                hit_trail = true;
            }
        }
        // One death event per frame, however many enemies touched the trail
        if hit_trail {
            self.handle_death();
        }
    }

    fn speed_factor(&self) -> f64 {
        1.0 + ((self.level - 1) / 5) as f64 * 0.1
    }

    /// Death event: lose a life, revert the trail to Sea, respawn the player
    /// at the start corner with a fresh clock. Captured Land is kept.
    fn handle_death(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.grid.trail_to_sea();
        self.player = Player::new(0, 0);
        self.time_left = self.config.time_limit;
        if self.lives == 0 {
            self.game_over = true;
        }
    }
}

/// Read-only view of the simulation for the presentation adapter.
pub struct Snapshot<'a> {
    game: &'a Game,
}

impl<'a> Snapshot<'a> {
    pub fn cols(&self) -> i32 {
        self.game.grid.cols()
    }

    pub fn rows(&self) -> i32 {
        self.game.grid.rows()
    }

    /// Out-of-range coordinates read as Land, like `Grid::get`.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.game.grid.get(x, y)
    }

    pub fn player(&self) -> Position {
        self.game.player.position
    }

    pub fn sea_enemies(&self) -> &[SeaEnemy] {
        &self.game.sea_enemies
    }

    pub fn land_enemies(&self) -> &[LandEnemy] {
        &self.game.land_enemies
    }

    pub fn lives(&self) -> u32 {
        self.game.lives
    }

    pub fn score(&self) -> u32 {
        self.game.score
    }

    pub fn level(&self) -> u32 {
        self.game.level
    }

    pub fn time_left(&self) -> i32 {
        self.game.time_left.max(0)
    }

    pub fn percent_captured(&self) -> u32 {
        self.game.grid.percent_land()
    }

    pub fn target_percent(&self) -> u32 {
        self.game.config.target_percent
    }

    pub fn is_game_over(&self) -> bool {
        self.game.game_over
    }
}
