//! Authoritative arena simulation
//!
//! The [`World`] owns every player and food item. It is advanced once per
//! server tick and exposes a handful of mutation entry points (join, steer,
//! leave, start) plus a read-only [`Snapshot`] for broadcasting.
//!
//! Collisions between snake segments use exact coordinate equality rather
//! than circle overlap. Heads move in fixed axis-aligned steps, so two chains
//! only "touch" when a head lands precisely on another segment.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{
    wrap_coordinate, Direction, Food, Player, PlayerId, Snapshot, FOOD_COUNT, INITIAL_SEGMENTS,
    INITIAL_SPEED, SCORE_PER_FOOD, SEGMENT_RADIUS, SEGMENT_SPACING, SPAWN_POINT, WORLD_SIZE,
};
use std::collections::BTreeMap;

/// Tunable world parameters. `Default` yields the standard arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Side length of the square, wrapping world
    pub world_size: f32,
    /// Number of food items kept on the map
    pub food_count: usize,
    pub initial_speed: f32,
    pub initial_segments: usize,
    pub segment_spacing: f32,
    pub segment_radius: f32,
    pub spawn: (f32, f32),
    pub score_per_food: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            food_count: FOOD_COUNT,
            initial_speed: INITIAL_SPEED,
            initial_segments: INITIAL_SEGMENTS,
            segment_spacing: SEGMENT_SPACING,
            segment_radius: SEGMENT_RADIUS,
            spawn: SPAWN_POINT,
            score_per_food: SCORE_PER_FOOD,
        }
    }
}

impl WorldConfig {
    /// Checks the parameters that food placement and wrapping depend on.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(format!("world size must be positive, got {}", self.world_size).into());
        }
        Ok(())
    }
}

/// A single food item eaten during a tick, with the eater's new score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumption {
    pub player_id: PlayerId,
    pub score: u32,
}

/// Everything observable that happened during one `advance()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub consumptions: Vec<Consumption>,
    pub deaths: Vec<PlayerId>,
}

impl TickOutcome {
    pub fn is_empty(&self) -> bool {
        self.consumptions.is_empty() && self.deaths.is_empty()
    }
}

pub struct World<R: Rng = StdRng> {
    config: WorldConfig,
    players: BTreeMap<PlayerId, Player>,
    foods: Vec<Food>,
    started: bool,
    tick: u32,
    rng: R,
}

impl World<StdRng> {
    /// Creates a world whose randomness is fully determined by `seed`.
    pub fn with_seed(
        config: WorldConfig,
        seed: u64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        World::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> World<R> {
    /// Creates an unstarted world and scatters the initial food.
    ///
    /// Fails if `config` describes an empty or non-finite arena.
    pub fn new(config: WorldConfig, rng: R) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;

        let mut world = Self {
            config,
            players: BTreeMap::new(),
            foods: Vec::with_capacity(config.food_count),
            started: false,
            tick: 0,
            rng,
        };
        world.generate_food();
        Ok(world)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Spawns a new player at the spawn point. Duplicate ids are ignored.
    pub fn join(&mut self, id: PlayerId) -> Option<&Player> {
        if self.players.contains_key(&id) {
            debug!("Ignoring duplicate join for player {}", id);
            return None;
        }

        let hue: f32 = self.rng.gen_range(0.0..360.0);
        let player = Player::spawn(
            id,
            self.config.spawn,
            Direction::default(),
            self.config.initial_segments,
            self.config.segment_spacing,
            self.config.segment_radius,
            self.config.initial_speed,
            format!("hsl({:.1}, 100%, 50%)", hue),
        );

        info!(
            "Player {} joined at ({}, {})",
            id, self.config.spawn.0, self.config.spawn.1
        );
        self.players.insert(id, player);
        self.players.get(&id)
    }

    /// Registers a pre-built player. Returns false if the id is taken.
    pub fn insert_player(&mut self, player: Player) -> bool {
        if self.players.contains_key(&player.id) || player.segments.is_empty() {
            return false;
        }
        self.players.insert(player.id, player);
        true
    }

    /// Changes a player's heading for the next tick. Unknown ids are ignored.
    pub fn set_direction(&mut self, id: PlayerId, direction: Direction) -> bool {
        match self.players.get_mut(&id) {
            Some(player) => {
                player.direction = direction;
                true
            }
            None => false,
        }
    }

    pub fn leave(&mut self, id: PlayerId) -> Option<Player> {
        let removed = self.players.remove(&id);
        if removed.is_some() {
            info!("Player {} left", id);
        }
        removed
    }

    /// Opens the world for simulation. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        info!("Game started with {} players", self.players.len());
        true
    }

    /// Replaces the food set, dropping duplicate positions.
    pub fn set_foods(&mut self, foods: impl IntoIterator<Item = Food>) {
        self.foods.clear();
        for food in foods {
            if !self.foods.contains(&food) {
                self.foods.push(food);
            }
        }
    }

    /// Runs one simulation step. Does nothing until the world is started.
    pub fn advance(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.started {
            return outcome;
        }

        self.move_players();

        let ids: Vec<PlayerId> = self.players.keys().copied().collect();
        for id in ids {
            // An earlier player in this tick may already have been removed
            if !self.players.contains_key(&id) {
                continue;
            }

            self.consume_food(id, &mut outcome);

            if self.hits_itself(id) || self.hits_other_player(id) {
                self.players.remove(&id);
                info!("Player {} died", id);
                outcome.deaths.push(id);
            }
        }

        self.tick = self.tick.wrapping_add(1);
        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            players: self
                .players
                .iter()
                .map(|(id, player)| (*id, player.clone()))
                .collect(),
            foods: self.foods.clone(),
        }
    }

    fn move_players(&mut self) {
        let size = self.config.world_size;

        for player in self.players.values_mut() {
            let (dx, dy) = player.direction.delta(player.speed);
            let head = player.segments[0];

            // Each body segment takes the spot of the one ahead of it
            for i in (1..player.segments.len()).rev() {
                player.segments[i] = player.segments[i - 1];
            }

            player.segments[0].x = wrap_coordinate(head.x + dx, size);
            player.segments[0].y = wrap_coordinate(head.y + dy, size);
        }
    }

    fn consume_food(&mut self, id: PlayerId, outcome: &mut TickOutcome) {
        let Some(player) = self.players.get_mut(&id) else {
            return;
        };
        let head = player.segments[0];

        let eaten: Vec<Food> = self
            .foods
            .iter()
            .filter(|food| head.distance_to(food.x, food.y) < head.radius)
            .copied()
            .collect();
        if eaten.is_empty() {
            return;
        }

        for food in eaten {
            self.foods.retain(|existing| *existing != food);

            player.score += self.config.score_per_food;
            if let Some(tail) = player.segments.last().copied() {
                player.segments.push(tail);
            }

            outcome.consumptions.push(Consumption {
                player_id: id,
                score: player.score,
            });
            debug!(
                "Player {} ate food at ({:.1}, {:.1}), score {}",
                id, food.x, food.y, player.score
            );
        }

        self.generate_food();
    }

    fn hits_itself(&self, id: PlayerId) -> bool {
        self.players.get(&id).map_or(false, |player| {
            let head = player.head();
            player.segments[1..]
                .iter()
                .any(|segment| head.same_position(segment))
        })
    }

    fn hits_other_player(&self, id: PlayerId) -> bool {
        let Some(player) = self.players.get(&id) else {
            return false;
        };
        let head = player.head();

        self.players
            .iter()
            .filter(|(other_id, _)| **other_id != id)
            .any(|(_, other)| {
                other
                    .segments
                    .iter()
                    .any(|segment| head.same_position(segment))
            })
    }

    /// Tops the food set back up to the configured count.
    fn generate_food(&mut self) {
        let size = self.config.world_size;
        while self.foods.len() < self.config.food_count {
            let x = self.rng.gen_range(0.0..size);
            let y = self.rng.gen_range(0.0..size);
            let food = Food::new(x, y);
            if !self.foods.contains(&food) {
                self.foods.push(food);
            }
        }
    }
}
