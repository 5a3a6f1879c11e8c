//! Types shared between the arena server and its clients: wire packets,
//! the snake/food data model and the gameplay constants.

use serde::{Deserialize, Serialize};

pub const WORLD_SIZE: f32 = 5000.0;
pub const FOOD_COUNT: usize = 100;
pub const TICK_RATE: u32 = 60;
pub const INITIAL_SPEED: f32 = 2.0;
pub const INITIAL_SEGMENTS: usize = 3;
pub const SEGMENT_SPACING: f32 = 10.0;
pub const SEGMENT_RADIUS: f32 = 5.0;
pub const SPAWN_POINT: (f32, f32) = (250.0, 250.0);
pub const SCORE_PER_FOOD: u32 = 10;
pub const CLIENT_VERSION: u32 = 1;
/// Seconds of silence before the server drops a session.
pub const CLIENT_TIMEOUT_SECS: u64 = 5;

/// Session-derived player identity, assigned by the server.
pub type PlayerId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Packet {
    Connect {
        client_version: u32,
    },
    MoveDirection {
        direction: Direction,
    },
    /// Continuous heading in radians, screen convention (positive y points down).
    Steer {
        angle: f32,
    },
    StartGame,
    Heartbeat,
    Disconnect,

    PlayerAssigned {
        player_id: PlayerId,
    },
    GameState(Snapshot),
    ScoreUpdate {
        player_id: PlayerId,
        score: u32,
    },
    PlayerDied {
        player_id: PlayerId,
    },
    Disconnected {
        reason: String,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Axis-aligned movement for one tick at the given speed.
    pub fn delta(self, speed: f32) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -speed),
            Direction::Down => (0.0, speed),
            Direction::Left => (-speed, 0.0),
            Direction::Right => (speed, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Snaps a heading to the closest cardinal direction.
    ///
    /// Ties on the diagonals resolve to the horizontal axis. Returns `None`
    /// for NaN or infinite input so callers can reject it.
    pub fn from_angle(angle: f32) -> Option<Direction> {
        if !angle.is_finite() {
            return None;
        }

        let (sin, cos) = angle.sin_cos();
        let direction = if cos.abs() >= sin.abs() {
            if cos >= 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if sin > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}

/// One circle of a snake body. Index 0 of a player's chain is the head.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Segment {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Exact coordinate equality, ignoring radius.
    pub fn same_position(&self, other: &Segment) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub segments: Vec<Segment>,
    pub direction: Direction,
    pub speed: f32,
    pub score: u32,
    pub color: String,
    pub name: String,
}

impl Player {
    /// Builds a fresh player whose body trails behind `head` opposite to
    /// `direction`, `spacing` units per segment.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        id: PlayerId,
        head: (f32, f32),
        direction: Direction,
        segment_count: usize,
        spacing: f32,
        radius: f32,
        speed: f32,
        color: String,
    ) -> Self {
        let (step_x, step_y) = direction.opposite().delta(spacing);
        let segments = (0..segment_count.max(1))
            .map(|i| {
                let i = i as f32;
                Segment::new(head.0 + step_x * i, head.1 + step_y * i, radius)
            })
            .collect();

        Self {
            id,
            segments,
            direction,
            speed,
            score: 0,
            color,
            name: display_name(id),
        }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Short label for a player: the first four characters of the id.
pub fn display_name(id: PlayerId) -> String {
    let short: String = id.to_string().chars().take(4).collect();
    format!("Player {}", short)
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Food {
    pub x: f32,
    pub y: f32,
}

impl Food {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Point-in-time copy of the world, as broadcast to every client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub tick: u32,
    pub players: Vec<(PlayerId, Player)>,
    pub foods: Vec<Food>,
}

impl Snapshot {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players
            .iter()
            .find(|(player_id, _)| *player_id == id)
            .map(|(_, player)| player)
    }
}

/// Wraps a coordinate onto the torus `[0, size)`.
pub fn wrap_coordinate(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed offset from `from` to `to` on a wrapped axis.
pub fn wrapped_delta(from: f32, to: f32, size: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(size);
    if delta > size / 2.0 {
        delta -= size;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    const ALL_DIRECTIONS: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(2.0), (0.0, -2.0));
        assert_eq!(Direction::Down.delta(2.0), (0.0, 2.0));
        assert_eq!(Direction::Left.delta(2.0), (-2.0, 0.0));
        assert_eq!(Direction::Right.delta(2.0), (2.0, 0.0));
    }

    #[test]
    fn test_direction_opposite() {
        for direction in ALL_DIRECTIONS {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
    }

    #[test]
    fn test_direction_from_angle() {
        assert_eq!(Direction::from_angle(0.0), Some(Direction::Right));
        assert_eq!(Direction::from_angle(FRAC_PI_2), Some(Direction::Down));
        assert_eq!(Direction::from_angle(-FRAC_PI_2), Some(Direction::Up));
        assert_eq!(Direction::from_angle(PI), Some(Direction::Left));
        assert_eq!(Direction::from_angle(-PI), Some(Direction::Left));
        assert_eq!(Direction::from_angle(0.3), Some(Direction::Right));
        assert_eq!(Direction::from_angle(1.3), Some(Direction::Down));
        assert_eq!(Direction::from_angle(2.0 * PI + 0.1), Some(Direction::Right));
    }

    #[test]
    fn test_direction_from_non_finite_angle() {
        assert_eq!(Direction::from_angle(f32::NAN), None);
        assert_eq!(Direction::from_angle(f32::INFINITY), None);
        assert_eq!(Direction::from_angle(f32::NEG_INFINITY), None);
    }

    #[test]
    fn test_direction_from_near_diagonal() {
        assert_eq!(Direction::from_angle(PI / 4.0 + 0.01), Some(Direction::Down));
        assert_eq!(Direction::from_angle(-PI / 4.0 - 0.01), Some(Direction::Up));
        assert_eq!(Direction::from_angle(3.0 * PI / 4.0 - 0.01), Some(Direction::Down));
    }

    #[test]
    fn test_player_spawn_layout() {
        let player = Player::spawn(
            7,
            SPAWN_POINT,
            Direction::Right,
            INITIAL_SEGMENTS,
            SEGMENT_SPACING,
            SEGMENT_RADIUS,
            INITIAL_SPEED,
            "hsl(0, 100%, 50%)".to_string(),
        );

        assert_eq!(player.len(), 3);
        assert_eq!(player.segments[0], Segment::new(250.0, 250.0, 5.0));
        assert_eq!(player.segments[1], Segment::new(240.0, 250.0, 5.0));
        assert_eq!(player.segments[2], Segment::new(230.0, 250.0, 5.0));
        assert_eq!(player.score, 0);
        assert_eq!(player.name, "Player 7");
    }

    #[test]
    fn test_player_spawn_never_empty() {
        let player = Player::spawn(1, (0.0, 0.0), Direction::Up, 0, 10.0, 5.0, 2.0, String::new());
        assert_eq!(player.len(), 1);
        assert!(!player.is_empty());
    }

    #[test]
    fn test_display_name_truncates() {
        assert_eq!(display_name(123456), "Player 1234");
        assert_eq!(display_name(42), "Player 42");
    }

    #[test]
    fn test_segment_same_position_ignores_radius() {
        let a = Segment::new(10.0, 20.0, 5.0);
        let b = Segment::new(10.0, 20.0, 8.0);
        let c = Segment::new(10.0, 20.5, 5.0);
        assert!(a.same_position(&b));
        assert!(!a.same_position(&c));
    }

    #[test]
    fn test_segment_distance() {
        let segment = Segment::new(0.0, 0.0, 5.0);
        assert_approx_eq!(segment.distance_to(3.0, 4.0), 5.0, 1e-6);
    }

    #[test]
    fn test_wrap_coordinate() {
        assert_eq!(wrap_coordinate(WORLD_SIZE - 1.0 + 2.0, WORLD_SIZE), 1.0);
        assert_eq!(wrap_coordinate(-2.0, WORLD_SIZE), WORLD_SIZE - 2.0);
        assert_eq!(wrap_coordinate(WORLD_SIZE, WORLD_SIZE), 0.0);
        assert_eq!(wrap_coordinate(123.0, WORLD_SIZE), 123.0);

        let tiny = wrap_coordinate(-1e-10, WORLD_SIZE);
        assert!((0.0..WORLD_SIZE).contains(&tiny));
    }

    #[test]
    fn test_wrapped_delta_takes_short_way() {
        assert_eq!(wrapped_delta(4990.0, 10.0, WORLD_SIZE), 20.0);
        assert_eq!(wrapped_delta(10.0, 4990.0, WORLD_SIZE), -20.0);
        assert_eq!(wrapped_delta(100.0, 300.0, WORLD_SIZE), 200.0);
    }

    #[test]
    fn test_snapshot_player_lookup() {
        let player =
            Player::spawn(3, (1.0, 1.0), Direction::Down, 2, 10.0, 5.0, 2.0, String::new());
        let snapshot = Snapshot {
            tick: 1,
            players: vec![(3, player.clone())],
            foods: vec![Food::new(5.0, 5.0)],
        };

        assert_eq!(snapshot.player(3), Some(&player));
        assert_eq!(snapshot.player(4), None);
    }

    #[test]
    fn test_packet_serialization_game_state() {
        let player = Player::spawn(
            1,
            SPAWN_POINT,
            Direction::Right,
            INITIAL_SEGMENTS,
            SEGMENT_SPACING,
            SEGMENT_RADIUS,
            INITIAL_SPEED,
            "hsl(120, 100%, 50%)".to_string(),
        );
        let packet = Packet::GameState(Snapshot {
            tick: 42,
            players: vec![(1, player)],
            foods: vec![Food::new(1.5, 2.5), Food::new(3.0, 4.0)],
        });

        let serialized = bincode::serialize(&packet).unwrap();
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Packet::GameState(snapshot) => {
                assert_eq!(snapshot.tick, 42);
                assert_eq!(snapshot.players.len(), 1);
                assert_eq!(snapshot.players[0].1.segments.len(), 3);
                assert_eq!(snapshot.foods[1], Food::new(3.0, 4.0));
            }
            _ => panic!("Wrong packet type after deserialization"),
        }
    }

    #[test]
    fn test_unknown_direction_variant_is_rejected() {
        let mut bytes = bincode::serialize(&Packet::MoveDirection {
            direction: Direction::Up,
        })
        .unwrap();
        // Direction is the trailing u32 variant tag; 9 is not a direction.
        let len = bytes.len();
        bytes[len - 4..].copy_from_slice(&9u32.to_le_bytes());

        let result: Result<Packet, _> = bincode::deserialize(&bytes);
        assert!(result.is_err());
    }
}
