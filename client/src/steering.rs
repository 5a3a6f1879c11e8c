//! Autopilot for headless clients: chase the closest food without ever
//! asking for an instant reversal.

use shared::{wrapped_delta, Direction, Food, Segment};

/// Picks the direction that moves `head` toward the nearest food.
///
/// Distances are measured on the torus, so food just across an edge counts
/// as close. Keeps `current` when there is no food.
pub fn choose_direction(
    head: &Segment,
    foods: &[Food],
    current: Direction,
    world_size: f32,
) -> Direction {
    let nearest = foods
        .iter()
        .map(|food| {
            let dx = wrapped_delta(head.x, food.x, world_size);
            let dy = wrapped_delta(head.y, food.y, world_size);
            (dx, dy)
        })
        .min_by(|a, b| {
            let da = a.0 * a.0 + a.1 * a.1;
            let db = b.0 * b.0 + b.1 * b.1;
            da.total_cmp(&db)
        });

    let Some((dx, dy)) = nearest else {
        return current;
    };

    let horizontal = if dx >= 0.0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let vertical = if dy >= 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };

    let (preferred, fallback) = if dx.abs() >= dy.abs() {
        (horizontal, vertical)
    } else {
        (vertical, horizontal)
    };

    if preferred != current.opposite() {
        preferred
    } else if fallback != current.opposite() {
        fallback
    } else {
        current
    }
}
