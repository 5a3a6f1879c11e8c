//! Performance benchmarks for the simulation hot paths

use server::gateway::Gateway;
use server::world::{World, WorldConfig};
use shared::{Direction, Packet, Player, Segment};
use std::time::Instant;

fn crowded_world(players: u32) -> World {
    let mut world = World::with_seed(WorldConfig::default(), 1234).unwrap();
    for id in 1..=players {
        let y = 20.0 + id as f32 * 40.0;
        let mut player =
            Player::spawn(id, (100.0, y), Direction::Right, 1, 10.0, 5.0, 2.0, String::new());
        player.segments = (0..20)
            .map(|i| Segment::new(100.0 - i as f32 * 2.0, y, 5.0))
            .collect();
        world.insert_player(player);
    }
    world.start();
    world
}

/// Benchmarks a full tick with many long snakes
#[test]
fn benchmark_world_advance() {
    let mut world = crowded_world(50);

    let iterations = 1000;
    let start = Instant::now();

    for _ in 0..iterations {
        world.advance();
    }

    let duration = start.elapsed();
    println!(
        "World advance: {} ticks in {:?} ({:.2} μs/tick)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Generous bound: well under real time even in debug builds
    assert!(duration.as_secs() < 10);
}

/// Benchmarks snapshot encoding as sent on every tick
#[test]
fn benchmark_snapshot_serialization() {
    let world = crowded_world(50);

    let iterations = 1000;
    let start = Instant::now();
    let mut bytes = 0;

    for _ in 0..iterations {
        let packet = Packet::GameState(world.snapshot());
        bytes = bincode::serialize(&packet).unwrap().len();
    }

    let duration = start.elapsed();
    println!(
        "Snapshot serialization: {} iterations in {:?}, {} bytes each",
        iterations, duration, bytes
    );

    // A 50-player snapshot still fits in a single UDP datagram
    assert!(bytes < 65_507);
    assert!(duration.as_secs() < 10);
}

/// Benchmarks the gateway tick including message fan-out
#[test]
fn benchmark_gateway_tick() {
    let mut gateway = Gateway::new(crowded_world(20));

    let iterations = 1000;
    let start = Instant::now();
    let mut messages = 0;

    for _ in 0..iterations {
        messages += gateway.tick().len();
    }

    let duration = start.elapsed();
    println!(
        "Gateway tick: {} ticks, {} messages in {:?}",
        iterations, messages, duration
    );

    assert!(messages >= iterations);
    assert!(duration.as_secs() < 10);
}
