use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use server::gateway::Gateway;
use server::network::Server;
use server::world::{World, WorldConfig};
use shared::{FOOD_COUNT, TICK_RATE, WORLD_SIZE};
use std::time::Duration;

/// Authoritative server for the multiplayer snake arena
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Tick rate (updates per second)
    #[arg(short, long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Maximum number of concurrent clients
    #[arg(short, long, default_value = "32")]
    max_clients: usize,

    /// Number of food items kept in the world
    #[arg(long, default_value_t = FOOD_COUNT)]
    food_count: usize,

    /// Side length of the square world
    #[arg(long, default_value_t = WORLD_SIZE, value_parser = parse_world_size)]
    world_size: f32,

    /// Seed for colours and food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Accepts only finite, positive world sizes
fn parse_world_size(value: &str) -> Result<f32, String> {
    let size: f32 = value
        .parse()
        .map_err(|e| format!("invalid world size '{}': {}", value, e))?;
    if !size.is_finite() || size <= 0.0 {
        return Err(format!("world size must be a positive number, got {}", value));
    }
    Ok(size)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let config = WorldConfig {
        world_size: args.world_size,
        food_count: args.food_count,
        ..WorldConfig::default()
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        "World {}x{} with {} food, {} Hz",
        config.world_size, config.world_size, config.food_count, args.tick_rate
    );

    let world = World::new(config, rng)?;

    let address = format!("{}:{}", args.host, args.port);
    let tick_duration = Duration::from_secs_f64(1.0 / args.tick_rate.max(1) as f64);
    let mut server = Server::new(
        &address,
        tick_duration,
        args.max_clients,
        Gateway::new(world),
    )
    .await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
