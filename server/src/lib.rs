//! # Arena Server Library
//!
//! This library provides the authoritative server for the multiplayer snake
//! arena. It owns the single shared world, applies client input, advances the
//! simulation at a fixed tick rate and broadcasts the result to every client.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! The world decides everything: where heads move, which food is eaten and
//! who dies. Clients only send intentions (a direction, a start request) and
//! render whatever state the server broadcasts.
//!
//! ### Session Management
//! Each UDP peer that sends `Connect` becomes a session whose id is also its
//! player identity. Sessions end on `Disconnect` or after a few seconds of
//! silence. A player that dies stays dead; reconnecting yields a new player.
//!
//! ### State Broadcasting
//! Once any client has started the game, every tick produces score updates,
//! death notices and a full snapshot, all sent to every connected session.
//!
//! ## Module Organization
//!
//! ### World Module (`world`)
//! The simulation proper:
//! - Player spawning, steering and removal
//! - Toroidal movement with snake-style body following
//! - Food consumption, growth and food regeneration
//! - Exact-position self and inter-player collisions
//!
//! ### Gateway Module (`gateway`)
//! Maps session events onto world calls and turns each tick's outcome into
//! outgoing unicast/broadcast messages. Malformed input stops here.
//!
//! ### Client Manager Module (`client_manager`)
//! Session bookkeeping: id assignment, address lookup, capacity and timeouts.
//!
//! ### Network Module (`network`)
//! UDP socket tasks, bincode encoding and the main `select!` loop that
//! serializes every world mutation onto one task.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::gateway::Gateway;
//! use server::network::Server;
//! use server::world::{World, WorldConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let world = World::with_seed(WorldConfig::default(), 42)?;
//!     let mut server = Server::new(
//!         "127.0.0.1:8080",
//!         Duration::from_millis(16), // ~60Hz
//!         32,
//!         Gateway::new(world),
//!     )
//!     .await?;
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod client_manager;
pub mod gateway;
pub mod network;
pub mod world;
