//! Session gateway between connected clients and the world simulation
//!
//! The gateway owns the single [`World`] and translates per-session events
//! (connect, input packets, disconnect, timer ticks) into world calls. It
//! never touches sockets: every call returns the [`Outgoing`] messages the
//! transport should deliver, either to one session or to all of them.
//!
//! Input is validated here before it reaches the simulation, so the world
//! can assume well-formed directions.

use crate::world::World;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use shared::{Direction, Packet, PlayerId};

/// A packet the transport must deliver
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// Emit to a single session
    Unicast { client_id: u32, packet: Packet },
    /// Emit to every connected session
    Broadcast { packet: Packet },
}

pub struct Gateway<R: Rng = StdRng> {
    world: World<R>,
}

impl<R: Rng> Gateway<R> {
    pub fn new(world: World<R>) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &World<R> {
        &self.world
    }

    /// Joins the session's player and tells that session who it is.
    ///
    /// Session ids double as player ids, so a repeated connect for the same
    /// id keeps the existing player and just repeats the assignment.
    pub fn connect(&mut self, client_id: u32) -> Outgoing {
        let player_id = player_id_for(client_id);
        self.world.join(player_id);

        Outgoing::Unicast {
            client_id,
            packet: Packet::PlayerAssigned { player_id },
        }
    }

    /// Applies one client packet. Packets that carry no gameplay meaning
    /// are left to the transport layer.
    pub fn handle_packet(&mut self, client_id: u32, packet: Packet) {
        let player_id = player_id_for(client_id);

        match packet {
            Packet::MoveDirection { direction } => {
                self.world.set_direction(player_id, direction);
            }
            Packet::Steer { angle } => match Direction::from_angle(angle) {
                Some(direction) => {
                    self.world.set_direction(player_id, direction);
                }
                None => warn!(
                    "Rejected steering angle {} from client {}",
                    angle, client_id
                ),
            },
            Packet::StartGame => {
                if self.world.start() {
                    debug!("Client {} started the game", client_id);
                }
            }
            other => {
                debug!("Gateway ignoring {:?} from client {}", other, client_id);
            }
        }
    }

    pub fn disconnect(&mut self, client_id: u32) {
        self.world.leave(player_id_for(client_id));
    }

    /// Advances the world and produces this tick's broadcasts: score
    /// updates and deaths first, then the full state.
    pub fn tick(&mut self) -> Vec<Outgoing> {
        if !self.world.is_started() {
            return Vec::new();
        }

        let outcome = self.world.advance();
        let mut messages =
            Vec::with_capacity(outcome.consumptions.len() + outcome.deaths.len() + 1);

        for consumption in outcome.consumptions {
            messages.push(Outgoing::Broadcast {
                packet: Packet::ScoreUpdate {
                    player_id: consumption.player_id,
                    score: consumption.score,
                },
            });
        }

        for player_id in outcome.deaths {
            messages.push(Outgoing::Broadcast {
                packet: Packet::PlayerDied { player_id },
            });
        }

        messages.push(Outgoing::Broadcast {
            packet: Packet::GameState(self.world.snapshot()),
        });

        messages
    }
}

fn player_id_for(client_id: u32) -> PlayerId {
    client_id
}
