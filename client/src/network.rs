use crate::steering::choose_direction;
use crate::view::ClientView;
use bincode::{deserialize, serialize};
use log::{error, info, warn};
use shared::{Packet, CLIENT_VERSION, WORLD_SIZE};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::interval;

/// Headless arena client: mirrors server state and optionally steers itself.
pub struct Client {
    socket: UdpSocket,
    server_addr: SocketAddr,
    view: ClientView,
    start_game: bool,
    autopilot: bool,
}

impl Client {
    pub async fn new(
        server_addr: &str,
        start_game: bool,
        autopilot: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        let server_addr = server_addr.parse()?;

        Ok(Client {
            socket,
            server_addr,
            view: ClientView::new(),
            start_game,
            autopilot,
        })
    }

    pub fn view(&self) -> &ClientView {
        &self.view
    }

    async fn send_packet(&self, packet: &Packet) -> Result<(), Box<dyn std::error::Error>> {
        let data = serialize(packet)?;
        self.socket.send_to(&data, self.server_addr).await?;
        Ok(())
    }

    async fn handle_packet(&mut self, packet: Packet) -> Result<(), Box<dyn std::error::Error>> {
        let assigned = matches!(packet, Packet::PlayerAssigned { .. });
        let state_update = matches!(packet, Packet::GameState(_));

        self.view.apply(packet);

        if assigned && self.start_game {
            info!("Requesting game start");
            self.send_packet(&Packet::StartGame).await?;
        }

        if state_update && self.autopilot && self.view.alive {
            self.steer().await?;
        }

        Ok(())
    }

    /// Sends a new heading if the autopilot wants to turn.
    async fn steer(&self) -> Result<(), Box<dyn std::error::Error>> {
        let (Some(player), Some(snapshot)) = (self.view.own_player(), self.view.latest.as_ref())
        else {
            return Ok(());
        };

        let direction = choose_direction(
            player.head(),
            &snapshot.foods,
            player.direction,
            WORLD_SIZE,
        );
        if direction != player.direction {
            self.send_packet(&Packet::MoveDirection { direction }).await?;
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Connecting to {}...", self.server_addr);
        self.send_packet(&Packet::Connect {
            client_version: CLIENT_VERSION,
        })
        .await?;

        let mut heartbeat = interval(Duration::from_secs(1));
        let mut buffer = vec![0u8; 65536];

        loop {
            tokio::select! {
                result = self.socket.recv_from(&mut buffer) => {
                    match result {
                        Ok((len, _)) => match deserialize::<Packet>(&buffer[0..len]) {
                            Ok(packet) => {
                                let rejected = matches!(packet, Packet::Disconnected { .. });
                                self.handle_packet(packet).await?;
                                if rejected {
                                    return Ok(());
                                }
                            }
                            Err(e) => warn!("Failed to decode packet: {}", e),
                        },
                        Err(e) => error!("Error receiving packet: {}", e),
                    }
                },

                _ = heartbeat.tick() => {
                    self.send_packet(&Packet::Heartbeat).await?;
                },

                _ = tokio::signal::ctrl_c() => {
                    info!("Leaving with score {}", self.view.score);
                    self.send_packet(&Packet::Disconnect).await?;
                    return Ok(());
                },
            }
        }
    }
}
