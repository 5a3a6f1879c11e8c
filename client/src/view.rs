use log::{debug, info};
use shared::{Packet, Player, PlayerId, Snapshot};

/// Local mirror of what the server has told this client.
#[derive(Debug, Default)]
pub struct ClientView {
    pub player_id: Option<PlayerId>,
    pub latest: Option<Snapshot>,
    pub score: u32,
    pub alive: bool,
    /// Every death announced since we connected, in arrival order
    pub deaths: Vec<PlayerId>,
}

impl ClientView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one server packet into the view.
    pub fn apply(&mut self, packet: Packet) {
        match packet {
            Packet::PlayerAssigned { player_id } => {
                info!("Assigned player {}", player_id);
                self.player_id = Some(player_id);
                self.alive = true;
                self.score = 0;
            }
            Packet::GameState(snapshot) => {
                self.latest = Some(snapshot);
            }
            Packet::ScoreUpdate { player_id, score } => {
                if self.is_me(player_id) {
                    self.score = score;
                }
                debug!("Player {} score {}", player_id, score);
            }
            Packet::PlayerDied { player_id } => {
                if self.is_me(player_id) {
                    info!("We died with score {}", self.score);
                    self.alive = false;
                }
                self.deaths.push(player_id);
            }
            Packet::Disconnected { reason } => {
                info!("Disconnected by server: {}", reason);
                self.player_id = None;
                self.alive = false;
            }
            other => debug!("Ignoring {:?}", other),
        }
    }

    pub fn own_player(&self) -> Option<&Player> {
        let id = self.player_id?;
        self.latest.as_ref()?.player(id)
    }

    pub fn tick(&self) -> u32 {
        self.latest.as_ref().map_or(0, |snapshot| snapshot.tick)
    }

    fn is_me(&self, player_id: PlayerId) -> bool {
        self.player_id == Some(player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Direction, Food};

    fn snapshot_with(id: PlayerId) -> Snapshot {
        let player =
            Player::spawn(id, (10.0, 10.0), Direction::Right, 3, 10.0, 5.0, 2.0, String::new());
        Snapshot {
            tick: 7,
            players: vec![(id, player)],
            foods: vec![Food::new(1.0, 1.0)],
        }
    }

    #[test]
    fn test_assignment_and_state() {
        let mut view = ClientView::new();
        assert!(view.own_player().is_none());

        view.apply(Packet::PlayerAssigned { player_id: 3 });
        view.apply(Packet::GameState(snapshot_with(3)));

        assert!(view.alive);
        assert_eq!(view.tick(), 7);
        assert_eq!(view.own_player().unwrap().id, 3);
    }

    #[test]
    fn test_score_only_tracks_own_player() {
        let mut view = ClientView::new();
        view.apply(Packet::PlayerAssigned { player_id: 3 });

        view.apply(Packet::ScoreUpdate {
            player_id: 4,
            score: 50,
        });
        assert_eq!(view.score, 0);

        view.apply(Packet::ScoreUpdate {
            player_id: 3,
            score: 10,
        });
        assert_eq!(view.score, 10);
    }

    #[test]
    fn test_death_notifications() {
        let mut view = ClientView::new();
        view.apply(Packet::PlayerAssigned { player_id: 3 });

        view.apply(Packet::PlayerDied { player_id: 8 });
        assert!(view.alive);

        view.apply(Packet::PlayerDied { player_id: 3 });
        assert!(!view.alive);
        assert_eq!(view.deaths, vec![8, 3]);
    }

    #[test]
    fn test_server_rejection_clears_identity() {
        let mut view = ClientView::new();
        view.apply(Packet::Disconnected {
            reason: "Server full".to_string(),
        });

        assert_eq!(view.player_id, None);
        assert!(!view.alive);
    }
}
