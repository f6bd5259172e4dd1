//! Both players and the attack flow between them.

use log::debug;

use crate::{
    board::{Board, BoardCell, CellContent},
    common::{BoardPosition, Orientation, PlayerId, Result},
    config::Settings,
    player::Player,
};

/// Two players whose pin boards are each other's ship boards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    players: [Player; 2],
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let make = |id| Player::new(id, settings.board_size, settings.placement);
        Self {
            players: [make(PlayerId::P1), make(PlayerId::P2)],
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// The grid `id` attacks: the opponent's ship board.
    pub fn pin_board(&self, id: PlayerId) -> &Board {
        self.player(id.opponent()).ship_board()
    }

    fn pair_mut(&mut self, attacker: PlayerId) -> (&mut Player, &mut Player) {
        let [p1, p2] = &mut self.players;
        match attacker {
            PlayerId::P1 => (p1, p2),
            PlayerId::P2 => (p2, p1),
        }
    }

    pub fn settle_ship(
        &mut self,
        player: PlayerId,
        size: usize,
        orientation: Orientation,
        position: BoardPosition,
    ) -> Result<usize> {
        let id = self.players[player.index()].settle_ship(size, orientation, position)?;
        debug!("{} settled ship {} (size {}, {}) at {}", player, id, size, orientation, position);
        Ok(id)
    }

    /// Resolve an attack by `attacker`. Returns `true` when the defender just
    /// lost their last ship. Nothing changes when the attack fails.
    pub fn attack(&mut self, attacker: PlayerId, target: BoardPosition) -> Result<bool> {
        let (attacking, defending) = self.pair_mut(attacker);
        if let Some(&BoardCell {
            content: CellContent::Ship { ship_id, part },
            attacked: false,
        }) = defending.ship_board().cell(target)
        {
            defending.check_damage(ship_id, part)?;
        }
        let Some(hit) = attacking.attack(defending.ship_board_mut(), target)? else {
            debug!("{} missed at {}", attacker, target);
            return Ok(false);
        };
        let destroyed = defending.receive_damage(hit.ship_id, hit.part)?;
        debug!(
            "{} hit ship {} part {} at {}{}",
            attacker,
            hit.ship_id,
            hit.part,
            target,
            if destroyed { " and destroyed it" } else { "" }
        );
        Ok(destroyed && defending.live_ships() == 0)
    }

    /// The player with ships left when the other has none.
    pub fn winner(&self) -> Option<PlayerId> {
        let [p1, p2] = &self.players;
        match (p1.live_ships(), p2.live_ships()) {
            (0, 0) => None,
            (_, 0) if !p2.ships().is_empty() => Some(PlayerId::P1),
            (0, _) if !p1.ships().is_empty() => Some(PlayerId::P2),
            _ => None,
        }
    }
}
