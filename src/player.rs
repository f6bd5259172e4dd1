//! A player's ship roster and own board.

use alloc::vec::Vec;

use crate::board::Board;
use crate::common::{BoardPosition, GameError, Orientation, PlayerId, Result, ShipHit};
use crate::config::Placement;
use crate::ship::ShipPiece;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    id: PlayerId,
    ships: Vec<ShipPiece>,
    ship_board: Board,
    live_ships: usize,
    shots_fired: usize,
    hits_landed: usize,
}

impl Player {
    pub fn new(id: PlayerId, board_size: usize, placement: Placement) -> Self {
        Self {
            id,
            ships: Vec::new(),
            ship_board: Board::new(board_size, placement),
            live_ships: 0,
            shots_fired: 0,
            hits_landed: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn ships(&self) -> &[ShipPiece] {
        &self.ships
    }

    /// The board holding this player's own ships.
    pub fn ship_board(&self) -> &Board {
        &self.ship_board
    }

    pub(crate) fn ship_board_mut(&mut self) -> &mut Board {
        &mut self.ship_board
    }

    /// Ships not yet destroyed.
    pub fn live_ships(&self) -> usize {
        self.live_ships
    }

    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    pub fn hits_landed(&self) -> usize {
        self.hits_landed
    }

    /// Place the next ship. Returns its id; the roster is only extended when
    /// the board accepted it.
    pub fn settle_ship(
        &mut self,
        size: usize,
        orientation: Orientation,
        position: BoardPosition,
    ) -> Result<usize> {
        let id = self.ships.len();
        let ship = ShipPiece::new(id, size, orientation, position);
        self.ship_board.settle(&ship)?;
        self.ships.push(ship);
        self.live_ships += 1;
        Ok(id)
    }

    /// Attack `target` through `pin_board`, the opponent's ship board.
    pub fn attack(&mut self, pin_board: &mut Board, target: BoardPosition) -> Result<Option<ShipHit>> {
        let hit = pin_board.attack(target)?;
        self.shots_fired += 1;
        if hit.is_some() {
            self.hits_landed += 1;
        }
        Ok(hit)
    }

    /// Fails when `receive_damage(ship_id, part)` would.
    pub fn check_damage(&self, ship_id: usize, part: usize) -> Result<()> {
        self.ships
            .get(ship_id)
            .ok_or(GameError::InvalidShipId { ship_id })?
            .check_damage(part)
    }

    /// Apply damage to one of this player's ships. Returns `true` when the
    /// ship was destroyed by this hit.
    pub fn receive_damage(&mut self, ship_id: usize, part: usize) -> Result<bool> {
        let ship = self
            .ships
            .get_mut(ship_id)
            .ok_or(GameError::InvalidShipId { ship_id })?;
        let destroyed = ship.receive_damage(part)?;
        if destroyed {
            self.live_ships -= 1;
        }
        Ok(destroyed)
    }
}
