//! Ship pieces and their footprint on the board.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::{BoardPosition, GameError, Orientation, Result};
use crate::config::Placement;

/// A ship owned by one player, with per-part damage tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPiece {
    id: usize,
    size: usize,
    orientation: Orientation,
    anchor: BoardPosition,
    damage: Vec<bool>,
    damage_count: usize,
}

impl ShipPiece {
    pub fn new(id: usize, size: usize, orientation: Orientation, anchor: BoardPosition) -> Self {
        Self {
            id,
            size,
            orientation,
            anchor,
            damage: vec![false; size],
            damage_count: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn anchor(&self) -> BoardPosition {
        self.anchor
    }

    pub fn damage_count(&self) -> usize {
        self.damage_count
    }

    pub fn is_damaged(&self, part: usize) -> bool {
        self.damage.get(part).copied().unwrap_or(false)
    }

    pub fn is_destroyed(&self) -> bool {
        self.damage_count == self.size
    }

    /// Signed `(row, col)` of every cell the ship covers, in part order.
    /// Cells may lie off the board; bounds are the board's concern.
    pub fn footprint(&self, placement: Placement) -> impl Iterator<Item = (isize, isize)> {
        let (d_row, d_col) = self.orientation.step();
        let back = match placement {
            Placement::Origin => 0,
            Placement::Centered => (self.size as isize - 1) / 2,
        };
        let row = self.anchor.row as isize - d_row * back;
        let col = self.anchor.col as isize - d_col * back;
        (0..self.size as isize).map(move |i| (row + d_row * i, col + d_col * i))
    }

    /// Fails when `part` cannot take a hit.
    pub fn check_damage(&self, part: usize) -> Result<()> {
        let ship_id = self.id;
        match self.damage.get(part) {
            None => Err(GameError::InvalidPart {
                ship_id,
                part,
                size: self.size,
            }),
            Some(true) => Err(GameError::AlreadyDamaged { ship_id, part }),
            Some(false) => Ok(()),
        }
    }

    /// Mark `part` damaged. Returns `true` when this hit destroyed the ship.
    pub fn receive_damage(&mut self, part: usize) -> Result<bool> {
        self.check_damage(part)?;
        self.damage[part] = true;
        self.damage_count += 1;
        Ok(self.is_destroyed())
    }
}
