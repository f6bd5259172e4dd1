//! Cell-level placement and attack bookkeeping for one player's grid.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{BoardPosition, GameError, Orientation, Result, ShipHit};
use crate::config::Placement;
use crate::ship::ShipPiece;

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellContent {
    #[default]
    Water,
    Ship { ship_id: usize, part: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardCell {
    pub content: CellContent,
    pub attacked: bool,
}

/// A `size`×`size` grid stored row-major.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    placement: Placement,
    cells: Vec<BoardCell>,
}

impl Board {
    /// Create an all-water board.
    pub fn new(size: usize, placement: Placement) -> Self {
        Self {
            size,
            placement,
            cells: vec![BoardCell::default(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Cell at `pos`, or `None` off the board.
    pub fn cell(&self, pos: BoardPosition) -> Option<&BoardCell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Whether the cell grid matches the declared size. Only a deserialized
    /// board can fail this.
    pub fn is_well_formed(&self) -> bool {
        self.size.checked_mul(self.size) == Some(self.cells.len())
    }

    /// Number of attacked cells.
    pub fn attacked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.attacked).count()
    }

    fn index(&self, pos: BoardPosition) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then(|| pos.row * self.size + pos.col)
    }

    fn checked(&self, row: isize, col: isize) -> Result<BoardPosition> {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < self.size && c < self.size => Ok(BoardPosition::new(r, c)),
            _ => Err(GameError::OutOfBounds {
                row: row as i128,
                col: col as i128,
            }),
        }
    }

    fn off_board(pos: BoardPosition) -> GameError {
        GameError::OutOfBounds {
            row: pos.row as i128,
            col: pos.col as i128,
        }
    }

    /// Cells `ship` would cover, validated against bounds and other ships.
    /// The board is not touched.
    pub fn footprint(&self, ship: &ShipPiece) -> Result<Vec<BoardPosition>> {
        let anchor = ship.anchor();
        if self.index(anchor).is_none() {
            return Err(Self::off_board(anchor));
        }
        let cells = ship
            .footprint(self.placement)
            .map(|(row, col)| self.checked(row, col))
            .collect::<Result<Vec<_>>>()?;
        for &pos in &cells {
            if let Some(BoardCell {
                content: CellContent::Ship { ship_id, .. },
                ..
            }) = self.cell(pos)
            {
                return Err(GameError::Overlap {
                    row: pos.row,
                    col: pos.col,
                    ship_id: *ship_id,
                });
            }
        }
        Ok(cells)
    }

    /// Mark every cell of `ship`. Fails without side effects when any cell
    /// is off the board or already taken.
    pub fn settle(&mut self, ship: &ShipPiece) -> Result<()> {
        let cells = self.footprint(ship)?;
        for (part, pos) in cells.into_iter().enumerate() {
            let i = pos.row * self.size + pos.col;
            self.cells[i].content = CellContent::Ship {
                ship_id: ship.id(),
                part,
            };
        }
        Ok(())
    }

    /// Attack `pos`, returning the struck ship segment if any.
    pub fn attack(&mut self, pos: BoardPosition) -> Result<Option<ShipHit>> {
        let i = self.index(pos).ok_or_else(|| Self::off_board(pos))?;
        let cell = &mut self.cells[i];
        if cell.attacked {
            return Err(GameError::AlreadyAttacked {
                row: pos.row,
                col: pos.col,
            });
        }
        cell.attacked = true;
        Ok(match cell.content {
            CellContent::Water => None,
            CellContent::Ship { ship_id, part } => Some(ShipHit { ship_id, part }),
        })
    }

    /// Returns a random non-overlapping anchor and orientation for a ship of
    /// `size`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(BoardPosition, Orientation)> {
        if size == 0 || size > self.size {
            return Err(GameError::NoRoom { size });
        }
        let n = self.size;
        for _ in 0..100 {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            // Anchor range along the long axis, by convention.
            let (lo, hi) = match self.placement {
                Placement::Origin => (0, n - size),
                Placement::Centered => ((size - 1) / 2, n - 1 - (size - 1) / 2),
            };
            let along = rng.random_range(lo..=hi);
            let across = rng.random_range(0..n);
            let anchor = match orientation {
                Orientation::Horizontal => BoardPosition::new(across, along),
                Orientation::Vertical => BoardPosition::new(along, across),
            };
            let probe = ShipPiece::new(usize::MAX, size, orientation, anchor);
            if self.footprint(&probe).is_ok() {
                return Ok((anchor, orientation));
            }
        }
        Err(GameError::NoRoom { size })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, placement: {:?} }}", self.size, self.placement)?;
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                let ch = match (cell.content, cell.attacked) {
                    (CellContent::Water, false) => '.',
                    (CellContent::Water, true) => 'o',
                    (CellContent::Ship { .. }, false) => 'S',
                    (CellContent::Ship { .. }, true) => 'X',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
