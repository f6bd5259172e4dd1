//! Common types for the rules engine: coordinates, orientation, player
//! identity, hit reports and the gameplay error taxonomy.

use core::fmt;
use thiserror::Error;

/// A cell on a board, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardPosition {
    pub row: usize,
    pub col: usize,
}

impl BoardPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for BoardPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The orientation after a quarter turn.
    pub const fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Unit step `(d_row, d_col)` along the ship's long axis.
    pub(crate) const fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    P1,
    P2,
}

impl PlayerId {
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::P1 => PlayerId::P2,
            PlayerId::P2 => PlayerId::P1,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            PlayerId::P1 => 0,
            PlayerId::P2 => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::P1 => f.write_str("P1"),
            PlayerId::P2 => f.write_str("P2"),
        }
    }
}

/// Segment of a ship struck by an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipHit {
    pub ship_id: usize,
    pub part: usize,
}

/// Errors returned by board, player and game operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A position or ship extent falls outside the board. Coordinates are
    /// wide enough for any `usize` target and for extents running off the
    /// top or left edge.
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i128, col: i128 },
    /// A ship would cover a cell another ship already occupies.
    #[error("cell ({row}, {col}) is already occupied by ship {ship_id}")]
    Overlap {
        row: usize,
        col: usize,
        ship_id: usize,
    },
    /// The cell was already attacked.
    #[error("cell ({row}, {col}) was already attacked")]
    AlreadyAttacked { row: usize, col: usize },
    #[error("no ship with id {ship_id}")]
    InvalidShipId { ship_id: usize },
    #[error("ship {ship_id} has no part {part} (size {size})")]
    InvalidPart {
        ship_id: usize,
        part: usize,
        size: usize,
    },
    #[error("part {part} of ship {ship_id} is already damaged")]
    AlreadyDamaged { ship_id: usize, part: usize },
    /// Random placement gave up.
    #[error("no room left for a ship of size {size}")]
    NoRoom { size: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
