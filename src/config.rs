//! Game settings and their validation.

use alloc::vec;
use alloc::vec::Vec;
use thiserror::Error;

pub const BOARD_SIZE: usize = 10;
pub const SHIP_COUNTS: [usize; 3] = [1, 2, 1];
pub const SHIP_SIZES: [usize; 3] = [2, 3, 4];
/// Largest accepted board side.
pub const MAX_BOARD_SIZE: usize = 1024;

/// How a ship's anchor relates to the cells it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Placement {
    /// Cells run from the anchor to `anchor + size - 1`.
    #[default]
    Origin,
    /// Cells run from `anchor - (size - 1) / 2` to `anchor + (size - 1) / 2`.
    /// Only odd sizes are allowed.
    Centered,
}

/// Errors detected while validating [`Settings`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("board size {board_size} exceeds the maximum of {max}", max = MAX_BOARD_SIZE)]
    BoardTooLarge { board_size: usize },
    #[error("{counts} ship counts given for {sizes} ship sizes")]
    MismatchedShipTypes { counts: usize, sizes: usize },
    #[error("ship sizes must be at least 1")]
    ZeroSizedShip,
    #[error("a ship of size {size} does not fit on a {board_size}x{board_size} board")]
    ShipTooLong { size: usize, board_size: usize },
    #[error("centered placement needs odd ship sizes, got {size}")]
    EvenShipCentered { size: usize },
    #[error("no ships configured")]
    NoShips,
    /// A restored session whose boards or ship sequence disagree with its
    /// settings.
    #[error("session state does not match its settings")]
    InconsistentState,
}

/// Static game settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct Settings {
    pub board_size: usize,
    /// Number of ships of each type, parallel to `ship_sizes`.
    pub ship_counts: Vec<usize>,
    pub ship_sizes: Vec<usize>,
    pub placement: Placement,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            ship_counts: SHIP_COUNTS.to_vec(),
            ship_sizes: SHIP_SIZES.to_vec(),
            placement: Placement::Origin,
        }
    }
}

impl Settings {
    /// Settings with one ship type repeated `count` times.
    pub fn single_type(board_size: usize, count: usize, size: usize, placement: Placement) -> Self {
        Self {
            board_size,
            ship_counts: vec![count],
            ship_sizes: vec![size],
            placement,
        }
    }

    /// Validate and expand into the ordered sequence of ship sizes each
    /// player places.
    pub fn validate(&self) -> Result<Vec<usize>, ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                board_size: self.board_size,
            });
        }
        if self.ship_counts.len() != self.ship_sizes.len() {
            return Err(ConfigError::MismatchedShipTypes {
                counts: self.ship_counts.len(),
                sizes: self.ship_sizes.len(),
            });
        }
        let mut sequence = Vec::new();
        for (&count, &size) in self.ship_counts.iter().zip(&self.ship_sizes) {
            if size == 0 {
                return Err(ConfigError::ZeroSizedShip);
            }
            if size > self.board_size {
                return Err(ConfigError::ShipTooLong {
                    size,
                    board_size: self.board_size,
                });
            }
            if self.placement == Placement::Centered && size % 2 == 0 {
                return Err(ConfigError::EvenShipCentered { size });
            }
            sequence.extend(core::iter::repeat(size).take(count));
        }
        if sequence.is_empty() {
            return Err(ConfigError::NoShips);
        }
        Ok(sequence)
    }
}

#[cfg(feature = "std")]
impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("invalid settings in {}: {}", path.display(), e))?;
        settings.validate()?;
        Ok(settings)
    }
}
