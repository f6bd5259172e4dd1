//! Input events, view commands and input controls exchanged with the
//! outside world.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

use crate::common::BoardPosition;

/// Which grid a pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Location {
    ShipGrid,
    PinGrid,
}

/// A discrete user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "snake_case"))]
pub enum Event {
    Select,
    Unselect,
    Move { to: BoardPosition, location: Location },
    Rotate,
}

/// A required effect on the view, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "snake_case"))]
pub enum Command {
    ChangePlayer,
    MakeShip { size: usize },
    MakePin,
    SelectShip,
    SelectPin,
    MoveShip { to: BoardPosition },
    MovePin { to: BoardPosition },
    RotateShip,
    SettleShip,
    SettlePin,
    /// Put a selected ship back down without committing it.
    LayDownShip,
    /// Put a selected pin back down without firing.
    LayDownPin,
    Error { message: String },
}

/// Arms or disarms one kind of input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Control {
    EnableSelection,
    DisableSelection,
    EnableUnselection,
    DisableUnselection,
    EnableRotation,
    DisableRotation,
    EnableMove,
    DisableMove,
}

bitflags! {
    /// Set of input handlers that are armed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ControlSet: u8 {
        const SELECTION = 1 << 0;
        const UNSELECTION = 1 << 1;
        const ROTATION = 1 << 2;
        const MOVE = 1 << 3;
    }
}

impl Default for ControlSet {
    fn default() -> Self {
        ControlSet::empty()
    }
}

impl ControlSet {
    const ORDER: [(ControlSet, Control, Control); 4] = [
        (ControlSet::SELECTION, Control::EnableSelection, Control::DisableSelection),
        (ControlSet::UNSELECTION, Control::EnableUnselection, Control::DisableUnselection),
        (ControlSet::ROTATION, Control::EnableRotation, Control::DisableRotation),
        (ControlSet::MOVE, Control::EnableMove, Control::DisableMove),
    ];

    /// Controls that turn `self` into `next`, in a fixed order.
    pub fn transition_to(self, next: ControlSet) -> impl Iterator<Item = Control> {
        Self::ORDER.into_iter().filter_map(move |(flag, enable, disable)| {
            match (self.contains(flag), next.contains(flag)) {
                (false, true) => Some(enable),
                (true, false) => Some(disable),
                _ => None,
            }
        })
    }

    /// Apply a single control.
    pub fn apply(&mut self, control: Control) {
        match control {
            Control::EnableSelection => self.insert(ControlSet::SELECTION),
            Control::DisableSelection => self.remove(ControlSet::SELECTION),
            Control::EnableUnselection => self.insert(ControlSet::UNSELECTION),
            Control::DisableUnselection => self.remove(ControlSet::UNSELECTION),
            Control::EnableRotation => self.insert(ControlSet::ROTATION),
            Control::DisableRotation => self.remove(ControlSet::ROTATION),
            Control::EnableMove => self.insert(ControlSet::MOVE),
            Control::DisableMove => self.remove(ControlSet::MOVE),
        }
    }

    /// Whether the handler for `event` is armed.
    pub fn accepts(self, event: &Event) -> bool {
        self.contains(match event {
            Event::Select => ControlSet::SELECTION,
            Event::Unselect => ControlSet::UNSELECTION,
            Event::Rotate => ControlSet::ROTATION,
            Event::Move { .. } => ControlSet::MOVE,
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Select => f.write_str("select"),
            Event::Unselect => f.write_str("unselect"),
            Event::Rotate => f.write_str("rotate"),
            Event::Move { to, location } => {
                let grid = match location {
                    Location::ShipGrid => "ship",
                    Location::PinGrid => "pin",
                };
                write!(f, "move {} {} {}", grid, to.row, to.col)
            }
        }
    }
}

/// Error parsing an [`Event`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse event from {input:?}: {reason}")]
pub struct ParseEventError {
    input: String,
    reason: &'static str,
}

impl FromStr for Event {
    type Err = ParseEventError;

    /// Parses `select`, `unselect`, `rotate` and `move <ship|pin> <row> <col>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseEventError {
            input: s.to_string(),
            reason,
        };
        let mut words = s.split_whitespace();
        let event = match words.next().map(str::to_ascii_lowercase).as_deref() {
            Some("select") => Event::Select,
            Some("unselect") => Event::Unselect,
            Some("rotate") => Event::Rotate,
            Some("move") => {
                let location = match words.next() {
                    Some("ship") => Location::ShipGrid,
                    Some("pin") => Location::PinGrid,
                    _ => return Err(fail("expected `ship` or `pin`")),
                };
                let mut coord = || {
                    words
                        .next()
                        .and_then(|w| w.parse::<usize>().ok())
                        .ok_or_else(|| fail("expected a row and a column"))
                };
                let row = coord()?;
                let col = coord()?;
                Event::Move {
                    to: BoardPosition::new(row, col),
                    location,
                }
            }
            Some(_) => return Err(fail("unknown event")),
            None => return Err(fail("empty input")),
        };
        if words.next().is_some() {
            return Err(fail("trailing input"));
        }
        Ok(event)
    }
}
