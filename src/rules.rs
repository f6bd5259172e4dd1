//! The turn state machine.
//!
//! [`Rules`] consumes [`Event`]s, mutates a [`Game`] and answers with an
//! [`Outcome`]: the ordered view [`Command`]s plus the input [`Control`]s
//! that changed. Game failures never escape; they become
//! [`Command::Error`] and leave the state as it was.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use log::{debug, info, warn};

use crate::common::{BoardPosition, Orientation, PlayerId};
use crate::config::{ConfigError, Settings};
use crate::event::{Command, Control, ControlSet, Event, Location};
use crate::game::Game;

/// Transient state while a player places ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftingState {
    pub player: PlayerId,
    pub selected: bool,
    /// Index into the ship-size sequence of the ship being placed.
    pub cursor: usize,
    pub orientation: Orientation,
    pub pending: Option<BoardPosition>,
}

impl CraftingState {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            selected: false,
            cursor: 0,
            orientation: Orientation::default(),
            pending: None,
        }
    }
}

/// Transient state while a player aims a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub player: PlayerId,
    pub selected: bool,
    pub pending: Option<BoardPosition>,
}

impl BattleState {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            selected: false,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum RulesState {
    ShipCrafting(CraftingState),
    Battle(BattleState),
    GameOver { winner: PlayerId },
}

/// Phase tag of a [`RulesState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ShipCrafting,
    Battle,
    GameOver,
}

impl Phase {
    /// Input handlers armed during this phase.
    pub fn controls(self) -> ControlSet {
        match self {
            Phase::ShipCrafting => ControlSet::all(),
            Phase::Battle => ControlSet::SELECTION | ControlSet::UNSELECTION | ControlSet::MOVE,
            Phase::GameOver => ControlSet::empty(),
        }
    }
}

/// Minimal before/after view used to derive control changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    phase: Phase,
    player: Option<PlayerId>,
}

impl RulesState {
    pub fn phase(&self) -> Phase {
        match self {
            RulesState::ShipCrafting(_) => Phase::ShipCrafting,
            RulesState::Battle(_) => Phase::Battle,
            RulesState::GameOver { .. } => Phase::GameOver,
        }
    }

    /// Player whose turn it is; `None` once the game is over.
    pub fn active_player(&self) -> Option<PlayerId> {
        match self {
            RulesState::ShipCrafting(s) => Some(s.player),
            RulesState::Battle(s) => Some(s.player),
            RulesState::GameOver { .. } => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            RulesState::ShipCrafting(s) => s.selected,
            RulesState::Battle(s) => s.selected,
            RulesState::GameOver { .. } => false,
        }
    }

    pub fn pending(&self) -> Option<BoardPosition> {
        match self {
            RulesState::ShipCrafting(s) => s.pending,
            RulesState::Battle(s) => s.pending,
            RulesState::GameOver { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            RulesState::GameOver { winner } => Some(*winner),
            _ => None,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            player: self.active_player(),
        }
    }
}

/// Commands and controls produced by one step, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub commands: Vec<Command>,
    pub controls: Vec<Control>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.controls.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    sequence: Vec<usize>,
    state: RulesState,
}

impl Rules {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            sequence: settings.validate()?,
            state: RulesState::ShipCrafting(CraftingState::new(PlayerId::P1)),
        })
    }

    pub fn state(&self) -> &RulesState {
        &self.state
    }

    /// Sizes every player places, in order.
    pub fn ship_sizes(&self) -> &[usize] {
        &self.sequence
    }

    /// Size of the ship currently being placed, if crafting.
    pub fn current_ship_size(&self) -> Option<usize> {
        match &self.state {
            RulesState::ShipCrafting(s) => self.sequence.get(s.cursor).copied(),
            _ => None,
        }
    }

    /// Commands and controls that set up the view for the current state.
    /// Called once before the first event.
    pub fn init(&mut self) -> Outcome {
        let commands = match self.state {
            RulesState::ShipCrafting(s) => vec![self.make_ship(s.cursor)],
            RulesState::Battle(_) => vec![Command::MakePin],
            RulesState::GameOver { .. } => Vec::new(),
        };
        let controls = ControlSet::empty()
            .transition_to(self.state.phase().controls())
            .collect();
        Outcome { commands, controls }
    }

    /// Apply one event to completion.
    pub fn apply(&mut self, event: Event, game: &mut Game) -> Outcome {
        let before = self.state.snapshot();
        let commands = match event {
            Event::Select => self.select(),
            Event::Move { to, location } => self.move_to(to, location),
            Event::Rotate => self.rotate(),
            Event::Unselect => self.unselect(game),
        };
        let after = self.state.snapshot();
        if before.phase != after.phase {
            debug!("{:?} -> {:?}", before.phase, after.phase);
        }
        if let (Some(from), Some(to)) = (before.player, after.player) {
            if from != to {
                debug!("turn passes from {} to {}", from, to);
            }
        }
        let controls = before
            .phase
            .controls()
            .transition_to(after.phase.controls())
            .collect();
        Outcome { commands, controls }
    }

    fn make_ship(&self, cursor: usize) -> Command {
        match self.sequence.get(cursor) {
            Some(&size) => Command::MakeShip { size },
            None => Command::Error {
                message: String::from("no ships configured"),
            },
        }
    }

    fn select(&mut self) -> Vec<Command> {
        match &mut self.state {
            RulesState::ShipCrafting(s) if !s.selected => {
                s.selected = true;
                vec![Command::SelectShip]
            }
            RulesState::Battle(s) if !s.selected => {
                s.selected = true;
                vec![Command::SelectPin]
            }
            _ => Vec::new(),
        }
    }

    fn move_to(&mut self, to: BoardPosition, location: Location) -> Vec<Command> {
        match (&mut self.state, location) {
            (RulesState::ShipCrafting(s), Location::ShipGrid) if s.selected => {
                s.pending = Some(to);
                vec![Command::MoveShip { to }]
            }
            (RulesState::Battle(s), Location::PinGrid) if s.selected => {
                s.pending = Some(to);
                vec![Command::MovePin { to }]
            }
            _ => Vec::new(),
        }
    }

    fn rotate(&mut self) -> Vec<Command> {
        match &mut self.state {
            RulesState::ShipCrafting(s) if s.selected => {
                s.orientation = s.orientation.rotated();
                vec![Command::RotateShip]
            }
            _ => Vec::new(),
        }
    }

    fn unselect(&mut self, game: &mut Game) -> Vec<Command> {
        match self.state {
            RulesState::ShipCrafting(s) if s.selected => self.commit_ship(s, game),
            RulesState::Battle(s) if s.selected => self.commit_pin(s, game),
            _ => Vec::new(),
        }
    }

    fn commit_ship(&mut self, mut s: CraftingState, game: &mut Game) -> Vec<Command> {
        let Some(pos) = s.pending else {
            s.selected = false;
            self.state = RulesState::ShipCrafting(s);
            return vec![Command::LayDownShip];
        };
        let Some(&size) = self.sequence.get(s.cursor) else {
            return vec![self.make_ship(s.cursor)];
        };
        if let Err(err) = game.settle_ship(s.player, size, s.orientation, pos) {
            let message = format!(
                "{} cannot settle a ship of size {} ({}) at {}: {}",
                s.player, size, s.orientation, pos, err
            );
            warn!("{}", message);
            return vec![Command::Error { message }];
        }

        let mut commands = vec![Command::SettleShip];
        let next = CraftingState {
            cursor: s.cursor + 1,
            ..CraftingState::new(s.player)
        };
        if next.cursor < self.sequence.len() {
            commands.push(self.make_ship(next.cursor));
            self.state = RulesState::ShipCrafting(next);
            return commands;
        }
        match s.player {
            PlayerId::P1 => {
                debug!("P1 fleet complete, P2 starts crafting");
                commands.push(Command::ChangePlayer);
                self.state = RulesState::ShipCrafting(CraftingState::new(PlayerId::P2));
                commands.push(self.make_ship(0));
            }
            PlayerId::P2 => {
                info!("both fleets placed, battle begins");
                self.state = RulesState::Battle(BattleState::new(PlayerId::P1));
            }
        }
        commands
    }

    fn commit_pin(&mut self, mut s: BattleState, game: &mut Game) -> Vec<Command> {
        let Some(pos) = s.pending else {
            s.selected = false;
            self.state = RulesState::Battle(s);
            return vec![Command::LayDownPin];
        };
        match game.attack(s.player, pos) {
            Err(err) => {
                let message = format!("{} cannot attack {}: {}", s.player, pos, err);
                warn!("{}", message);
                vec![Command::Error { message }]
            }
            Ok(true) => {
                info!("{} wins", s.player);
                self.state = RulesState::GameOver { winner: s.player };
                Vec::new()
            }
            Ok(false) => {
                self.state = RulesState::Battle(BattleState::new(s.player.opponent()));
                vec![Command::SettlePin, Command::ChangePlayer, Command::MakePin]
            }
        }
    }
}
