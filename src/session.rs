//! A game in flight and its serializable snapshot.

use crate::{
    common::PlayerId,
    config::{ConfigError, Settings},
    event::Event,
    game::Game,
    rules::{Outcome, Rules},
};

/// Serializable snapshot of a session for saving or syncing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub settings: Settings,
    pub game: Game,
    pub rules: Rules,
}

/// One game in flight: the model plus the state machine driving it.
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    game: Game,
    rules: Rules,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let rules = Rules::new(&settings)?;
        Ok(Self {
            game: Game::new(&settings),
            rules,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Initial commands and controls.
    pub fn start(&mut self) -> Outcome {
        self.rules.init()
    }

    pub fn apply(&mut self, event: Event) -> Outcome {
        self.rules.apply(event, &mut self.game)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.rules.state().winner()
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            settings: self.settings.clone(),
            game: self.game.clone(),
            rules: self.rules.clone(),
        }
    }

    /// Resume from a snapshot. The settings are validated again and must
    /// agree with the rules' ship sequence and with both boards.
    pub fn from_state(state: SessionState) -> Result<Self, ConfigError> {
        let sequence = state.settings.validate()?;
        let boards_match = [PlayerId::P1, PlayerId::P2].into_iter().all(|id| {
            let player = state.game.player(id);
            let board = player.ship_board();
            board.size() == state.settings.board_size
                && board.is_well_formed()
                && board.placement() == state.settings.placement
                && player.ships().len() <= sequence.len()
        });
        if sequence != state.rules.ship_sizes() || !boards_match {
            return Err(ConfigError::InconsistentState);
        }
        Ok(Self {
            settings: state.settings,
            game: state.game,
            rules: state.rules,
        })
    }
}
