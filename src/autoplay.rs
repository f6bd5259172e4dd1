//! Scripted input: produces the events a user would generate to place a
//! random fleet and fire at untried cells.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardPosition, Result};
use crate::event::{Event, Location};
use crate::game::Game;
use crate::rules::{Rules, RulesState};

pub struct AutoPilot<R: Rng> {
    rng: R,
}

impl<R: Rng> AutoPilot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Events completing the current turn step: one ship placement while
    /// crafting, one shot during battle, nothing once the game is over.
    pub fn next_events(&mut self, rules: &Rules, game: &Game) -> Result<Vec<Event>> {
        match *rules.state() {
            RulesState::ShipCrafting(s) => {
                let Some(size) = rules.current_ship_size() else {
                    return Ok(Vec::new());
                };
                let board = game.player(s.player).ship_board();
                let (to, orientation) = board.random_placement(&mut self.rng, size)?;
                let mut events = Vec::with_capacity(4);
                if !s.selected {
                    events.push(Event::Select);
                }
                if orientation != s.orientation {
                    events.push(Event::Rotate);
                }
                events.push(Event::Move {
                    to,
                    location: Location::ShipGrid,
                });
                events.push(Event::Unselect);
                Ok(events)
            }
            RulesState::Battle(s) => {
                let Some(to) = self.untried_cell(game.pin_board(s.player)) else {
                    return Ok(Vec::new());
                };
                let select = (!s.selected).then_some(Event::Select);
                Ok(select
                    .into_iter()
                    .chain(vec![
                        Event::Move {
                            to,
                            location: Location::PinGrid,
                        },
                        Event::Unselect,
                    ])
                    .collect())
            }
            RulesState::GameOver { .. } => Ok(Vec::new()),
        }
    }

    fn untried_cell(&mut self, board: &Board) -> Option<BoardPosition> {
        let n = board.size();
        let open: Vec<BoardPosition> = (0..n)
            .flat_map(|row| (0..n).map(move |col| BoardPosition::new(row, col)))
            .filter(|&pos| board.cell(pos).is_some_and(|c| !c.attacked))
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[self.rng.random_range(0..open.len())])
    }
}
