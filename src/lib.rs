#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod autoplay;
mod board;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod driver;
pub mod event;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
mod rules;
mod session;
mod ship;

pub use autoplay::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use event::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
pub use rules::*;
pub use session::*;
pub use ship::*;
