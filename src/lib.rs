//! # Arena Match
//!
//! A round-based match controller for arena games where any number of competitors fight until
//! one is left standing.
//!
//! It provides:
//! - A fixed roster of competitors with their alive flag and win count (`CompetitorRegistry`)
//! - The match state machine, driven one simulation step at a time (`MatchController`)
//! - A blocking driver running a whole match against a clock (`MatchRunner`)
//! - Validated match rules (`MatchConfig`) and runner behaviors (`Configuration`)
//!
//! Each round revives every competitor, waits for the start delay, lets them fight until at most
//! one is alive, the round timer runs out or the round cap is reached, then shows the result for
//! the end delay. The match ends when a competitor has won `rounds_to_win` rounds.
//!
//! # Documentation Overview
//!
//! - For the phases and their timing, see the [`controller`] module.
//! - For the rules of a match, see [`MatchConfigBuilder`](crate::match_config::MatchConfigBuilder).
//! - For runner behaviors (console output, file logging), see
//!   [`Configuration`](crate::configuration::Configuration).
//! - To plug the controller into a game, implement the traits of [`arena_interface`].
//! - For the messages shown between phases, see [`message`].
//!
//! Rendering, input, physics and scene loading stay in the game: the controller only calls the
//! collaborator traits and reads the alive flags the game reports.
//!
//! # Usage Example
//!
//! ```no_run
//! use std::time::Duration;
//! use arena_match::prelude::*;
//!
//! // Player 2 goes down every two seconds of play
//! struct Shootout {
//!     elapsed: Duration,
//! }
//!
//! impl Arena for Shootout {
//!     fn simulate(&mut self, registry: &mut CompetitorRegistry, elapsed: Duration) {
//!         self.elapsed += elapsed;
//!         if self.elapsed > Duration::from_secs(2) {
//!             registry.eliminate(1);
//!             self.elapsed = Duration::ZERO;
//!         }
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let rules = MatchConfigBuilder::new().with_rounds_to_win(3).build()?;
//!     let players = CompetitorRegistry::with_players(&[Color::RED, Color::BLUE])?;
//!     let mut runner = MatchRunner::new(Configuration::new(), rules, players, Headless)?;
//!
//!     let mut arena = Shootout {
//!         elapsed: Duration::ZERO,
//!     };
//!     let mut clock = RealTimeClock::with_fps(60);
//!     let summary = runner.run(&mut arena, &mut clock, &mut Headless)?;
//!
//!     println!("{} won after {} rounds", summary.winner, summary.rounds_played);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub use anyhow;
pub mod arena_interface;
pub mod clock;
pub mod competitor;
pub mod configuration;
pub mod controller;
mod logger;
pub mod match_config;
pub mod message;
pub mod registry;
pub mod runner;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use arena_match::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arena_interface::{
        Arena, ArenaHooks, ControlGate, DisplaySink, Headless, MatchLifecycle, SimulationClock,
        ViewFraming,
    };
    pub use crate::clock::{FixedStep, RealTimeClock};
    pub use crate::competitor::{Color, Competitor};
    pub use crate::configuration::Configuration;
    pub use crate::controller::{MatchController, Phase, RoundOutcome, RoundState};
    pub use crate::match_config::{MatchConfig, MatchConfigBuilder};
    pub use crate::registry::CompetitorRegistry;
    pub use crate::runner::{MatchRunner, MatchSummary};
}
