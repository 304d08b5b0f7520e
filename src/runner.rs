//! Blocking driver for a whole match.
//!
//! This module defines the [`MatchRunner`] type, which owns a [`MatchController`] and feeds it
//! until the match is over. Its responsibilities include:
//!
//! - Pulling the elapsed time of each step from a [`SimulationClock`]
//! - Letting the [`Arena`] simulate the fight (and report eliminations) while a round is played
//! - Signalling the [`MatchLifecycle`] once a competitor has won
//! - Returning a [`MatchSummary`]
//!
//! # Behavior & Configuration
//!
//! Behavior is controlled by a [`Configuration`] object:
//!
//! - With `verbose`, every round result is printed to stdout as it happens.
//! - With `log`, a file logger is installed when the runner is created.
//! - With a `step_limit`, the runner gives up with an error after that many steps. Rules whose
//!   `rounds_to_win` is not below the round cap produce a match that never ends.
//!
//! # Example
//!
//! See crate-level documentation for an example on how to use the `MatchRunner`.

use anyhow::bail;
use tracing::{info, instrument, trace};

use crate::arena_interface::{Arena, ArenaHooks, MatchLifecycle, SimulationClock};
use crate::configuration::Configuration;
use crate::controller::{MatchController, Phase, RoundOutcome};
use crate::logger::init_logger;
use crate::match_config::MatchConfig;
use crate::registry::CompetitorRegistry;

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    /// Number of rounds started.
    pub rounds_played: u32,
    /// Label of the match winner.
    pub winner: String,
    /// `(label, wins)` for every competitor, in registration order.
    pub wins: Vec<(String, u32)>,
    /// Every round, in order.
    pub rounds: Vec<RoundOutcome>,
}

/// Runs a match from its first round to its winner.
///
/// # Type Parameters
/// - `H`: the game collaborators, see [`ArenaHooks`]
pub struct MatchRunner<H: ArenaHooks> {
    controller: MatchController<H>,
    config: Configuration,
}

impl<H: ArenaHooks> MatchRunner<H> {
    #[instrument(skip_all)]
    /// Create a [`MatchRunner`] for the given rules and competitors.
    ///
    /// # Errors
    /// Returned when `config.log` is set and the file logger cannot be installed.
    pub fn new(
        config: Configuration,
        rules: MatchConfig,
        registry: CompetitorRegistry,
        hooks: H,
    ) -> anyhow::Result<MatchRunner<H>> {
        if config.log {
            init_logger()?;
        }

        trace!(?config, ?rules);

        Ok(MatchRunner {
            controller: MatchController::new(rules, registry, hooks),
            config,
        })
    }

    /// Play the match until a competitor wins it, then call `lifecycle.restart_match()`.
    ///
    /// # Errors
    /// Returned when the configured step limit is reached before the match ends.
    #[instrument(skip_all)]
    pub fn run(
        &mut self,
        arena: &mut impl Arena,
        clock: &mut impl SimulationClock,
        lifecycle: &mut impl MatchLifecycle,
    ) -> anyhow::Result<MatchSummary> {
        let mut steps = 0u64;
        let mut reported = self.controller.outcomes().len();
        let mut round_number = self.controller.round().round_number;

        while !self.controller.is_finished() {
            if let Some(limit) = self.config.step_limit {
                if steps >= limit {
                    bail!(
                        "no winner after {steps} steps (round {})",
                        self.controller.round().round_number
                    );
                }
            }

            let elapsed = clock.next_step();
            if self.controller.phase() == Phase::Playing {
                arena.simulate(self.controller.registry_mut(), elapsed);
            }
            self.controller.step(elapsed);
            steps += 1;

            if self.controller.round().round_number != round_number {
                round_number = self.controller.round().round_number;
                arena.round_started(round_number);
            }

            for outcome in &self.controller.outcomes()[reported..] {
                if self.config.verbose {
                    print_round_outcome(self.controller.registry(), outcome);
                }
            }
            reported = self.controller.outcomes().len();
        }

        let summary = self.summary()?;
        info!(winner = %summary.winner, rounds = summary.rounds_played, steps);
        if self.config.verbose {
            print_match_winner(&summary);
        }

        lifecycle.restart_match();
        Ok(summary)
    }

    fn summary(&self) -> anyhow::Result<MatchSummary> {
        let Some(winner) = self.controller.match_winner() else {
            bail!("match finished without a winner");
        };
        Ok(MatchSummary {
            rounds_played: self.controller.round().round_number,
            winner: winner.label().to_owned(),
            wins: self
                .controller
                .registry()
                .iter()
                .map(|c| (c.label().to_owned(), c.wins()))
                .collect(),
            rounds: self.controller.outcomes().to_vec(),
        })
    }

    /// The driven controller.
    pub fn controller(&self) -> &MatchController<H> {
        &self.controller
    }

    /// The driven controller, mutably.
    pub fn controller_mut(&mut self) -> &mut MatchController<H> {
        &mut self.controller
    }
}

fn print_round_outcome(registry: &CompetitorRegistry, outcome: &RoundOutcome) {
    let result = match outcome.winner.and_then(|i| registry.get(i)) {
        Some(winner) => format!("\x1b[32m{} wins\x1b[39m", winner.label()),
        None if outcome.time_is_up => "\x1b[31mtime is up\x1b[39m".to_owned(),
        None => "\x1b[33mtie\x1b[39m".to_owned(),
    };
    let scores = registry
        .iter()
        .map(|c| c.wins().to_string())
        .collect::<Vec<_>>()
        .join("-");

    // clear line, round, result, scores
    println!(
        "\x1b[2KRound {}: {result} ({scores})",
        outcome.round_number
    );
}

fn print_match_winner(summary: &MatchSummary) {
    println!(
        "\x1b[32m{} wins the match\x1b[39m after {} rounds",
        summary.winner, summary.rounds_played
    );
}
