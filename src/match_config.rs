//! Rules of a match: rounds to win, phase delays and the round timer.
//!
//! The main entry point is the [`MatchConfigBuilder`], which uses a builder pattern to
//! configure the rules and validates them in [`MatchConfigBuilder::build`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use arena_match::match_config::MatchConfigBuilder;
//!
//! let rules = MatchConfigBuilder::new()
//!     .with_rounds_to_win(3)
//!     .with_start_delay(Duration::from_secs(2))
//!     .with_end_delay(Duration::from_secs(2))
//!     .with_max_round_time(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//! assert_eq!(rules.rounds_to_win(), 3);
//! ```
//!
//! Rules may also be read from environment variables using [`MatchConfigBuilder::from_env()`].

use std::{env, time::Duration};

use anyhow::bail;
use tracing::warn;

const DEFAULT_ROUNDS_TO_WIN: u32 = 10;
const DEFAULT_START_DELAY: Duration = Duration::from_secs(3);
const DEFAULT_END_DELAY: Duration = Duration::from_secs(3);
const DEFAULT_MAX_ROUND_TIME: Duration = Duration::from_secs(10);
const DEFAULT_ROUND_CAP: u32 = 10;

/// A builder for the rules of a match.
///
/// Every value left unset falls back to its default: 10 rounds to win, 3 seconds before and
/// after each round, 10 seconds per round and a hard cap at round 10.
#[derive(Debug, Default, Clone)]
pub struct MatchConfigBuilder {
    rounds_to_win: Option<u32>,
    start_delay: Option<Duration>,
    end_delay: Option<Duration>,
    max_round_time: Option<Duration>,
    round_cap: Option<u32>,
}

impl MatchConfigBuilder {
    /// Creates a builder with every rule at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder configured from environment variables.
    ///
    /// Read environment variables are:
    /// - `ROUNDS_TO_WIN` (u32): rounds a competitor must win to take the match
    /// - `START_DELAY_MS` (u64): pause before each round, in milliseconds
    /// - `END_DELAY_MS` (u64): pause after each round, in milliseconds
    /// - `MAX_ROUND_TIME_SECS` (u64): round timer, in seconds
    /// - `ROUND_CAP` (u32): round number at which play stops being ticked
    ///
    /// Unset or unparsable variables keep their default.
    #[must_use]
    pub fn from_env() -> Self {
        fn parse_u32(var: &str) -> Option<u32> {
            env::var(var).ok()?.parse().ok()
        }

        fn parse_duration_secs(var: &str) -> Option<Duration> {
            env::var(var)
                .ok()?
                .parse::<u64>()
                .ok()
                .map(Duration::from_secs)
        }

        fn parse_duration_millis(var: &str) -> Option<Duration> {
            env::var(var)
                .ok()?
                .parse::<u64>()
                .ok()
                .map(Duration::from_millis)
        }

        MatchConfigBuilder {
            rounds_to_win: parse_u32("ROUNDS_TO_WIN"),
            start_delay: parse_duration_millis("START_DELAY_MS"),
            end_delay: parse_duration_millis("END_DELAY_MS"),
            max_round_time: parse_duration_secs("MAX_ROUND_TIME_SECS"),
            round_cap: parse_u32("ROUND_CAP"),
        }
    }

    /// Sets the number of round wins needed to take the match.
    #[must_use]
    pub fn with_rounds_to_win(self, rounds: u32) -> Self {
        Self {
            rounds_to_win: Some(rounds),
            ..self
        }
    }

    /// Sets the pause between the start of a round and the moment competitors can move.
    #[must_use]
    pub fn with_start_delay(self, delay: Duration) -> Self {
        Self {
            start_delay: Some(delay),
            ..self
        }
    }

    /// Sets the pause after a round, while the result is displayed.
    #[must_use]
    pub fn with_end_delay(self, delay: Duration) -> Self {
        Self {
            end_delay: Some(delay),
            ..self
        }
    }

    /// Sets the round timer. When it runs out every competitor loses the round.
    #[must_use]
    pub fn with_max_round_time(self, time: Duration) -> Self {
        Self {
            max_round_time: Some(time),
            ..self
        }
    }

    /// Sets the hard cap on the round number.
    ///
    /// Once the round number reaches the cap, rounds are still started but end as soon as
    /// they begin playing.
    #[must_use]
    pub fn with_round_cap(self, cap: u32) -> Self {
        Self {
            round_cap: Some(cap),
            ..self
        }
    }

    /// Validates the rules.
    ///
    /// # Errors
    /// Returned when `rounds_to_win`, `max_round_time` or `round_cap` is zero.
    pub fn build(self) -> anyhow::Result<MatchConfig> {
        let rounds_to_win = self.rounds_to_win.unwrap_or(DEFAULT_ROUNDS_TO_WIN);
        let max_round_time = self.max_round_time.unwrap_or(DEFAULT_MAX_ROUND_TIME);
        let round_cap = self.round_cap.unwrap_or(DEFAULT_ROUND_CAP);

        if rounds_to_win == 0 {
            bail!("rounds to win must be positive");
        }
        if max_round_time.is_zero() {
            bail!("max round time must be positive");
        }
        if round_cap == 0 {
            bail!("round cap must be positive");
        }
        if rounds_to_win >= round_cap {
            warn!(
                rounds_to_win,
                round_cap, "rounds past the cap end immediately, this match cannot be won"
            );
        }

        Ok(MatchConfig {
            rounds_to_win,
            start_delay: self.start_delay.unwrap_or(DEFAULT_START_DELAY),
            end_delay: self.end_delay.unwrap_or(DEFAULT_END_DELAY),
            max_round_time,
            round_cap,
        })
    }
}

/// Validated match rules. Obtained using [`MatchConfigBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    pub(crate) rounds_to_win: u32,
    pub(crate) start_delay: Duration,
    pub(crate) end_delay: Duration,
    pub(crate) max_round_time: Duration,
    pub(crate) round_cap: u32,
}

impl MatchConfig {
    /// create a MatchConfigBuilder
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::new()
    }

    /// Round wins needed to take the match.
    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    /// Pause before each round.
    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    /// Pause after each round.
    pub fn end_delay(&self) -> Duration {
        self.end_delay
    }

    /// Round timer.
    pub fn max_round_time(&self) -> Duration {
        self.max_round_time
    }

    /// Hard cap on the round number.
    pub fn round_cap(&self) -> u32 {
        self.round_cap
    }
}
