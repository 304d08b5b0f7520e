//! Config for the match runner behaviors
//!
//! This module provides configuration options for controlling how the
//! [`MatchRunner`](crate::runner::MatchRunner) drives a match. The rules of the match itself
//! live in [`MatchConfig`](crate::match_config::MatchConfig).
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration values. All
//! values are optional, and case-insensitive. Set the value to `"true"` to enable a flag.
//!
//! - `ARENA_VERBOSE`: Print round results to stdout (default: `true`)
//! - `ARENA_LOG`: Enable logging to a file (default: `false`)
//! - `ARENA_STEP_LIMIT`: Give up after this many simulation steps (default: unlimited)

/// Configuration for match runner behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) step_limit: Option<u64>,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The runner will print each round result to stdout.
    /// - Logging to file is disabled.
    /// - There is no limit on the number of simulation steps.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            step_limit: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// The following environment variables are recognized:
    /// - `ARENA_VERBOSE`: if set to `"true"`, enables verbose output (default: `true`)
    /// - `ARENA_LOG`: if set to `"true"`, enables logging to file (default: `false`)
    /// - `ARENA_STEP_LIMIT`: a step count, the runner fails once it is reached (default: none)
    ///
    /// Any other value (including unset) will result in using the default value for each field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            verbose: get_env_flag("ARENA_VERBOSE", true),
            log: get_env_flag("ARENA_LOG", false),
            step_limit: std::env::var("ARENA_STEP_LIMIT")
                .ok()
                .and_then(|val| val.parse().ok()),
        }
    }

    /// Enable or disable printing round results.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Stop the match with an error after `limit` simulation steps.
    ///
    /// Useful when the rules allow a match that never ends, e.g. when `rounds_to_win` is not
    /// below the round cap.
    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
