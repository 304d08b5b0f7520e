//! Traits the host game implements so the controller can drive it
//!
//! The controller never draws, moves or spawns anything itself. It calls these collaborators at
//! phase boundaries and leaves the how to the game.

use std::time::Duration;

use crate::competitor::Competitor;
use crate::registry::CompetitorRegistry;

/// Gates player input for a competitor.
pub trait ControlGate {
    /// Let the competitor move and fight.
    fn enable_control(&mut self, competitor: &Competitor);

    /// Freeze the competitor.
    fn disable_control(&mut self, competitor: &Competitor);
}

/// Camera framing.
pub trait ViewFraming {
    /// Keep the given competitors in frame.
    fn frame_on_active(&mut self, competitors: &[&Competitor]);

    /// Snap back to the start position and size.
    fn set_default_framing(&mut self);
}

/// Where messages and the round timer are shown.
///
/// Display calls are best-effort: an error is logged and the match goes on.
pub trait DisplaySink {
    /// Replace the central message. An empty string clears it.
    fn set_message(&mut self, text: &str) -> anyhow::Result<()>;

    /// Show the whole seconds left in the round.
    fn set_time_display(&mut self, seconds: u32) -> anyhow::Result<()>;
}

/// Every collaborator the controller talks to during a match.
///
/// Implemented for any type that is a [`ControlGate`], a [`ViewFraming`] and a [`DisplaySink`].
pub trait ArenaHooks: ControlGate + ViewFraming + DisplaySink {}

impl<T: ControlGate + ViewFraming + DisplaySink> ArenaHooks for T {}

/// What happens once a match has a winner.
pub trait MatchLifecycle {
    /// Reload the scene or otherwise get ready for a new match.
    fn restart_match(&mut self);
}

/// Source of elapsed time, one value per simulation step.
pub trait SimulationClock {
    /// Wait for the next step and return the time elapsed since the previous one.
    fn next_step(&mut self) -> Duration;
}

/// The simulation competitors fight in.
///
/// Alive state is computed here and only consumed by the controller.
pub trait Arena {
    /// Called once a new round has been announced, before any of its steps is simulated.
    fn round_started(&mut self, _round_number: u32) {}

    /// Advance the simulation by `elapsed`, reporting knocked out competitors with
    /// [`CompetitorRegistry::eliminate`].
    ///
    /// Only called while a round is being played.
    fn simulate(&mut self, registry: &mut CompetitorRegistry, elapsed: Duration);
}

/// Collaborator that ignores every call. Handy for headless simulations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl ControlGate for Headless {
    fn enable_control(&mut self, _competitor: &Competitor) {}

    fn disable_control(&mut self, _competitor: &Competitor) {}
}

impl ViewFraming for Headless {
    fn frame_on_active(&mut self, _competitors: &[&Competitor]) {}

    fn set_default_framing(&mut self) {}
}

impl DisplaySink for Headless {
    fn set_message(&mut self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn set_time_display(&mut self, _seconds: u32) -> anyhow::Result<()> {
        Ok(())
    }
}

impl MatchLifecycle for Headless {
    fn restart_match(&mut self) {}
}
