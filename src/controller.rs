//! The round-based match state machine.
//!
//! A match cycles through [`Phase::Starting`], [`Phase::Playing`] and [`Phase::Ending`] once per
//! round, until a competitor has won `rounds_to_win` rounds and the match is
//! [`Phase::Finished`].
//!
//! The [`MatchController`] does not own a loop. The caller drives it with
//! [`MatchController::step`], once per simulation step, passing the time elapsed since the
//! previous step. Within a step the controller runs phase entry actions as soon as a phase is
//! reached, then stops at the next suspension point:
//!
//! - `Starting` waits for the start delay,
//! - `Playing` yields after every tick,
//! - `Ending` waits for the end delay.
//!
//! Delays only count time elapsed after the phase was entered, and a step never spans two
//! rounds: leaving `Ending` for a new round announces the round and ends the step.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::arena_interface::ArenaHooks;
use crate::competitor::Competitor;
use crate::match_config::MatchConfig;
use crate::message::{end_of_round_message, round_message, TIME_UP_MESSAGE};
use crate::registry::CompetitorRegistry;

/// Phases of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Competitors are revived and frozen while the round number is shown.
    Starting,
    /// Competitors fight until one is left, time runs out or the round cap is hit.
    Playing,
    /// The round result is shown.
    Ending,
    /// A competitor won the match. Terminal.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Starting => "starting",
            Phase::Playing => "playing",
            Phase::Ending => "ending",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// State of the current round. Competitors are referred to by registry index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundState {
    /// Starts at 0, incremented when a round starts.
    pub round_number: u32,
    /// Seconds left on the round timer. Can be negative after the last tick.
    pub time_remaining: f32,
    /// Sole survivor of the round, if any.
    pub round_winner: Option<usize>,
    /// Set once a competitor has won the match.
    pub match_winner: Option<usize>,
}

/// What happened in a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Round number.
    pub round_number: u32,
    /// Registry index of the round winner, `None` for a tie or a timeout.
    pub winner: Option<usize>,
    /// True if the round timer ran out.
    pub time_is_up: bool,
    /// End-of-round message that was displayed.
    pub message: String,
}

/// Drives a match through its phases.
///
/// # Type Parameters
/// - `H`: the game collaborators, see [`ArenaHooks`]
pub struct MatchController<H: ArenaHooks> {
    rules: MatchConfig,
    registry: CompetitorRegistry,
    hooks: H,
    phase: Phase,
    started: bool,
    delay: f32,
    round: RoundState,
    time_is_up: bool,
    outcomes: Vec<RoundOutcome>,
}

impl<H: ArenaHooks> MatchController<H> {
    /// A match about to start its first round. Nothing happens until the first [`step`](Self::step).
    pub fn new(rules: MatchConfig, registry: CompetitorRegistry, hooks: H) -> MatchController<H> {
        MatchController {
            rules,
            registry,
            hooks,
            phase: Phase::Starting,
            started: false,
            delay: 0.0,
            round: RoundState::default(),
            time_is_up: false,
            outcomes: vec![],
        }
    }

    /// Advance the match by one simulation step and return the phase it is now in.
    ///
    /// Steps after the match is [`Phase::Finished`] do nothing.
    pub fn step(&mut self, elapsed: Duration) -> Phase {
        let mut elapsed = Some(elapsed.as_secs_f32());
        if !self.started {
            self.started = true;
            self.enter_starting();
            elapsed = None;
        }

        loop {
            match self.phase {
                Phase::Starting => {
                    self.delay -= elapsed.take().unwrap_or(0.0);
                    if self.delay > 0.0 {
                        break;
                    }
                    self.transition(Phase::Playing);
                }
                Phase::Playing => {
                    let dt = elapsed.take().unwrap_or(0.0);
                    if self.round_in_progress() {
                        self.tick(dt);
                        break;
                    }
                    self.finish_playing();
                    self.transition(Phase::Ending);
                }
                Phase::Ending => {
                    self.delay -= elapsed.take().unwrap_or(0.0);
                    if self.delay > 0.0 {
                        break;
                    }
                    if self.round.match_winner.is_some() {
                        self.transition(Phase::Finished);
                    } else {
                        self.transition(Phase::Starting);
                    }
                    break;
                }
                Phase::Finished => break,
            }
        }
        self.phase
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = %self.phase, to = %next, round = self.round.round_number);
        self.phase = next;
        match next {
            Phase::Starting => self.enter_starting(),
            Phase::Playing => self.enter_playing(),
            Phase::Ending => self.enter_ending(),
            Phase::Finished => self.enter_finished(),
        }
    }

    fn enter_starting(&mut self) {
        self.registry.reset_all();
        for competitor in self.registry.iter() {
            self.hooks.disable_control(competitor);
        }
        self.hooks.set_default_framing();
        let alive: Vec<&Competitor> = self.registry.alive().collect();
        self.hooks.frame_on_active(&alive);

        self.round.round_number += 1;
        self.round.round_winner = None;
        self.round.time_remaining = self.rules.max_round_time.as_secs_f32();
        self.time_is_up = false;
        info!(round = self.round.round_number, "round starting");
        self.show_message(&round_message(self.round.round_number));

        self.delay = self.rules.start_delay.as_secs_f32();
    }

    fn enter_playing(&mut self) {
        for competitor in self.registry.iter() {
            self.hooks.enable_control(competitor);
        }
        self.show_message("");
    }

    fn round_in_progress(&self) -> bool {
        self.registry.count_alive() > 1
            && self.round.round_number < self.rules.round_cap
            && self.round.time_remaining > 0.0
    }

    fn tick(&mut self, dt: f32) {
        let seconds = self.round.time_remaining.max(0.0).round() as u32;
        if let Err(e) = self.hooks.set_time_display(seconds) {
            warn!("could not display round time: {e:#}");
        }
        self.round.time_remaining -= dt;
        trace!(time_remaining = self.round.time_remaining, dt);
    }

    fn finish_playing(&mut self) {
        if self.round.time_remaining <= 0.0 {
            info!(round = self.round.round_number, "time is up");
            self.time_is_up = true;
            self.round.round_winner = None;
            self.round.match_winner = None;
            self.show_message(TIME_UP_MESSAGE);
        }
    }

    fn enter_ending(&mut self) {
        for competitor in self.registry.iter() {
            self.hooks.disable_control(competitor);
        }

        self.round.round_winner = None;
        self.round.round_winner = if self.time_is_up {
            None
        } else {
            self.registry.sole_survivor()
        };
        if let Some(winner) = self.round.round_winner {
            self.registry.award_round(winner);
        }
        self.round.match_winner = self.registry.match_winner(self.rules.rounds_to_win);

        let message = end_of_round_message(
            &self.registry,
            self.round.round_winner,
            self.round.match_winner,
            self.time_is_up,
        );
        match self.round_winner() {
            Some(winner) => info!(
                round = self.round.round_number,
                winner = winner.label(),
                wins = winner.wins(),
                "round won"
            ),
            None => info!(
                round = self.round.round_number,
                time_is_up = self.time_is_up,
                "round ended without a winner"
            ),
        }
        self.show_message(&message);
        self.outcomes.push(RoundOutcome {
            round_number: self.round.round_number,
            winner: self.round.round_winner,
            time_is_up: self.time_is_up,
            message,
        });

        self.delay = self.rules.end_delay.as_secs_f32();
    }

    fn enter_finished(&mut self) {
        if let Some(winner) = self.match_winner() {
            info!(
                winner = winner.label(),
                rounds = self.round.round_number,
                "match won"
            );
        }
    }

    fn show_message(&mut self, text: &str) {
        if let Err(e) = self.hooks.set_message(text) {
            warn!("could not display message: {e:#}");
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once a competitor has won the match.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// State of the current (or last) round.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// True if the timer ran out in the current round.
    pub fn time_is_up(&self) -> bool {
        self.time_is_up
    }

    /// Winner of the current round, once it has ended.
    pub fn round_winner(&self) -> Option<&Competitor> {
        self.round.round_winner.and_then(|i| self.registry.get(i))
    }

    /// Winner of the match, once there is one.
    pub fn match_winner(&self) -> Option<&Competitor> {
        self.round.match_winner.and_then(|i| self.registry.get(i))
    }

    /// Every round ended so far, in order.
    pub fn outcomes(&self) -> &[RoundOutcome] {
        &self.outcomes
    }

    /// Match rules.
    pub fn rules(&self) -> &MatchConfig {
        &self.rules
    }

    /// The competitors.
    pub fn registry(&self) -> &CompetitorRegistry {
        &self.registry
    }

    /// The competitors, mutably, so the arena can report eliminations.
    pub fn registry_mut(&mut self) -> &mut CompetitorRegistry {
        &mut self.registry
    }

    /// The game collaborators.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// The game collaborators, mutably.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_interface::{ControlGate, DisplaySink, ViewFraming};
    use crate::competitor::Color;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Enable(u32),
        Disable(u32),
        DefaultFraming,
        Frame(Vec<u32>),
        Message(String),
        Time(u32),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        broken_display: bool,
    }

    impl Recorder {
        fn messages(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Message(m) => Some(m.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn times(&self) -> Vec<u32> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Time(t) => Some(*t),
                    _ => None,
                })
                .collect()
        }
    }

    impl ControlGate for Recorder {
        fn enable_control(&mut self, competitor: &Competitor) {
            self.events.push(Event::Enable(competitor.number()));
        }

        fn disable_control(&mut self, competitor: &Competitor) {
            self.events.push(Event::Disable(competitor.number()));
        }
    }

    impl ViewFraming for Recorder {
        fn frame_on_active(&mut self, competitors: &[&Competitor]) {
            self.events
                .push(Event::Frame(competitors.iter().map(|c| c.number()).collect()));
        }

        fn set_default_framing(&mut self) {
            self.events.push(Event::DefaultFraming);
        }
    }

    impl DisplaySink for Recorder {
        fn set_message(&mut self, text: &str) -> anyhow::Result<()> {
            if self.broken_display {
                anyhow::bail!("display unplugged");
            }
            self.events.push(Event::Message(text.to_owned()));
            Ok(())
        }

        fn set_time_display(&mut self, seconds: u32) -> anyhow::Result<()> {
            if self.broken_display {
                anyhow::bail!("display unplugged");
            }
            self.events.push(Event::Time(seconds));
            Ok(())
        }
    }

    const SECOND: Duration = Duration::from_secs(1);

    fn rules(rounds_to_win: u32) -> MatchConfig {
        MatchConfig::builder()
            .with_rounds_to_win(rounds_to_win)
            .with_start_delay(SECOND)
            .with_end_delay(SECOND)
            .with_max_round_time(Duration::from_secs(5))
            .with_round_cap(10)
            .build()
            .unwrap()
    }

    fn controller(players: usize, rules: MatchConfig) -> MatchController<Recorder> {
        let colors = [Color::RED, Color::BLUE, Color::GREEN, Color::YELLOW];
        let registry = CompetitorRegistry::with_players(&colors[..players]).unwrap();
        MatchController::new(rules, registry, Recorder::default())
    }

    fn step_until(c: &mut MatchController<Recorder>, phase: Phase, dt: Duration) {
        for _ in 0..100 {
            if c.step(dt) == phase {
                return;
            }
        }
        panic!("never reached {phase}");
    }

    #[test]
    fn nothing_happens_before_first_step() {
        let c = controller(2, rules(2));
        assert_eq!(c.phase(), Phase::Starting);
        assert_eq!(c.round().round_number, 0);
        assert!(c.hooks().events.is_empty());
    }

    #[test]
    fn starting_revives_everyone_and_counts_one_round() {
        let mut c = controller(3, rules(2));
        assert_eq!(c.step(SECOND), Phase::Starting);
        assert_eq!(c.round().round_number, 1);
        assert_eq!(c.registry().count_alive(), 3);
        assert_eq!(c.round().time_remaining, 5.0);
        assert_eq!(
            c.hooks().events,
            vec![
                Event::Disable(1),
                Event::Disable(2),
                Event::Disable(3),
                Event::DefaultFraming,
                Event::Frame(vec![1, 2, 3]),
                Event::Message("ROUND 1".to_owned()),
            ]
        );

        step_until(&mut c, Phase::Playing, SECOND);
        c.registry_mut().eliminate(0);
        c.registry_mut().eliminate(2);
        step_until(&mut c, Phase::Ending, SECOND);
        assert_eq!(c.registry().count_alive(), 1);

        step_until(&mut c, Phase::Starting, SECOND);
        assert_eq!(c.round().round_number, 2);
        assert_eq!(c.registry().count_alive(), 3);
        assert_eq!(c.round().round_winner, None);
    }

    #[test]
    fn start_delay_counts_steps_after_entry() {
        let rules = MatchConfig::builder()
            .with_start_delay(Duration::from_secs(3))
            .build()
            .unwrap();
        let mut c = controller(2, rules);
        assert_eq!(c.step(SECOND), Phase::Starting);
        assert_eq!(c.step(SECOND), Phase::Starting);
        assert_eq!(c.step(SECOND), Phase::Starting);
        assert_eq!(c.step(SECOND), Phase::Playing);
        assert_eq!(c.hooks().messages().last(), Some(&""));
        assert!(c.hooks().events.contains(&Event::Enable(1)));
        assert!(c.hooks().events.contains(&Event::Enable(2)));
    }

    #[test]
    fn sole_survivor_wins_the_round() {
        let mut c = controller(3, rules(3));
        step_until(&mut c, Phase::Playing, SECOND);

        c.registry_mut().eliminate(1);
        assert_eq!(c.step(SECOND), Phase::Playing);
        c.registry_mut().eliminate(2);
        assert_eq!(c.step(SECOND), Phase::Ending);

        assert_eq!(c.round().round_winner, Some(0));
        let wins: Vec<_> = c.registry().iter().map(Competitor::wins).collect();
        assert_eq!(wins, vec![1, 0, 0]);
        assert_eq!(c.round().match_winner, None);
        let message = c.hooks().messages().last().unwrap().to_string();
        assert!(message.contains("WINS THE ROUND!"));
        assert!(message.contains("PLAYER 1</color>: 1 WINS"));
        assert!(c.hooks().events.ends_with(&[
            Event::Disable(1),
            Event::Disable(2),
            Event::Disable(3),
            Event::Message(message.clone()),
        ]));
    }

    #[test]
    fn simultaneous_elimination_is_a_tie() {
        let mut c = controller(2, rules(2));
        step_until(&mut c, Phase::Playing, SECOND);
        c.registry_mut().eliminate(0);
        c.registry_mut().eliminate(1);
        assert_eq!(c.step(SECOND), Phase::Ending);

        assert_eq!(c.round().round_winner, None);
        assert_eq!(c.round().match_winner, None);
        assert!(c.registry().iter().all(|p| p.wins() == 0));
        assert!(c.outcomes()[0].message.starts_with("TIE"));
        assert_eq!(c.step(SECOND), Phase::Starting);
    }

    #[test]
    fn two_rounds_win_the_match() {
        let mut c = controller(2, rules(2));

        step_until(&mut c, Phase::Playing, SECOND);
        c.registry_mut().eliminate(1);
        step_until(&mut c, Phase::Ending, SECOND);
        assert_eq!(c.registry().get(0).unwrap().wins(), 1);
        assert_eq!(c.round().match_winner, None);
        assert!(c.outcomes()[0].message.contains("WINS THE ROUND"));
        assert_eq!(c.step(SECOND), Phase::Starting);
        assert_eq!(c.round().round_number, 2);

        step_until(&mut c, Phase::Playing, SECOND);
        c.registry_mut().eliminate(1);
        step_until(&mut c, Phase::Ending, SECOND);
        assert_eq!(c.registry().get(0).unwrap().wins(), 2);
        assert_eq!(c.round().match_winner, Some(0));
        assert_eq!(
            c.outcomes()[1].message,
            "<color=#E52E28>PLAYER 1</color> WINS THE MATCH!"
        );
        assert_eq!(
            c.hooks().messages().last(),
            Some(&"<color=#E52E28>PLAYER 1</color> WINS THE MATCH!")
        );

        assert_eq!(c.step(SECOND), Phase::Finished);
        assert!(c.is_finished());
        assert_eq!(c.match_winner().map(Competitor::number), Some(1));

        let events = c.hooks().events.len();
        assert_eq!(c.step(SECOND), Phase::Finished);
        assert_eq!(c.hooks().events.len(), events);
        assert_eq!(c.round().round_number, 2);
    }

    #[test]
    fn timeout_makes_everyone_lose() {
        let mut c = controller(2, rules(2));
        step_until(&mut c, Phase::Playing, SECOND);
        for _ in 0..5 {
            assert_eq!(c.step(SECOND), Phase::Playing);
        }
        assert_eq!(c.round().time_remaining, 0.0);
        assert_eq!(c.step(SECOND), Phase::Ending);

        assert!(c.time_is_up());
        assert_eq!(c.round().round_winner, None);
        assert_eq!(c.round().match_winner, None);
        assert_eq!(c.hooks().messages().last(), Some(&TIME_UP_MESSAGE));
        assert_eq!(c.hooks().times(), vec![5, 5, 4, 3, 2, 1]);
        assert!(c.registry().iter().all(|p| p.wins() == 0));
    }

    #[test]
    fn timeout_overrides_a_last_second_survivor() {
        let mut c = controller(2, rules(1));
        step_until(&mut c, Phase::Playing, SECOND);
        assert_eq!(c.step(Duration::from_secs(5)), Phase::Playing);
        c.registry_mut().eliminate(1);
        assert_eq!(c.step(SECOND), Phase::Ending);

        assert!(c.time_is_up());
        assert_eq!(c.round().round_winner, None);
        assert_eq!(c.round().match_winner, None);
        assert_eq!(c.outcomes()[0].message, TIME_UP_MESSAGE);
        assert_eq!(c.step(SECOND), Phase::Starting);
    }

    #[test]
    fn timer_accumulates_variable_steps() {
        let mut c = controller(2, rules(2));
        step_until(&mut c, Phase::Playing, SECOND);
        c.step(Duration::from_millis(500));
        c.step(Duration::from_millis(1500));
        assert_eq!(c.round().time_remaining, 3.0);
        assert_eq!(c.step(Duration::from_millis(2750)), Phase::Playing);
        assert_eq!(c.round().time_remaining, 0.25);
        assert_eq!(c.step(Duration::from_millis(250)), Phase::Playing);
        assert_eq!(c.step(Duration::from_millis(250)), Phase::Ending);
        assert!(c.time_is_up());
        assert_eq!(c.hooks().times(), vec![5, 5, 5, 3, 0]);
    }

    #[test]
    fn round_cap_stops_play() {
        let rules = MatchConfig::builder()
            .with_rounds_to_win(2)
            .with_start_delay(Duration::ZERO)
            .with_end_delay(SECOND)
            .with_max_round_time(Duration::from_secs(5))
            .with_round_cap(10)
            .build()
            .unwrap();
        let mut c = controller(2, rules);

        for _ in 0..100 {
            if c.round().round_number == 10 && c.phase() == Phase::Ending {
                break;
            }
            if c.phase() == Phase::Playing {
                c.registry_mut().eliminate(0);
                c.registry_mut().eliminate(1);
            }
            c.step(SECOND);
        }

        assert_eq!(c.round().round_number, 10);
        assert_eq!(c.phase(), Phase::Ending);
        assert_eq!(c.registry().count_alive(), 2);
        assert_eq!(c.round().time_remaining, 5.0);
        assert!(!c.time_is_up());
        assert_eq!(c.round().round_winner, None);
        assert_eq!(c.outcomes().len(), 10);
        assert!(c.outcomes()[9].message.starts_with("TIE"));
    }

    #[test]
    fn single_competitor_wins_every_round() {
        let rules = MatchConfig::builder()
            .with_rounds_to_win(2)
            .with_start_delay(Duration::ZERO)
            .with_end_delay(Duration::ZERO)
            .build()
            .unwrap();
        let mut c = controller(1, rules);
        assert_eq!(c.step(SECOND), Phase::Starting);
        assert_eq!(c.step(SECOND), Phase::Finished);
        assert_eq!(c.outcomes().len(), 2);
        assert_eq!(c.match_winner().map(Competitor::number), Some(1));
    }

    #[test]
    fn broken_display_does_not_block_the_match() {
        let mut c = controller(2, rules(1));
        c.hooks_mut().broken_display = true;
        step_until(&mut c, Phase::Playing, SECOND);
        c.registry_mut().eliminate(0);
        step_until(&mut c, Phase::Finished, SECOND);
        assert_eq!(c.match_winner().map(Competitor::number), Some(2));
        assert!(c.hooks().messages().is_empty());
    }
}
