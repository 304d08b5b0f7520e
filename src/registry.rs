//! The fixed set of competitors taking part in a match.

use anyhow::{bail, Context};

use crate::competitor::{Color, Competitor};

/// Holds every competitor of a match, in registration order.
///
/// Competitors are addressed by their index in that order. The roster is fixed once the
/// registry is built: nothing is added or removed until the match ends.
#[derive(Debug, Clone)]
pub struct CompetitorRegistry {
    competitors: Vec<Competitor>,
}

impl CompetitorRegistry {
    /// Create a registry from a roster.
    ///
    /// # Errors
    /// Returned when `roster` is empty.
    pub fn new(roster: Vec<Competitor>) -> anyhow::Result<CompetitorRegistry> {
        if roster.is_empty() {
            bail!("a match needs at least one competitor");
        }
        Ok(CompetitorRegistry {
            competitors: roster,
        })
    }

    /// One `PLAYER n` competitor per color, numbered from 1.
    pub fn with_players(colors: &[Color]) -> anyhow::Result<CompetitorRegistry> {
        let roster = colors
            .iter()
            .enumerate()
            .map(|(i, color)| Competitor::new(i as u32 + 1, *color))
            .collect();
        CompetitorRegistry::new(roster).context("could not create players")
    }

    /// Revive a competitor. Its wins are left untouched.
    pub fn reset(&mut self, index: usize) {
        if let Some(competitor) = self.competitors.get_mut(index) {
            competitor.alive = true;
        }
    }

    /// Revive every competitor.
    pub fn reset_all(&mut self) {
        for index in 0..self.competitors.len() {
            self.reset(index);
        }
    }

    /// Mark a competitor as knocked out of the current round.
    pub fn eliminate(&mut self, index: usize) {
        if let Some(competitor) = self.competitors.get_mut(index) {
            competitor.alive = false;
        }
    }

    pub(crate) fn award_round(&mut self, index: usize) {
        if let Some(competitor) = self.competitors.get_mut(index) {
            competitor.wins += 1;
        }
    }

    /// Number of competitors still alive.
    pub fn count_alive(&self) -> usize {
        self.alive().count()
    }

    /// The last competitor standing, if exactly one is alive.
    ///
    /// Zero or several survivors both yield `None`.
    pub fn sole_survivor(&self) -> Option<usize> {
        if self.count_alive() != 1 {
            return None;
        }
        self.competitors.iter().position(Competitor::is_alive)
    }

    /// The first competitor, in registration order, whose wins are exactly `rounds_to_win`.
    ///
    /// Wins are compared with `==`, a competitor past `rounds_to_win` is not reported.
    pub fn match_winner(&self, rounds_to_win: u32) -> Option<usize> {
        self.competitors
            .iter()
            .position(|competitor| competitor.wins == rounds_to_win)
    }

    /// Competitor at `index`.
    pub fn get(&self, index: usize) -> Option<&Competitor> {
        self.competitors.get(index)
    }

    /// All competitors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.iter()
    }

    /// Competitors still alive, in registration order.
    pub fn alive(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.iter().filter(|c| c.is_alive())
    }

    /// Number of competitors (never zero).
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    /// Always false, a registry cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}
