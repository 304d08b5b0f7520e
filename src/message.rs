//! Text shown to the players between phases.

use crate::registry::CompetitorRegistry;

/// Shown when a round ends without a sole survivor.
pub const TIE_MESSAGE: &str = "TIE";

/// Shown when the round timer runs out. Overrides every other end-of-round message.
pub const TIME_UP_MESSAGE: &str = "TIME'S UP — BOTH PLAYERS LOSE";

/// Announces a new round.
pub fn round_message(round_number: u32) -> String {
    format!("ROUND {round_number}")
}

/// Build the message displayed once a round is over.
///
/// Later rules replace earlier ones:
/// 1. `TIE`, followed by the score of every competitor
/// 2. with a round winner, `<winner> WINS THE ROUND!` followed by the scores
/// 3. with a match winner, only `<winner> WINS THE MATCH!`
/// 4. when time is up, only [`TIME_UP_MESSAGE`], even if there is a match winner
pub fn end_of_round_message(
    registry: &CompetitorRegistry,
    round_winner: Option<usize>,
    match_winner: Option<usize>,
    time_is_up: bool,
) -> String {
    let mut message = match round_winner.and_then(|i| registry.get(i)) {
        Some(winner) => format!("{} WINS THE ROUND!", winner.colored_label()),
        None => TIE_MESSAGE.to_owned(),
    };

    message.push_str("\n\n\n\n");
    for competitor in registry.iter() {
        message.push_str(&format!(
            "{}: {} WINS\n",
            competitor.colored_label(),
            competitor.wins()
        ));
    }

    if let Some(winner) = match_winner.and_then(|i| registry.get(i)) {
        message = format!("{} WINS THE MATCH!", winner.colored_label());
    }

    if time_is_up {
        message = TIME_UP_MESSAGE.to_owned();
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitor::Color;

    fn registry() -> CompetitorRegistry {
        CompetitorRegistry::with_players(&[Color::RED, Color::BLUE]).unwrap()
    }

    #[test]
    fn tie_lists_scores() {
        let registry = registry();
        let message = end_of_round_message(&registry, None, None, false);
        assert_eq!(
            message,
            "TIE\n\n\n\n<color=#E52E28>PLAYER 1</color>: 0 WINS\n<color=#2A64B2>PLAYER 2</color>: 0 WINS\n"
        );
    }

    #[test]
    fn round_winner_lists_scores() {
        let mut registry = registry();
        registry.award_round(1);
        let message = end_of_round_message(&registry, Some(1), None, false);
        assert!(message.starts_with("<color=#2A64B2>PLAYER 2</color> WINS THE ROUND!\n\n\n\n"));
        assert!(message.ends_with("<color=#2A64B2>PLAYER 2</color>: 1 WINS\n"));
    }

    #[test]
    fn match_winner_replaces_round_message() {
        let registry = registry();
        let message = end_of_round_message(&registry, Some(0), Some(0), false);
        assert_eq!(message, "<color=#E52E28>PLAYER 1</color> WINS THE MATCH!");
    }

    #[test]
    fn time_up_beats_match_winner() {
        let registry = registry();
        let message = end_of_round_message(&registry, Some(0), Some(0), true);
        assert_eq!(message, TIME_UP_MESSAGE);
    }

    #[test]
    fn round_banner() {
        assert_eq!(round_message(4), "ROUND 4");
    }
}
