//! Outcome narratives: the user-facing line appended per resolved round.
//!
//! These strings are contract text — the exact wording is asserted by the
//! test suite and expected by players, so format changes here are breaking.

use rochambet_protocol::{Outcome, RoundResolution, Throw};

/// Builds the narrative for a settled round.
///
/// `previous_gold` is the balance before this round; the delta in the text
/// is derived from it and the resolution's confirmed balance. Winning with
/// rock earns an extra acknowledgment. Deltas saturate so a misbehaving
/// server can't panic the client with an impossible balance pair.
pub(crate) fn narrate(
    previous_gold: u64,
    resolution: &RoundResolution,
    throw: Throw,
) -> String {
    match &resolution.outcome {
        Outcome::Win => {
            let delta = resolution.gold.saturating_sub(previous_gold);
            let mut line =
                format!("You won {delta} gold from {}!", resolution.opposer);
            if throw == Throw::Rock {
                line.push_str(" They smell what's cookin'.");
            }
            line
        }
        Outcome::Loss => {
            let delta = previous_gold.saturating_sub(resolution.gold);
            format!("You lost {delta} gold to {}...", resolution.opposer)
        }
        Outcome::Tie => format!("You tied with {}.", resolution.opposer),
        Outcome::Unrecognized(tag) => format!("Unexpected outcome {tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(outcome: Outcome, gold: u64) -> RoundResolution {
        RoundResolution {
            token: "t2".into(),
            outcome,
            gold,
            opposer: "bob".into(),
            nonce: None,
        }
    }

    #[test]
    fn test_win_narrative() {
        let line = narrate(100, &resolution(Outcome::Win, 115), Throw::Paper);
        assert_eq!(line, "You won 15 gold from bob!");
    }

    #[test]
    fn test_win_with_rock_gets_the_acknowledgment() {
        let line = narrate(100, &resolution(Outcome::Win, 115), Throw::Rock);
        assert_eq!(line, "You won 15 gold from bob! They smell what's cookin'.");
    }

    #[test]
    fn test_loss_narrative() {
        let line = narrate(100, &resolution(Outcome::Loss, 90), Throw::Rock);
        // The rock line is only for wins.
        assert_eq!(line, "You lost 10 gold to bob...");
    }

    #[test]
    fn test_tie_narrative() {
        let line = narrate(100, &resolution(Outcome::Tie, 100), Throw::Scissors);
        assert_eq!(line, "You tied with bob.");
    }

    #[test]
    fn test_unrecognized_outcome_fallback() {
        let line = narrate(
            100,
            &resolution(Outcome::Unrecognized("FORFEIT".into()), 100),
            Throw::Paper,
        );
        assert_eq!(line, "Unexpected outcome FORFEIT");
    }

    #[test]
    fn test_impossible_win_balance_saturates() {
        // A "win" that lowered the balance would underflow a naive delta.
        let line = narrate(100, &resolution(Outcome::Win, 50), Throw::Paper);
        assert_eq!(line, "You won 0 gold from bob!");
    }
}
