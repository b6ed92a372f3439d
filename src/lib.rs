//! Clik Deck - swipe deck and onboarding interaction core for the Clik dating app
//!
//! The swipe deck turns horizontal drags into pass/request decisions and
//! walks an ordered batch of candidates. Backend calls are stubbed.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DeckState, GestureTracker, MatchDeck, OutcomeSink};
pub use crate::models::{Animation, Candidate, CandidateId, Decision, Outcome, SwipeThresholds, Transition};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let deck = MatchDeck::new(services::demo_candidates(), services::LoggingSink);
        assert!(matches!(deck.state(), DeckState::Active(c) if c.id == 1));
    }
}
