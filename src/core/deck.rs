use crate::core::gesture::{GestureTracker, Release};
use crate::models::{Animation, Candidate, CandidateId, Decision, Outcome, SwipeThresholds, Transition};

/// Receives committed decisions
///
/// Called synchronously, exactly once per commit, before the deck advances.
/// The deck does not observe whether the sink succeeded.
pub trait OutcomeSink {
    fn on_match_request(&mut self, candidate_id: CandidateId);
    fn on_match_pass(&mut self, candidate_id: CandidateId);
}

/// Ordered candidates and a cursor over them
///
/// Invariant: `current_index <= candidates.len()`.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    candidates: Vec<Candidate>,
    current_index: usize,
}

impl Deck {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            current_index: 0,
        }
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.current_index
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.candidates.len()
    }

    fn advance(&mut self) {
        if !self.is_exhausted() {
            self.current_index += 1;
        }
    }
}

/// What the render surface should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckState<'a> {
    Active(&'a Candidate),
    Exhausted,
}

/// Swipe deck controller
///
/// Owns the deck, the gesture tracker and the outcome sink. A commit
/// applies its state change immediately and hands back a [`Transition`];
/// input stays locked until [`MatchDeck::finish_transition`] is called.
pub struct MatchDeck<S> {
    deck: Deck,
    tracker: GestureTracker,
    sink: S,
    in_flight: Option<Transition>,
}

impl<S: OutcomeSink> MatchDeck<S> {
    pub fn new(candidates: Vec<Candidate>, sink: S) -> Self {
        Self::with_thresholds(candidates, sink, SwipeThresholds::default())
    }

    pub fn with_thresholds(candidates: Vec<Candidate>, sink: S, thresholds: SwipeThresholds) -> Self {
        tracing::debug!("Match deck created with {} candidates", candidates.len());
        Self {
            deck: Deck::new(candidates),
            tracker: GestureTracker::new(thresholds),
            sink,
            in_flight: None,
        }
    }

    pub fn current_candidate(&self) -> Option<&Candidate> {
        self.deck.current()
    }

    pub fn state(&self) -> DeckState<'_> {
        match self.deck.current() {
            Some(candidate) => DeckState::Active(candidate),
            None => DeckState::Exhausted,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Live card offset for rendering
    pub fn offset(&self) -> f64 {
        self.tracker.offset()
    }

    /// Transition currently being played, if any
    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    pub fn drag_start(&mut self) -> bool {
        if self.deck.is_exhausted() {
            tracing::trace!("Drag start ignored on exhausted deck");
            return false;
        }
        self.tracker.on_drag_start()
    }

    pub fn drag_move(&mut self, delta_x: f64) {
        self.tracker.on_drag_move(delta_x);
    }

    /// End the current drag
    ///
    /// Returns the animation to play: an exit slide when the drag committed,
    /// a spring back when it was cancelled, nothing when no drag was active.
    pub fn drag_end(&mut self) -> Option<Animation> {
        match self.tracker.on_drag_end() {
            Release::Commit { decision, offset } => self
                .commit_from(decision, offset)
                .map(|transition| transition.animation),
            Release::Cancel { offset } => Some(Animation::SpringBack { from_offset: offset }),
            Release::Idle => None,
        }
    }

    /// Apply a decision to the current candidate, as a button tap does
    ///
    /// No-op (returns `None`) on an exhausted deck or while a previous
    /// transition is still in flight.
    pub fn commit(&mut self, decision: Decision) -> Option<Transition> {
        let offset = self.tracker.offset();
        self.commit_from(decision, offset)
    }

    fn commit_from(&mut self, decision: Decision, from_offset: f64) -> Option<Transition> {
        if self.in_flight.is_some() {
            tracing::trace!("Commit ignored while a transition is in flight");
            return None;
        }
        let candidate_id = match self.deck.current() {
            Some(candidate) => candidate.id,
            None => {
                tracing::trace!("Commit ignored on exhausted deck");
                return None;
            }
        };

        match decision {
            Decision::Request => {
                tracing::info!("Sent request to candidate {}", candidate_id);
                self.sink.on_match_request(candidate_id);
            }
            Decision::Pass => {
                tracing::info!("Skipped candidate {}", candidate_id);
                self.sink.on_match_pass(candidate_id);
            }
        }

        self.deck.advance();
        self.tracker.reset();
        self.tracker.lock();

        if self.deck.is_exhausted() {
            tracing::info!("No more candidates");
        }

        let thresholds = self.tracker.thresholds();
        let direction = decision.direction();
        let transition = Transition {
            outcome: Outcome { candidate_id, decision },
            animation: Animation::Exit {
                direction,
                from_offset,
                to_offset: direction.sign() * thresholds.screen_width,
                duration: thresholds.exit_duration,
            },
        };
        self.in_flight = Some(transition.clone());
        Some(transition)
    }

    /// Signal that the exit animation finished; unlocks drag input
    pub fn finish_transition(&mut self) -> Option<Transition> {
        let finished = self.in_flight.take();
        self.tracker.unlock();
        finished
    }

    /// Replace the candidates and start from the first one
    pub fn reset(&mut self, candidates: Vec<Candidate>) {
        tracing::debug!("Match deck reset with {} candidates", candidates.len());
        self.deck = Deck::new(candidates);
        self.tracker.reset();
        self.tracker.unlock();
        self.in_flight = None;
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls {
        requests: Vec<CandidateId>,
        passes: Vec<CandidateId>,
    }

    impl OutcomeSink for Calls {
        fn on_match_request(&mut self, candidate_id: CandidateId) {
            self.requests.push(candidate_id);
        }

        fn on_match_pass(&mut self, candidate_id: CandidateId) {
            self.passes.push(candidate_id);
        }
    }

    fn candidate(id: CandidateId) -> Candidate {
        Candidate {
            id,
            display_name: format!("Candidate {}", id),
            age: 25,
            image_ref: String::new(),
            interests_summary: String::new(),
            languages_summary: String::new(),
        }
    }

    fn deck_of(n: u32) -> MatchDeck<Calls> {
        MatchDeck::new((1..=n).map(candidate).collect(), Calls::default())
    }

    #[test]
    fn test_initial_state() {
        let deck = deck_of(2);
        assert_eq!(deck.state(), DeckState::Active(&candidate(1)));

        let empty = deck_of(0);
        assert_eq!(empty.state(), DeckState::Exhausted);
        assert!(empty.current_candidate().is_none());
    }

    #[test]
    fn test_commit_advances_by_one() {
        let mut deck = deck_of(3);
        deck.finish_transition();

        let transition = deck.commit(Decision::Request).unwrap();
        assert_eq!(transition.outcome, Outcome { candidate_id: 1, decision: Decision::Request });
        assert_eq!(deck.deck().current_index(), 1);
        assert_eq!(deck.current_candidate().map(|c| c.id), Some(2));
        assert_eq!(deck.sink().requests, vec![1]);
    }

    #[test]
    fn test_commit_on_last_exhausts() {
        let mut deck = deck_of(1);
        deck.commit(Decision::Pass).unwrap();

        assert_eq!(deck.state(), DeckState::Exhausted);
        assert_eq!(deck.deck().current_index(), 1);
        assert_eq!(deck.sink().passes, vec![1]);
    }

    #[test]
    fn test_commit_on_exhausted_is_noop() {
        let mut deck = deck_of(1);
        deck.commit(Decision::Pass);
        deck.finish_transition();

        assert!(deck.commit(Decision::Request).is_none());
        assert_eq!(deck.deck().current_index(), 1);
        assert!(deck.sink().requests.is_empty());
        assert_eq!(deck.sink().passes, vec![1]);
    }

    #[test]
    fn test_commit_blocked_while_in_flight() {
        let mut deck = deck_of(3);
        deck.commit(Decision::Request).unwrap();

        assert!(deck.commit(Decision::Request).is_none());
        assert!(!deck.drag_start());
        assert_eq!(deck.deck().current_index(), 1);

        deck.finish_transition();
        assert!(deck.commit(Decision::Pass).is_some());
        assert_eq!(deck.deck().current_index(), 2);
    }

    #[test]
    fn test_exit_animation_direction() {
        let mut deck = deck_of(2);
        deck.drag_start();
        deck.drag_move(-180.0);

        match deck.drag_end() {
            Some(Animation::Exit { from_offset, to_offset, duration, .. }) => {
                assert_eq!(from_offset, -180.0);
                assert_eq!(to_offset, -390.0);
                assert_eq!(duration.as_millis(), 300);
            }
            other => panic!("expected exit animation, got {:?}", other),
        }
        assert_eq!(deck.offset(), 0.0);
    }

    #[test]
    fn test_tap_during_drag_exits_from_live_offset() {
        let mut deck = deck_of(2);
        assert!(deck.drag_start());
        deck.drag_move(60.0);

        let transition = deck.commit(Decision::Pass).unwrap();
        match transition.animation {
            Animation::Exit { from_offset, to_offset, .. } => {
                assert_eq!(from_offset, 60.0);
                assert_eq!(to_offset, -390.0);
            }
            other => panic!("expected exit animation, got {:?}", other),
        }

        // Drag session is discarded
        assert_eq!(deck.offset(), 0.0);
        assert_eq!(deck.drag_end(), None);
        assert_eq!(deck.sink().passes, vec![1]);
        assert!(deck.sink().requests.is_empty());
    }

    #[test]
    fn test_cancel_springs_back_without_locking() {
        let mut deck = deck_of(2);
        deck.drag_start();
        deck.drag_move(60.0);

        assert_eq!(deck.drag_end(), Some(Animation::SpringBack { from_offset: 60.0 }));
        assert!(deck.in_flight().is_none());
        assert!(deck.drag_start());
        assert_eq!(deck.deck().current_index(), 0);
    }

    #[test]
    fn test_reset_replaces_candidates() {
        let mut deck = deck_of(1);
        deck.commit(Decision::Request);
        assert_eq!(deck.state(), DeckState::Exhausted);

        deck.reset(vec![candidate(7), candidate(8)]);
        assert_eq!(deck.current_candidate().map(|c| c.id), Some(7));
        assert!(deck.in_flight().is_none());
        assert!(deck.drag_start());

        deck.reset(vec![]);
        assert_eq!(deck.state(), DeckState::Exhausted);
    }
}
